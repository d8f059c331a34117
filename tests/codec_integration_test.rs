use std::io::{self, Cursor, Read, Write};
use std::sync::Arc;

use fixlayout::{
    fixed_array, Char16, Codec, CodecConfig, Error, FieldKind, LayoutRegistry, Mode, PaddingPolicy, Primitive,
    ScalarKind, SchemaBuilder, Structure, TypeLayout,
};
use proptest::prelude::*;

/// One field of every scalar kind.
#[derive(Debug, Clone, Default, PartialEq)]
struct Scalars {
    flag: bool,
    byte: u8,
    short: u16,
    unit: Char16,
    word: u32,
    quad: u64,
    single: f32,
    double: f64,
}

impl Structure for Scalars {
    const NAME: &'static str = "Scalars";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .scalar("flag", |s| &s.flag, |s| &mut s.flag)
            .scalar("byte", |s| &s.byte, |s| &mut s.byte)
            .scalar("short", |s| &s.short, |s| &mut s.short)
            .scalar("unit", |s| &s.unit, |s| &mut s.unit)
            .scalar("word", |s| &s.word, |s| &mut s.word)
            .scalar("quad", |s| &s.quad, |s| &mut s.quad)
            .scalar("single", |s| &s.single, |s| &mut s.single)
            .scalar("double", |s| &s.double, |s| &mut s.double);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Point {
    x: u16,
    y: u16,
}

impl Structure for Point {
    const NAME: &'static str = "Point";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.scalar("x", |p| &p.x, |p| &mut p.x).scalar("y", |p| &p.y, |p| &mut p.y);
    }
}

/// Arrays of every container kind, no padding and no bools, so any byte pattern is valid.
#[derive(Debug, Clone, PartialEq)]
struct Arrays {
    tag: u32,
    bytes: Box<[u8]>,
    words: Box<[u32]>,
    units: Box<[Char16]>,
    points: Box<[Point]>,
    origin: Point,
}

impl Default for Arrays {
    fn default() -> Self {
        Arrays {
            tag: 0,
            bytes: fixed_array(5),
            words: fixed_array(3),
            units: fixed_array(4),
            points: fixed_array(2),
            origin: Point::default(),
        }
    }
}

impl Structure for Arrays {
    const NAME: &'static str = "Arrays";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .scalar("tag", |a| &a.tag, |a| &mut a.tag)
            .array("bytes", 5, |a| &a.bytes, |a| &mut a.bytes)
            .array("words", 3, |a| &a.words, |a| &mut a.words)
            .array("units", 4, |a| &a.units, |a| &mut a.units)
            .nested_array("points", 2, |a| &a.points, |a| &mut a.points)
            .nested("origin", |a| &a.origin, |a| &mut a.origin);
    }
}

const ARRAYS_SIZE: usize = 4 + 5 + 3 * 4 + 4 * 2 + 2 * 4 + 4;

/// A structure with padding between and after its fields.
#[derive(Debug, Clone, Default, PartialEq)]
struct Padded {
    kind: u8,
    value: u32,
    enabled: bool,
}

impl Structure for Padded {
    const NAME: &'static str = "Padded";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .scalar("kind", |p| &p.kind, |p| &mut p.kind)
            .padding("_pad0", 3)
            .scalar("value", |p| &p.value, |p| &mut p.value)
            .scalar("enabled", |p| &p.enabled, |p| &mut p.enabled)
            .padding("_pad1", 3);
    }
}

fn expected_size(layout: &TypeLayout) -> usize {
    layout
        .fields()
        .iter()
        .map(|field| match &field.kind {
            FieldKind::Struct(nested) | FieldKind::StructArray(nested) => expected_size(nested) * field.length,
            _ => field.size * field.length,
        })
        .sum()
}

#[test]
fn test_layout_sizes_and_offsets() {
    let registry = LayoutRegistry::new();
    let codec = Codec::with_registry(&registry);

    let scalars = codec.layout::<Scalars>().unwrap();
    assert_eq!(scalars.total_size(), 1 + 1 + 2 + 2 + 4 + 8 + 4 + 8);
    assert_eq!(scalars.field("unit").map(|f| f.kind.clone()), Some(FieldKind::Scalar(ScalarKind::Char)));

    let arrays = codec.layout::<Arrays>().unwrap();
    assert_eq!(arrays.total_size(), ARRAYS_SIZE);
    assert_eq!(arrays.offset_of("words"), Some(9));
    assert_eq!(arrays.offset_of("origin.y"), Some(ARRAYS_SIZE - 2));

    let padded = codec.layout::<Padded>().unwrap();
    assert_eq!(padded.total_size(), 12);
    assert_eq!(padded.offset_of("enabled"), Some(8));
}

#[test]
fn test_size_invariant_across_resolutions() {
    let registry = LayoutRegistry::new();
    let first = registry.resolve::<Arrays>().unwrap();
    for _ in 0..3 {
        let again = registry.resolve::<Arrays>().unwrap();
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(again.total_size(), expected_size(&again));
    }

    // An independent registry computes the same layout.
    let other = LayoutRegistry::new().resolve::<Arrays>().unwrap();
    assert!(!Arc::ptr_eq(&first, &other));
    assert_eq!(*first, *other);
}

#[test]
fn test_strict_short_buffer_fails_before_reading() {
    let registry = LayoutRegistry::new();
    let codec = Codec::with_registry(&registry);
    let data = vec![0u8; ARRAYS_SIZE - 1];
    let mut cursor = Cursor::new(&data[..]);

    let err = codec.decode::<Arrays>(&mut cursor).unwrap_err();
    assert!(matches!(
        err,
        Error::BufferSizeMismatch { type_name: "Arrays", expected: ARRAYS_SIZE, available, .. } if available == ARRAYS_SIZE - 1
    ));
    assert_eq!(cursor.position(), 0);
}

#[test]
fn test_embedded_decode_of_consecutive_structures() {
    let registry = LayoutRegistry::new();
    let codec = Codec::with_registry(&registry).with_config(CodecConfig::default().with_mode(Mode::Embedded));
    let data = [1u8, 0, 2, 0, 3, 0, 4, 0, 0xEE];
    let mut cursor = Cursor::new(&data[..]);

    let first: Point = codec.decode(&mut cursor).unwrap();
    let second: Point = codec.decode(&mut cursor).unwrap();
    assert_eq!(first, Point { x: 1, y: 2 });
    assert_eq!(second, Point { x: 3, y: 4 });
    assert_eq!(cursor.position(), 8);
    assert!(codec.decode::<Point>(&mut cursor).is_err());
}

#[test]
fn test_padding_policies() {
    let registry = LayoutRegistry::new();
    let value = Padded { kind: 0x11, value: 0x2233_4455, enabled: true };

    let zeroed = Codec::with_registry(&registry).encode_to_bytes(&value).unwrap();
    assert_eq!(&zeroed[..], &[0x11, 0, 0, 0, 0x55, 0x44, 0x33, 0x22, 1, 0, 0, 0]);

    let preserve = Codec::with_registry(&registry).with_config(CodecConfig::default().with_padding(PaddingPolicy::Preserve));
    let mut out = [0xAAu8; 12];
    preserve.encode_slice(&value, &mut out).unwrap();
    assert_eq!(out, [0x11, 0xAA, 0xAA, 0xAA, 0x55, 0x44, 0x33, 0x22, 1, 0xAA, 0xAA, 0xAA]);
}

#[test]
fn test_encode_checks_nested_arrays_before_writing() {
    let registry = LayoutRegistry::new();
    let codec = Codec::with_registry(&registry);
    let mut value = Arrays::default();
    value.tag = 7;
    value.points = fixed_array(1);

    let mut out = vec![0x5Au8; ARRAYS_SIZE];
    let err = codec.encode_slice(&value, &mut out).unwrap_err();
    assert!(matches!(err, Error::InvalidArrayLength { type_name: "Arrays", field: "points", expected: 2, found: 1 }));
    assert!(out.iter().all(|&b| b == 0x5A));
}

#[test]
fn test_mutate_rejects_resized_array_in_place() {
    let registry = LayoutRegistry::new();
    let codec = Codec::with_registry(&registry);
    let mut value = Arrays::default();
    value.words = fixed_array(4);

    let data = vec![0u8; ARRAYS_SIZE];
    assert!(matches!(
        codec.mutate_slice(&mut value, &data),
        Err(Error::InvalidArrayLength { field: "words", expected: 3, found: 4, .. })
    ));
}

#[test]
fn test_global_free_functions() {
    let point = Point { x: 0x0102, y: 0x0304 };
    let bytes = fixlayout::encode_to_bytes(&point).unwrap();
    assert_eq!(&bytes[..], &[0x02, 0x01, 0x04, 0x03]);

    let decoded: Point = fixlayout::decode(&bytes).unwrap();
    assert_eq!(decoded, point);

    let mut target = Point::default();
    fixlayout::mutate(&mut target, &[9, 0, 8, 0]).unwrap();
    assert_eq!(target, Point { x: 9, y: 8 });

    assert!(Arc::ptr_eq(&fixlayout::resolve::<Point>().unwrap(), &LayoutRegistry::global().resolve::<Point>().unwrap()));
}

/// Laid out as a u16 but only ever moves the cursor by one byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Truncated(u8);

impl Primitive for Truncated {
    const KIND: ScalarKind = ScalarKind::U16;

    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut byte = [0u8; 1];
        reader.read_exact(&mut byte)?;
        Ok(Truncated(byte[0]))
    }

    fn write_to<W: Write>(self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&[self.0])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Misaligned {
    head: Truncated,
    tail: u8,
}

impl Structure for Misaligned {
    const NAME: &'static str = "Misaligned";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.scalar("head", |m| &m.head, |m| &mut m.head).scalar("tail", |m| &m.tail, |m| &mut m.tail);
    }
}

#[test]
fn test_traversal_that_drifts_is_consumed_mismatch() {
    let registry = LayoutRegistry::new();
    let codec = Codec::with_registry(&registry);
    assert_eq!(codec.layout::<Misaligned>().unwrap().total_size(), 3);

    let data = [1u8, 2, 3];
    assert!(matches!(
        codec.decode_slice::<Misaligned>(&data),
        Err(Error::ConsumedMismatch { type_name: "Misaligned", expected: 3, consumed: 2 })
    ));

    let value = Misaligned { head: Truncated(1), tail: 2 };
    assert!(matches!(
        codec.encode_to_bytes(&value),
        Err(Error::ConsumedMismatch { type_name: "Misaligned", expected: 3, consumed: 2 })
    ));

    let mut target = Misaligned::default();
    assert!(matches!(
        codec.mutate_slice(&mut target, &data),
        Err(Error::ConsumedMismatch { type_name: "Misaligned", expected: 3, consumed: 2 })
    ));
}

fn scalars_strategy() -> impl Strategy<Value = Scalars> {
    (
        any::<bool>(),
        any::<u8>(),
        any::<u16>(),
        any::<u16>(),
        any::<u32>(),
        any::<u64>(),
        any::<f32>(),
        any::<f64>(),
    )
        .prop_map(|(flag, byte, short, unit, word, quad, single, double)| Scalars {
            flag,
            byte,
            short,
            unit: Char16(unit),
            word,
            quad,
            single,
            double,
        })
}

proptest! {
    #[test]
    fn prop_scalars_round_trip(value in scalars_strategy()) {
        let registry = LayoutRegistry::new();
        let codec = Codec::with_registry(&registry);
        let bytes = codec.encode_to_bytes(&value).unwrap();
        let decoded: Scalars = codec.decode_slice(&bytes).unwrap();

        prop_assert_eq!(decoded.flag, value.flag);
        prop_assert_eq!(decoded.byte, value.byte);
        prop_assert_eq!(decoded.short, value.short);
        prop_assert_eq!(decoded.unit, value.unit);
        prop_assert_eq!(decoded.word, value.word);
        prop_assert_eq!(decoded.quad, value.quad);
        // Bit comparison so NaN payloads count as equal.
        prop_assert_eq!(decoded.single.to_bits(), value.single.to_bits());
        prop_assert_eq!(decoded.double.to_bits(), value.double.to_bits());
    }

    #[test]
    fn prop_array_bytes_reproduce(data in proptest::collection::vec(any::<u8>(), ARRAYS_SIZE)) {
        let registry = LayoutRegistry::new();
        let codec = Codec::with_registry(&registry);
        let decoded: Arrays = codec.decode_slice(&data).unwrap();
        let encoded = codec.encode_to_bytes(&decoded).unwrap();
        prop_assert_eq!(&encoded[..], &data[..]);
    }

    #[test]
    fn prop_padding_bytes_survive_preserve(data in proptest::collection::vec(any::<u8>(), 12)) {
        let registry = LayoutRegistry::new();
        let codec = Codec::with_registry(&registry).with_config(CodecConfig::default().with_padding(PaddingPolicy::Preserve));
        let decoded: Padded = codec.decode_slice(&data).unwrap();

        let mut out = data.clone();
        codec.encode_slice(&decoded, &mut out).unwrap();
        // Only the bool byte may be normalised to 0/1.
        prop_assert_eq!(&out[..8], &data[..8]);
        prop_assert_eq!(out[8], (data[8] != 0) as u8);
        prop_assert_eq!(&out[9..], &data[9..]);
    }

    #[test]
    fn prop_strict_mode_rejects_other_lengths(len in 0usize..64) {
        prop_assume!(len != ARRAYS_SIZE);
        let registry = LayoutRegistry::new();
        let codec = Codec::with_registry(&registry);
        let data = vec![0u8; len];
        let is_size_mismatch = matches!(codec.decode_slice::<Arrays>(&data), Err(Error::BufferSizeMismatch { .. }));
        prop_assert!(is_size_mismatch);
    }
}

// UTF-16 text stored in fixed-length code unit arrays, and the text buffers
// exchanged with the application.

use crate::codec::primitive::Char16;
use crate::schema::builder::{fixed_array, SchemaBuilder, Structure};

/// Code units available in the output and text-check buffers, terminator included.
pub const TEXT_BUFFER_LEN: usize = 0x3EA;

/// Reads a NUL-terminated string; unpaired surrogates are replaced.
pub fn utf16_to_string(units: &[Char16]) -> String {
    let raw: Vec<u16> = units.iter().map(|unit| unit.0).take_while(|&unit| unit != 0).collect();
    String::from_utf16_lossy(&raw)
}

/// Writes `text` into `dst` followed by a terminating NUL, zero-filling the rest.
///
/// Text that does not fit is cut so the terminator always does; a surrogate
/// pair is never split. Returns the number of code units written before the
/// terminator.
pub fn write_utf16(dst: &mut [Char16], text: &str) -> usize {
    let capacity = dst.len().saturating_sub(1);
    let mut written = 0;
    for ch in text.chars() {
        let mut buf = [0u16; 2];
        let encoded = ch.encode_utf16(&mut buf);
        if written + encoded.len() > capacity {
            break;
        }
        for unit in encoded.iter() {
            dst[written] = Char16(*unit);
            written += 1;
        }
    }
    for slot in dst[written..].iter_mut() {
        *slot = Char16::NUL;
    }
    written
}

/// Allocates a `length`-unit array holding `text`.
pub fn utf16_array(text: &str, length: usize) -> Box<[Char16]> {
    let mut units = fixed_array(length);
    write_utf16(&mut units, text);
    units
}

/// Final text handed back to the application: close result then the string.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputText {
    pub close_result: u32,
    pub text: Box<[Char16]>,
}

impl Default for OutputText {
    fn default() -> Self {
        OutputText { close_result: 0, text: fixed_array(TEXT_BUFFER_LEN) }
    }
}

impl Structure for OutputText {
    const NAME: &'static str = "OutputText";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .scalar("close_result", |o| &o.close_result, |o| &mut o.close_result)
            .array("text", TEXT_BUFFER_LEN, |o| &o.text, |o| &mut o.text);
    }
}

/// Text the application is asked to validate, prefixed by the buffer size.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCheckRequest {
    pub size: u64,
    pub text: Box<[Char16]>,
}

impl Default for TextCheckRequest {
    fn default() -> Self {
        TextCheckRequest { size: 0, text: fixed_array(TEXT_BUFFER_LEN) }
    }
}

impl Structure for TextCheckRequest {
    const NAME: &'static str = "TextCheckRequest";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .scalar("size", |t| &t.size, |t| &mut t.size)
            .array("text", TEXT_BUFFER_LEN, |t| &t.text, |t| &mut t.text);
    }
}

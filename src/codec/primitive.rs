use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::schema::types::ScalarKind;

/// One UTF-16 code unit, as stored by native wide-character arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Char16(pub u16);

impl Char16 {
    /// The terminating NUL unit.
    pub const NUL: Char16 = Char16(0);
}

impl From<u16> for Char16 {
    fn from(unit: u16) -> Self {
        Char16(unit)
    }
}

impl From<Char16> for u16 {
    fn from(unit: Char16) -> Self {
        unit.0
    }
}

/// A fixed-width value that is read and written little-endian.
///
/// Implemented for every `ScalarKind`. Downstream newtypes over one of these
/// widths (bitfields, typed ids) may implement it as well.
pub trait Primitive: Copy + Default + 'static {
    /// The scalar kind this type is laid out as.
    const KIND: ScalarKind;

    /// Reads one value.
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self>;

    /// Writes one value.
    fn write_to<W: Write>(self, writer: &mut W) -> io::Result<()>;

    /// Fills `dst` with consecutive values.
    fn read_into<R: Read>(reader: &mut R, dst: &mut [Self]) -> io::Result<()> {
        for slot in dst.iter_mut() {
            *slot = Self::read_from(reader)?;
        }
        Ok(())
    }

    /// Writes every value of `src` in order.
    fn write_slice<W: Write>(src: &[Self], writer: &mut W) -> io::Result<()> {
        for value in src {
            value.write_to(writer)?;
        }
        Ok(())
    }
}

impl Primitive for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(reader.read_u8()? != 0)
    }

    fn write_to<W: Write>(self, writer: &mut W) -> io::Result<()> {
        writer.write_u8(self as u8)
    }
}

impl Primitive for u8 {
    const KIND: ScalarKind = ScalarKind::U8;

    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_u8()
    }

    fn write_to<W: Write>(self, writer: &mut W) -> io::Result<()> {
        writer.write_u8(self)
    }

    fn read_into<R: Read>(reader: &mut R, dst: &mut [Self]) -> io::Result<()> {
        reader.read_exact(dst)
    }

    fn write_slice<W: Write>(src: &[Self], writer: &mut W) -> io::Result<()> {
        writer.write_all(src)
    }
}

impl Primitive for u16 {
    const KIND: ScalarKind = ScalarKind::U16;

    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_u16::<LittleEndian>()
    }

    fn write_to<W: Write>(self, writer: &mut W) -> io::Result<()> {
        writer.write_u16::<LittleEndian>(self)
    }

    fn read_into<R: Read>(reader: &mut R, dst: &mut [Self]) -> io::Result<()> {
        reader.read_u16_into::<LittleEndian>(dst)
    }
}

impl Primitive for Char16 {
    const KIND: ScalarKind = ScalarKind::Char;

    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Char16(reader.read_u16::<LittleEndian>()?))
    }

    fn write_to<W: Write>(self, writer: &mut W) -> io::Result<()> {
        writer.write_u16::<LittleEndian>(self.0)
    }
}

impl Primitive for u32 {
    const KIND: ScalarKind = ScalarKind::U32;

    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_u32::<LittleEndian>()
    }

    fn write_to<W: Write>(self, writer: &mut W) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(self)
    }

    fn read_into<R: Read>(reader: &mut R, dst: &mut [Self]) -> io::Result<()> {
        reader.read_u32_into::<LittleEndian>(dst)
    }
}

impl Primitive for u64 {
    const KIND: ScalarKind = ScalarKind::U64;

    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_u64::<LittleEndian>()
    }

    fn write_to<W: Write>(self, writer: &mut W) -> io::Result<()> {
        writer.write_u64::<LittleEndian>(self)
    }

    fn read_into<R: Read>(reader: &mut R, dst: &mut [Self]) -> io::Result<()> {
        reader.read_u64_into::<LittleEndian>(dst)
    }
}

impl Primitive for f32 {
    const KIND: ScalarKind = ScalarKind::F32;

    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_f32::<LittleEndian>()
    }

    fn write_to<W: Write>(self, writer: &mut W) -> io::Result<()> {
        writer.write_f32::<LittleEndian>(self)
    }

    fn read_into<R: Read>(reader: &mut R, dst: &mut [Self]) -> io::Result<()> {
        reader.read_f32_into::<LittleEndian>(dst)
    }
}

impl Primitive for f64 {
    const KIND: ScalarKind = ScalarKind::F64;

    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_f64::<LittleEndian>()
    }

    fn write_to<W: Write>(self, writer: &mut W) -> io::Result<()> {
        writer.write_f64::<LittleEndian>(self)
    }

    fn read_into<R: Read>(reader: &mut R, dst: &mut [Self]) -> io::Result<()> {
        reader.read_f64_into::<LittleEndian>(dst)
    }
}

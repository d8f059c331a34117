use std::io::{self, Read, Write};

use bitflags::bitflags;
use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::codec::primitive::Primitive;
use crate::schema::types::ScalarKind;

bitflags! {
    /// Characters the keyboard must reject, packed into one byte.
    ///
    /// "Outside of download code" and "outside of Mii nickname" are stored in
    /// the same bit; setting either one sets both.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InvalidCharFlags: u8 {
        const SPACE = 1 << 0;
        const AT_MARK = 1 << 1;
        const PERCENT = 1 << 2;
        const SLASH = 1 << 3;
        const BACKSLASH = 1 << 4;
        const NUMERIC = 1 << 5;
        const OUTSIDE_OF_DOWNLOAD_CODE = 1 << 6;
        const OUTSIDE_OF_MII_NICKNAME = 1 << 6;
    }
}

impl Default for InvalidCharFlags {
    fn default() -> Self {
        InvalidCharFlags::empty()
    }
}

impl Primitive for InvalidCharFlags {
    const KIND: ScalarKind = ScalarKind::U8;

    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        // Unknown bits are kept so the byte re-encodes unchanged.
        Ok(InvalidCharFlags::from_bits_retain(reader.read_u8()?))
    }

    fn write_to<W: Write>(self, writer: &mut W) -> io::Result<()> {
        writer.write_u8(self.bits())
    }
}

impl InvalidCharFlags {
    pub fn space(&self) -> bool {
        self.contains(Self::SPACE)
    }

    pub fn set_space(&mut self, value: bool) {
        self.set(Self::SPACE, value);
    }

    pub fn at_mark(&self) -> bool {
        self.contains(Self::AT_MARK)
    }

    pub fn set_at_mark(&mut self, value: bool) {
        self.set(Self::AT_MARK, value);
    }

    pub fn percent(&self) -> bool {
        self.contains(Self::PERCENT)
    }

    pub fn set_percent(&mut self, value: bool) {
        self.set(Self::PERCENT, value);
    }

    pub fn slash(&self) -> bool {
        self.contains(Self::SLASH)
    }

    pub fn set_slash(&mut self, value: bool) {
        self.set(Self::SLASH, value);
    }

    pub fn backslash(&self) -> bool {
        self.contains(Self::BACKSLASH)
    }

    pub fn set_backslash(&mut self, value: bool) {
        self.set(Self::BACKSLASH, value);
    }

    pub fn numeric(&self) -> bool {
        self.contains(Self::NUMERIC)
    }

    pub fn set_numeric(&mut self, value: bool) {
        self.set(Self::NUMERIC, value);
    }

    pub fn outside_of_download_code(&self) -> bool {
        self.contains(Self::OUTSIDE_OF_DOWNLOAD_CODE)
    }

    pub fn set_outside_of_download_code(&mut self, value: bool) {
        self.set(Self::OUTSIDE_OF_DOWNLOAD_CODE, value);
    }

    pub fn outside_of_mii_nickname(&self) -> bool {
        self.contains(Self::OUTSIDE_OF_MII_NICKNAME)
    }

    pub fn set_outside_of_mii_nickname(&mut self, value: bool) {
        self.set(Self::OUTSIDE_OF_MII_NICKNAME, value);
    }
}

// Typed views over the raw integers stored in keyboard structures.
//
// Structures keep the raw value so that unknown values survive a decode and
// re-encode unchanged; these enums are used by the typed getters.

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::internal::error::{Error, Result};

/// Characters the keyboard accepts.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
pub enum KeyboardMode {
    Full = 0x0,
    Numeric = 0x1,
    Ascii = 0x2,
    FullLatin = 0x3,
    Alphabet = 0x4,
    SimplifiedChinese = 0x5,
    TraditionalChinese = 0x6,
    Korean = 0x7,
    LanguageSet2 = 0x8,
    LanguageSet2Latin = 0x9,
}

/// Where the cursor starts within the initial string.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
pub enum InitialCursorPos {
    First = 0x0,
    Last = 0x1,
}

#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
pub enum PasswordMode {
    Show = 0x0,
    /// Input is masked
    Hide = 0x1,
}

/// Only honoured when `1 <= text_max_length <= 32`; multi-line is used otherwise.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
pub enum InputFormMode {
    OneLine = 0x0,
    MultiLine = 0x1,
    /// Uses `separate_text_pos`
    Separate = 0x2,
}

/// Language of a custom dictionary entry.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
pub enum DictionaryLang {
    Japanese = 0x00,
    AmericanEnglish = 0x01,
    CanadianFrench = 0x02,
    LatinAmericanSpanish = 0x03,
    Reserved1 = 0x04,
    BritishEnglish = 0x05,
    French = 0x06,
    German = 0x07,
    Spanish = 0x08,
    Italian = 0x09,
    Dutch = 0x0A,
    Portuguese = 0x0B,
    Russian = 0x0C,
    Reserved2 = 0x0D,
    SimplifiedChinesePinyin = 0x0E,
    TraditionalChineseCangjie = 0x0F,
    TraditionalChineseSimplifiedCangjie = 0x10,
    TraditionalChineseZhuyin = 0x11,
    Korean = 0x12,
}

/// How the keyboard was closed, leading the output text buffer.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
pub enum CloseResult {
    Enter = 0x0,
    Cancel = 0x1,
}

/// Verdict sent back by the application after a text check request.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
pub enum TextCheckResult {
    Success = 0x0,
    ShowFailureDialog = 0x1,
    ShowConfirmDialog = 0x2,
}

/// Converts a stored raw value into its enum, failing on values the enum does not know.
pub fn typed<T>(field: &str, raw: T::Primitive) -> Result<T>
where
    T: TryFromPrimitive,
    T::Primitive: fmt::LowerHex,
{
    T::try_from_primitive(raw)
        .map_err(|_| Error::CodecError(format!("Unknown {} value 0x{:x} in field '{}'", T::NAME, raw, field)))
}

/// Formats a raw value as its variant name, or as hex if unknown.
pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

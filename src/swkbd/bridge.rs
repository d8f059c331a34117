// Buffers exchanged between the keyboard applet and the application.
//
// The UI layer hands raw storage buffers in and gets structured values out;
// everything here goes through the global layout registry.

use bytes::Bytes;
use byteorder::{ByteOrder, LittleEndian};
use log::debug;

use crate::codec::{Codec, CodecConfig, Mode};
use crate::internal::error::{Error, Result};
use crate::schema::builder::{SchemaBuilder, Structure};
use crate::swkbd::config::{KeyboardConfigV0, KeyboardConfigV7, SoftwareKeyboardConfig};
use crate::swkbd::enums::{typed, CloseResult, TextCheckResult};
use crate::swkbd::text::{utf16_to_string, write_utf16, OutputText, TextCheckRequest};

/// First API version using the V7 layout.
pub const API_VERSION_V7: u32 = 0x30007;
/// First API version using the current layout.
pub const API_VERSION_VB: u32 = 0x6000B;

/// Configuration layout revision selected by the application's API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigVersion {
    V0,
    V7,
    VB,
}

impl ConfigVersion {
    pub fn from_api_version(api_version: u32) -> Self {
        if api_version < API_VERSION_V7 {
            ConfigVersion::V0
        } else if api_version < API_VERSION_VB {
            ConfigVersion::V7
        } else {
            ConfigVersion::VB
        }
    }
}

/// Decodes a current-layout configuration from a buffer of exactly its size.
pub fn decode_config(bytes: &[u8]) -> Result<SoftwareKeyboardConfig> {
    Codec::new().decode_slice(bytes)
}

/// Encodes a configuration into a new buffer of exactly its size.
pub fn encode_config(config: &SoftwareKeyboardConfig) -> Result<Bytes> {
    Codec::new().encode_to_bytes(config)
}

/// Refreshes an existing configuration in place.
pub fn mutate_config(config: &mut SoftwareKeyboardConfig, bytes: &[u8]) -> Result<()> {
    Codec::new().mutate_slice(config, bytes)
}

/// Decodes the configuration storage of an application built against `api_version`.
///
/// The storage may be larger than the layout it holds; trailing bytes are
/// ignored. Older layouts are upgraded to the current one.
pub fn decode_versioned(api_version: u32, bytes: &[u8]) -> Result<SoftwareKeyboardConfig> {
    let codec = Codec::new().with_config(CodecConfig::default().with_mode(Mode::Embedded));
    let version = ConfigVersion::from_api_version(api_version);
    debug!("Decoding keyboard config for api version 0x{:X} as {:?}", api_version, version);

    match version {
        ConfigVersion::V0 => Ok(codec.decode_slice::<KeyboardConfigV0>(bytes)?.into()),
        ConfigVersion::V7 => Ok(codec.decode_slice::<KeyboardConfigV7>(bytes)?.into()),
        ConfigVersion::VB => codec.decode_slice(bytes),
    }
}

/// Reads the initial string the application placed in its work buffer.
pub fn initial_text(config: &SoftwareKeyboardConfig, work_buffer: &[u8]) -> Result<String> {
    let start = config.common.initial_string_offset as usize;
    let units = config.common.initial_string_length as usize;
    let end = units
        .checked_mul(2)
        .and_then(|len| start.checked_add(len))
        .filter(|&end| end <= work_buffer.len())
        .ok_or_else(|| {
            Error::CodecError(format!(
                "Initial string at 0x{:X} ({} units) exceeds the {}-byte work buffer",
                start,
                units,
                work_buffer.len()
            ))
        })?;

    let mut raw = vec![0u16; units];
    LittleEndian::read_u16_into(&work_buffer[start..end], &mut raw);
    Ok(String::from_utf16_lossy(&raw))
}

/// Builds the final output buffer handed back when the keyboard closes.
pub fn output_text(close_result: CloseResult, text: &str) -> Result<Bytes> {
    let mut output = OutputText { close_result: close_result.into(), ..Default::default() };
    write_utf16(&mut output.text, text);
    Codec::new().encode_to_bytes(&output)
}

/// Splits an output buffer back into its close result and text.
pub fn parse_output_text(bytes: &[u8]) -> Result<(CloseResult, String)> {
    let output: OutputText = Codec::new().decode_slice(bytes)?;
    Ok((typed("close_result", output.close_result)?, utf16_to_string(&output.text)))
}

/// Builds the request asking the application to validate `text`.
pub fn text_check_request(text: &str) -> Result<Bytes> {
    let codec = Codec::new();
    let size = codec.layout::<TextCheckRequest>()?.total_size() as u64;
    let mut request = TextCheckRequest { size, ..Default::default() };
    write_utf16(&mut request.text, text);
    codec.encode_to_bytes(&request)
}

/// Leading word of the interactive data the application sends after a text check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TextCheckStatus {
    result: u32,
}

impl Structure for TextCheckStatus {
    const NAME: &'static str = "TextCheckStatus";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.scalar("result", |s| &s.result, |s| &mut s.result);
    }
}

/// Reads the text check verdict; anything after the leading word is ignored.
pub fn parse_text_check_result(bytes: &[u8]) -> Result<TextCheckResult> {
    let codec = Codec::new().with_config(CodecConfig::default().with_mode(Mode::Embedded));
    let status: TextCheckStatus = codec.decode_slice(bytes)?;
    typed("result", status.result)
}

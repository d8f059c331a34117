// Software keyboard applet schema
//
// The keyboard configuration an application passes to the system keyboard
// applet, the text buffers returned to it, and the helpers the UI layer uses
// to move between raw storage and structured values.

pub use self::bridge::{
    decode_config, decode_versioned, encode_config, initial_text, mutate_config, output_text, parse_output_text,
    parse_text_check_result, text_check_request, ConfigVersion,
};
pub use self::config::{CommonKeyboardConfig, DictionaryInfo, KeyboardConfigV0, KeyboardConfigV7, SoftwareKeyboardConfig};
pub use self::enums::{CloseResult, DictionaryLang, InitialCursorPos, InputFormMode, KeyboardMode, PasswordMode, TextCheckResult};
pub use self::flags::InvalidCharFlags;
pub use self::text::{OutputText, TextCheckRequest};

pub mod bridge;
pub mod config;
pub mod enums;
pub mod flags;
pub mod text;

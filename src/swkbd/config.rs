// Software keyboard configuration structures
//
// Every applet API revision extends the same common block. Raw integers are
// stored for enum-valued fields so unknown values re-encode unchanged; the
// typed getters reject them instead.

use crate::codec::primitive::Char16;
use crate::internal::error::Result;
use crate::schema::builder::{fixed_array, SchemaBuilder, Structure};
use crate::swkbd::enums::{typed, DictionaryLang, InitialCursorPos, InputFormMode, KeyboardMode, PasswordMode};
use crate::swkbd::flags::InvalidCharFlags;
use crate::swkbd::text::{utf16_to_string, write_utf16};

pub const OK_TEXT_LEN: usize = 0x9;
pub const HEADER_TEXT_LEN: usize = 0x41;
pub const SUB_TEXT_LEN: usize = 0x81;
pub const GUIDE_TEXT_LEN: usize = 0x101;
pub const SEPARATE_TEXT_POS_LEN: usize = 0x8;
pub const DIC_INFO_LEN: usize = 0x18;

/// Value of every `separate_text_pos` slot when the application set none.
pub const SEPARATE_TEXT_POS_UNSET: u32 = 0xFFFF_FFFF;

/// A custom dictionary entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryInfo {
    pub offset: u32,
    pub size: u16,
    pub dictionary_lang: u16,
}

impl DictionaryInfo {
    pub fn dictionary_lang(&self) -> Result<DictionaryLang> {
        typed("dictionary_lang", self.dictionary_lang)
    }
}

impl Structure for DictionaryInfo {
    const NAME: &'static str = "DictionaryInfo";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .scalar("offset", |d| &d.offset, |d| &mut d.offset)
            .scalar("size", |d| &d.size, |d| &mut d.size)
            .scalar("dictionary_lang", |d| &d.dictionary_lang, |d| &mut d.dictionary_lang);
    }
}

/// The configuration block shared by every API revision.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonKeyboardConfig {
    pub keyboard_mode: u32,
    pub ok_text: Box<[Char16]>,
    pub left_optional_symbol_key: Char16,
    pub right_optional_symbol_key: Char16,
    pub is_prediction_enabled: bool,
    pub invalid_chars_flags: InvalidCharFlags,
    pub initial_cursor_pos: u32,
    pub header_text: Box<[Char16]>,
    pub sub_text: Box<[Char16]>,
    pub guide_text: Box<[Char16]>,
    pub text_max_length: u32,
    pub text_min_length: u32,
    pub password_mode: u32,
    pub input_form_mode: u32,
    pub is_use_new_line: bool,
    pub is_use_utf8: bool,
    pub is_use_blur_background: bool,
    /// Byte offset of the initial string in the work buffer
    pub initial_string_offset: u32,
    /// Length of the initial string in UTF-16 code units
    pub initial_string_length: u32,
    pub user_dictionary_offset: u32,
    pub user_dictionary_num: u32,
    pub is_use_text_check: bool,
}

impl Default for CommonKeyboardConfig {
    fn default() -> Self {
        CommonKeyboardConfig {
            keyboard_mode: 0,
            ok_text: fixed_array(OK_TEXT_LEN),
            left_optional_symbol_key: Char16::NUL,
            right_optional_symbol_key: Char16::NUL,
            is_prediction_enabled: false,
            invalid_chars_flags: InvalidCharFlags::empty(),
            initial_cursor_pos: 0,
            header_text: fixed_array(HEADER_TEXT_LEN),
            sub_text: fixed_array(SUB_TEXT_LEN),
            guide_text: fixed_array(GUIDE_TEXT_LEN),
            text_max_length: 0,
            text_min_length: 0,
            password_mode: 0,
            input_form_mode: 0,
            is_use_new_line: false,
            is_use_utf8: false,
            is_use_blur_background: false,
            initial_string_offset: 0,
            initial_string_length: 0,
            user_dictionary_offset: 0,
            user_dictionary_num: 0,
            is_use_text_check: false,
        }
    }
}

impl Structure for CommonKeyboardConfig {
    const NAME: &'static str = "CommonKeyboardConfig";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .scalar("keyboard_mode", |c| &c.keyboard_mode, |c| &mut c.keyboard_mode)
            .array("ok_text", OK_TEXT_LEN, |c| &c.ok_text, |c| &mut c.ok_text)
            .scalar("left_optional_symbol_key", |c| &c.left_optional_symbol_key, |c| &mut c.left_optional_symbol_key)
            .scalar("right_optional_symbol_key", |c| &c.right_optional_symbol_key, |c| &mut c.right_optional_symbol_key)
            .scalar("is_prediction_enabled", |c| &c.is_prediction_enabled, |c| &mut c.is_prediction_enabled)
            .padding("_pad0", 0x1)
            .scalar("invalid_chars_flags", |c| &c.invalid_chars_flags, |c| &mut c.invalid_chars_flags)
            .padding("_pad1", 0x3)
            .scalar("initial_cursor_pos", |c| &c.initial_cursor_pos, |c| &mut c.initial_cursor_pos)
            .array("header_text", HEADER_TEXT_LEN, |c| &c.header_text, |c| &mut c.header_text)
            .array("sub_text", SUB_TEXT_LEN, |c| &c.sub_text, |c| &mut c.sub_text)
            .array("guide_text", GUIDE_TEXT_LEN, |c| &c.guide_text, |c| &mut c.guide_text)
            .padding("_pad2", 0x2)
            .scalar("text_max_length", |c| &c.text_max_length, |c| &mut c.text_max_length)
            .scalar("text_min_length", |c| &c.text_min_length, |c| &mut c.text_min_length)
            .scalar("password_mode", |c| &c.password_mode, |c| &mut c.password_mode)
            .scalar("input_form_mode", |c| &c.input_form_mode, |c| &mut c.input_form_mode)
            .scalar("is_use_new_line", |c| &c.is_use_new_line, |c| &mut c.is_use_new_line)
            .scalar("is_use_utf8", |c| &c.is_use_utf8, |c| &mut c.is_use_utf8)
            .scalar("is_use_blur_background", |c| &c.is_use_blur_background, |c| &mut c.is_use_blur_background)
            .padding("_pad3", 0x1)
            .scalar("initial_string_offset", |c| &c.initial_string_offset, |c| &mut c.initial_string_offset)
            .scalar("initial_string_length", |c| &c.initial_string_length, |c| &mut c.initial_string_length)
            .scalar("user_dictionary_offset", |c| &c.user_dictionary_offset, |c| &mut c.user_dictionary_offset)
            .scalar("user_dictionary_num", |c| &c.user_dictionary_num, |c| &mut c.user_dictionary_num)
            .scalar("is_use_text_check", |c| &c.is_use_text_check, |c| &mut c.is_use_text_check)
            .padding("reserved0", 0x3);
    }
}

impl CommonKeyboardConfig {
    pub fn keyboard_mode(&self) -> Result<KeyboardMode> {
        typed("keyboard_mode", self.keyboard_mode)
    }

    pub fn set_keyboard_mode(&mut self, mode: KeyboardMode) {
        self.keyboard_mode = mode.into();
    }

    pub fn initial_cursor_pos(&self) -> Result<InitialCursorPos> {
        typed("initial_cursor_pos", self.initial_cursor_pos)
    }

    pub fn set_initial_cursor_pos(&mut self, pos: InitialCursorPos) {
        self.initial_cursor_pos = pos.into();
    }

    pub fn password_mode(&self) -> Result<PasswordMode> {
        typed("password_mode", self.password_mode)
    }

    pub fn set_password_mode(&mut self, mode: PasswordMode) {
        self.password_mode = mode.into();
    }

    pub fn input_form_mode(&self) -> Result<InputFormMode> {
        typed("input_form_mode", self.input_form_mode)
    }

    pub fn set_input_form_mode(&mut self, mode: InputFormMode) {
        self.input_form_mode = mode.into();
    }

    pub fn ok_text(&self) -> String {
        utf16_to_string(&self.ok_text)
    }

    pub fn set_ok_text(&mut self, text: &str) {
        write_utf16(&mut self.ok_text, text);
    }

    pub fn header_text(&self) -> String {
        utf16_to_string(&self.header_text)
    }

    pub fn set_header_text(&mut self, text: &str) {
        write_utf16(&mut self.header_text, text);
    }

    pub fn sub_text(&self) -> String {
        utf16_to_string(&self.sub_text)
    }

    pub fn set_sub_text(&mut self, text: &str) {
        write_utf16(&mut self.sub_text, text);
    }

    pub fn guide_text(&self) -> String {
        utf16_to_string(&self.guide_text)
    }

    pub fn set_guide_text(&mut self, text: &str) {
        write_utf16(&mut self.guide_text, text);
    }
}

/// Layout used before API version 0x30007.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyboardConfigV0 {
    pub common: CommonKeyboardConfig,
    pub text_check_callback: u64,
}

impl Structure for KeyboardConfigV0 {
    const NAME: &'static str = "KeyboardConfigV0";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .nested("common", |c| &c.common, |c| &mut c.common)
            .padding("_pad0", 0x4)
            .scalar("text_check_callback", |c| &c.text_check_callback, |c| &mut c.text_check_callback);
    }
}

/// Layout used from API version 0x30007 up to 0x6000B.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardConfigV7 {
    pub common: CommonKeyboardConfig,
    pub text_check_callback: u64,
    pub separate_text_pos: Box<[u32]>,
}

impl Default for KeyboardConfigV7 {
    fn default() -> Self {
        KeyboardConfigV7 {
            common: CommonKeyboardConfig::default(),
            text_check_callback: 0,
            separate_text_pos: fixed_array(SEPARATE_TEXT_POS_LEN),
        }
    }
}

impl Structure for KeyboardConfigV7 {
    const NAME: &'static str = "KeyboardConfigV7";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .nested("common", |c| &c.common, |c| &mut c.common)
            .padding("_pad0", 0x4)
            .scalar("text_check_callback", |c| &c.text_check_callback, |c| &mut c.text_check_callback)
            .array("separate_text_pos", SEPARATE_TEXT_POS_LEN, |c| &c.separate_text_pos, |c| &mut c.separate_text_pos);
    }
}

/// The current keyboard configuration, used from API version 0x6000B on.
///
/// Older layouts are upgraded into this one through `From`.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftwareKeyboardConfig {
    pub common: CommonKeyboardConfig,
    pub separate_text_pos: Box<[u32]>,
    pub customized_dic_info_list: Box<[DictionaryInfo]>,
    pub customized_dic_count: u8,
    pub is_cancel_button_disabled: bool,
    pub trigger: u8,
}

impl Default for SoftwareKeyboardConfig {
    fn default() -> Self {
        SoftwareKeyboardConfig {
            common: CommonKeyboardConfig::default(),
            separate_text_pos: vec![SEPARATE_TEXT_POS_UNSET; SEPARATE_TEXT_POS_LEN].into_boxed_slice(),
            customized_dic_info_list: fixed_array(DIC_INFO_LEN),
            customized_dic_count: 0,
            is_cancel_button_disabled: false,
            trigger: 0,
        }
    }
}

impl Structure for SoftwareKeyboardConfig {
    const NAME: &'static str = "SoftwareKeyboardConfig";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .nested("common", |c| &c.common, |c| &mut c.common)
            .array("separate_text_pos", SEPARATE_TEXT_POS_LEN, |c| &c.separate_text_pos, |c| &mut c.separate_text_pos)
            .nested_array("customized_dic_info_list", DIC_INFO_LEN, |c| &c.customized_dic_info_list, |c| {
                &mut c.customized_dic_info_list
            })
            .scalar("customized_dic_count", |c| &c.customized_dic_count, |c| &mut c.customized_dic_count)
            .scalar("is_cancel_button_disabled", |c| &c.is_cancel_button_disabled, |c| &mut c.is_cancel_button_disabled)
            .padding("reserved1", 0xD)
            .scalar("trigger", |c| &c.trigger, |c| &mut c.trigger)
            .padding("reserved2", 0x4);
    }
}

impl From<KeyboardConfigV0> for SoftwareKeyboardConfig {
    fn from(v0: KeyboardConfigV0) -> Self {
        SoftwareKeyboardConfig { common: v0.common, ..Default::default() }
    }
}

impl From<KeyboardConfigV7> for SoftwareKeyboardConfig {
    fn from(v7: KeyboardConfigV7) -> Self {
        SoftwareKeyboardConfig {
            common: v7.common,
            separate_text_pos: v7.separate_text_pos,
            ..Default::default()
        }
    }
}

use std::io::Cursor;
use std::sync::Arc;

use fixlayout::swkbd::config::SEPARATE_TEXT_POS_UNSET;
use fixlayout::swkbd::text::TEXT_BUFFER_LEN;
use fixlayout::swkbd::{
    decode_config, decode_versioned, encode_config, initial_text, mutate_config, output_text, parse_output_text,
    text_check_request, CloseResult, CommonKeyboardConfig, DictionaryInfo, DictionaryLang, InputFormMode,
    KeyboardConfigV0, KeyboardConfigV7, KeyboardMode, OutputText, SoftwareKeyboardConfig, TextCheckRequest,
};
use fixlayout::{Codec, CodecConfig, Error, LayoutRegistry, Mode, Remaining};

const CONFIG_SIZE: usize = 0x4C8;
const TEXT_MAX_LENGTH_OFFSET: usize = 0x3AC;
const INVALID_CHARS_OFFSET: usize = 0x1C;

fn config_bytes(text_max_length: u32) -> Vec<u8> {
    let mut data = vec![0u8; CONFIG_SIZE];
    data[TEXT_MAX_LENGTH_OFFSET..TEXT_MAX_LENGTH_OFFSET + 4].copy_from_slice(&text_max_length.to_le_bytes());
    data
}

#[test]
fn test_keyboard_layout_sizes() {
    let registry = LayoutRegistry::new();
    let codec = Codec::with_registry(&registry);

    assert_eq!(codec.layout::<DictionaryInfo>().unwrap().total_size(), 8);
    assert_eq!(codec.layout::<CommonKeyboardConfig>().unwrap().total_size(), 0x3D4);
    assert_eq!(codec.layout::<KeyboardConfigV0>().unwrap().total_size(), 0x3E0);
    assert_eq!(codec.layout::<KeyboardConfigV7>().unwrap().total_size(), 0x400);
    assert_eq!(codec.layout::<SoftwareKeyboardConfig>().unwrap().total_size(), CONFIG_SIZE);
    assert_eq!(codec.layout::<OutputText>().unwrap().total_size(), 0x7D8);
    assert_eq!(codec.layout::<TextCheckRequest>().unwrap().total_size(), 0x7DC);
}

#[test]
fn test_keyboard_field_offsets() {
    let layout = LayoutRegistry::new().resolve::<SoftwareKeyboardConfig>().unwrap();

    assert_eq!(layout.offset_of("common.invalid_chars_flags"), Some(INVALID_CHARS_OFFSET));
    assert_eq!(layout.offset_of("common.initial_cursor_pos"), Some(0x20));
    assert_eq!(layout.offset_of("common.header_text"), Some(0x24));
    assert_eq!(layout.offset_of("common.text_max_length"), Some(TEXT_MAX_LENGTH_OFFSET));
    assert_eq!(layout.offset_of("common.initial_string_offset"), Some(0x3C0));
    assert_eq!(layout.offset_of("common.is_use_text_check"), Some(0x3D0));
    assert_eq!(layout.offset_of("separate_text_pos"), Some(0x3D4));
    assert_eq!(layout.offset_of("customized_dic_info_list"), Some(0x3F4));
    assert_eq!(layout.offset_of("customized_dic_count"), Some(0x4B4));
    assert_eq!(layout.offset_of("trigger"), Some(0x4C3));
}

#[test]
fn test_decode_text_max_length_and_reencode_identically() {
    let data = config_bytes(100);
    let config = decode_config(&data).unwrap();

    assert_eq!(config.common.text_max_length, 100);
    assert_eq!(config.common.text_min_length, 0);
    assert!(!config.common.is_prediction_enabled);
    assert!(!config.common.is_use_new_line);
    assert!(!config.is_cancel_button_disabled);
    assert_eq!(config.common.keyboard_mode().unwrap(), KeyboardMode::Full);
    assert_eq!(config.customized_dic_info_list.len(), 0x18);

    let encoded = encode_config(&config).unwrap();
    assert_eq!(&encoded[..], &data[..]);
}

#[test]
fn test_typed_fields_survive_round_trip() {
    let mut config = SoftwareKeyboardConfig::default();
    config.common.set_keyboard_mode(KeyboardMode::Numeric);
    config.common.set_input_form_mode(InputFormMode::Separate);
    config.common.set_header_text("Name");
    config.common.invalid_chars_flags.set_slash(true);
    config.customized_dic_info_list[3] =
        DictionaryInfo { offset: 0x40, size: 0x10, dictionary_lang: DictionaryLang::German.into() };
    config.customized_dic_count = 4;
    config.trigger = 1;

    let bytes = encode_config(&config).unwrap();
    let decoded = decode_config(&bytes).unwrap();
    assert_eq!(decoded, config);
    assert_eq!(decoded.common.header_text(), "Name");
    assert_eq!(decoded.customized_dic_info_list[3].dictionary_lang().unwrap(), DictionaryLang::German);
    assert!(decoded.separate_text_pos.iter().all(|&pos| pos == SEPARATE_TEXT_POS_UNSET));
}

#[test]
fn test_bit_six_sets_both_shared_accessors() {
    let mut data = config_bytes(0);
    data[INVALID_CHARS_OFFSET] = 0b0100_0000;
    let config = decode_config(&data).unwrap();

    let flags = config.common.invalid_chars_flags;
    assert!(flags.outside_of_download_code());
    assert!(flags.outside_of_mii_nickname());
    assert!(!flags.space());
    assert!(!flags.numeric());
}

#[test]
fn test_one_extra_byte_strict_fails_embedded_succeeds() {
    let mut data = config_bytes(100);
    data.push(0x7F);

    assert!(matches!(
        decode_config(&data),
        Err(Error::BufferSizeMismatch { expected: CONFIG_SIZE, available, .. }) if available == CONFIG_SIZE + 1
    ));

    let codec = Codec::new().with_config(CodecConfig::default().with_mode(Mode::Embedded));
    let mut cursor = Cursor::new(&data[..]);
    let config: SoftwareKeyboardConfig = codec.decode(&mut cursor).unwrap();
    assert_eq!(config.common.text_max_length, 100);
    assert_eq!(cursor.position() as usize, CONFIG_SIZE);
    assert_eq!(cursor.remaining(), 1);
}

#[test]
fn test_short_buffer_is_size_mismatch() {
    let data = vec![0u8; CONFIG_SIZE - 1];
    assert!(matches!(decode_config(&data), Err(Error::BufferSizeMismatch { .. })));
}

#[test]
fn test_wrong_text_length_encodes_nothing() {
    let mut config = SoftwareKeyboardConfig::default();
    config.common.guide_text = vec![fixlayout::Char16::NUL; 3].into_boxed_slice();

    assert!(matches!(
        encode_config(&config),
        Err(Error::InvalidArrayLength { type_name: "CommonKeyboardConfig", field: "guide_text", expected: 0x101, found: 3 })
    ));

    let mut out = vec![0xCCu8; CONFIG_SIZE];
    assert!(Codec::new().encode_slice(&config, &mut out).is_err());
    assert!(out.iter().all(|&b| b == 0xCC));
}

#[test]
fn test_mutate_keeps_nested_storage() {
    let mut config = SoftwareKeyboardConfig::default();
    let header_storage = config.common.header_text.as_ptr();
    let dic_storage = config.customized_dic_info_list.as_ptr();

    mutate_config(&mut config, &config_bytes(42)).unwrap();
    assert_eq!(config.common.text_max_length, 42);
    assert_eq!(config.common.header_text.as_ptr(), header_storage);
    assert_eq!(config.customized_dic_info_list.as_ptr(), dic_storage);
    // Mutate overwrites everything, including the all-unset default.
    assert!(config.separate_text_pos.iter().all(|&pos| pos == 0));
}

#[test]
fn test_versioned_decode_upgrades_older_layouts() {
    let mut v7 = KeyboardConfigV7::default();
    v7.common.text_max_length = 16;
    v7.text_check_callback = 0xDEAD_BEEF;
    v7.separate_text_pos[2] = 5;
    let mut storage = fixlayout::encode_to_bytes(&v7).unwrap().to_vec();
    // Storage buffers are often larger than the layout they carry.
    storage.resize(0x1000, 0);

    let upgraded = decode_versioned(0x50000, &storage).unwrap();
    assert_eq!(upgraded.common.text_max_length, 16);
    assert_eq!(upgraded.separate_text_pos[2], 5);

    let mut v0 = KeyboardConfigV0::default();
    v0.common.text_min_length = 2;
    let storage = fixlayout::encode_to_bytes(&v0).unwrap();
    let upgraded = decode_versioned(0x10000, &storage).unwrap();
    assert_eq!(upgraded.common.text_min_length, 2);
    assert!(upgraded.separate_text_pos.iter().all(|&pos| pos == SEPARATE_TEXT_POS_UNSET));

    let current = decode_versioned(0x6000B, &config_bytes(7)).unwrap();
    assert_eq!(current.common.text_max_length, 7);
    assert!(decode_versioned(0x6000B, &storage).is_err());
}

#[test]
fn test_initial_text_and_output_buffers() {
    let mut config = SoftwareKeyboardConfig::default();
    config.common.initial_string_offset = 2;
    config.common.initial_string_length = 3;
    let mut work = vec![0u8; 16];
    for (i, unit) in "abc".encode_utf16().enumerate() {
        work[2 + i * 2..4 + i * 2].copy_from_slice(&unit.to_le_bytes());
    }
    let text = initial_text(&config, &work).unwrap();
    assert_eq!(text, "abc");

    let output = output_text(CloseResult::Enter, &text).unwrap();
    assert_eq!(output.len(), 0x7D8);
    assert_eq!(&output[..4], &[0, 0, 0, 0]);
    assert_eq!(&output[4..10], &[b'a', 0, b'b', 0, b'c', 0]);
    assert_eq!(&output[10..12], &[0, 0]);
    assert_eq!(parse_output_text(&output).unwrap(), (CloseResult::Enter, "abc".to_string()));

    let request = text_check_request(&text).unwrap();
    assert_eq!(request.len(), 0x7DC);
    assert_eq!(&request[..8], &0x7DCu64.to_le_bytes());
    assert_eq!(&request[8..14], &[b'a', 0, b'b', 0, b'c', 0]);
}

#[test]
fn test_output_text_truncates_overlong_input() {
    let long = "x".repeat(TEXT_BUFFER_LEN + 10);
    let output = output_text(CloseResult::Cancel, &long).unwrap();
    let (result, text) = parse_output_text(&output).unwrap();
    assert_eq!(result, CloseResult::Cancel);
    assert_eq!(text.len(), TEXT_BUFFER_LEN - 1);
    assert_eq!(&output[output.len() - 2..], &[0, 0]);
}

#[test]
fn test_global_layout_cache_hits_are_shared() {
    let first = fixlayout::resolve::<SoftwareKeyboardConfig>().unwrap();
    let second = fixlayout::resolve::<SoftwareKeyboardConfig>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(LayoutRegistry::global().is_resolved::<CommonKeyboardConfig>());
}

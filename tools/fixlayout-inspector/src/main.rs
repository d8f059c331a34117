use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use fixlayout::swkbd::bridge::decode_versioned;
use fixlayout::swkbd::enums::enum_name_or_hex;
use fixlayout::swkbd::{
    CommonKeyboardConfig, DictionaryInfo, InitialCursorPos, InputFormMode, KeyboardConfigV0, KeyboardConfigV7,
    KeyboardMode, OutputText, PasswordMode, SoftwareKeyboardConfig, TextCheckRequest,
};
use fixlayout::{LayoutRegistry, TypeLayout};

#[derive(Debug, Parser)]
#[command(name = "fixlayout-inspector", about = "Inspect fixed-layout keyboard structures and buffers")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the offset table of a structure
    Layout {
        #[arg(short, long, value_enum, default_value_t = StructureName::Config)]
        structure: StructureName,
    },
    /// Decode a keyboard configuration buffer
    Decode {
        /// Raw buffer on disk
        #[arg(short, long, conflicts_with = "hex", required_unless_present = "hex")]
        file: Option<PathBuf>,
        /// Raw buffer as a hex string
        #[arg(long)]
        hex: Option<String>,
        /// Application API version, decimal or 0x-prefixed hex
        #[arg(short, long, default_value = "0x6000B", value_parser = parse_u32)]
        api_version: u32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StructureName {
    Config,
    Common,
    V0,
    V7,
    DictionaryInfo,
    OutputText,
    TextCheckRequest,
}

fn parse_u32(value: &str) -> Result<u32, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|e| format!("invalid number '{}': {}", value, e))
}

fn layout_of(structure: StructureName) -> Result<std::sync::Arc<TypeLayout>> {
    let registry = LayoutRegistry::global();
    let layout = match structure {
        StructureName::Config => registry.resolve::<SoftwareKeyboardConfig>(),
        StructureName::Common => registry.resolve::<CommonKeyboardConfig>(),
        StructureName::V0 => registry.resolve::<KeyboardConfigV0>(),
        StructureName::V7 => registry.resolve::<KeyboardConfigV7>(),
        StructureName::DictionaryInfo => registry.resolve::<DictionaryInfo>(),
        StructureName::OutputText => registry.resolve::<OutputText>(),
        StructureName::TextCheckRequest => registry.resolve::<TextCheckRequest>(),
    };
    Ok(layout?)
}

fn read_input(file: Option<PathBuf>, hex: Option<String>) -> Result<Vec<u8>> {
    match (file, hex) {
        (Some(path), _) => fs::read(&path).with_context(|| format!("failed to read {}", path.display())),
        (None, Some(text)) => {
            let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            hex::decode(cleaned).context("invalid hex input")
        }
        (None, None) => bail!("either --file or --hex is required"),
    }
}

fn print_config(config: &SoftwareKeyboardConfig) {
    let common = &config.common;
    println!("keyboard_mode:          {}", enum_name_or_hex::<KeyboardMode>(common.keyboard_mode));
    println!("ok_text:                {:?}", common.ok_text());
    println!("header_text:            {:?}", common.header_text());
    println!("sub_text:               {:?}", common.sub_text());
    println!("guide_text:             {:?}", common.guide_text());
    println!("invalid_chars_flags:    {:?}", common.invalid_chars_flags);
    println!("initial_cursor_pos:     {}", enum_name_or_hex::<InitialCursorPos>(common.initial_cursor_pos));
    println!("text_length:            {}..={}", common.text_min_length, common.text_max_length);
    println!("password_mode:          {}", enum_name_or_hex::<PasswordMode>(common.password_mode));
    println!("input_form_mode:        {}", enum_name_or_hex::<InputFormMode>(common.input_form_mode));
    println!("is_use_new_line:        {}", common.is_use_new_line);
    println!("is_use_utf8:            {}", common.is_use_utf8);
    println!("is_use_blur_background: {}", common.is_use_blur_background);
    println!(
        "initial_string:         offset 0x{:X}, {} units",
        common.initial_string_offset, common.initial_string_length
    );
    println!("is_use_text_check:      {}", common.is_use_text_check);
    println!("separate_text_pos:      {:?}", config.separate_text_pos);
    println!("customized_dic_count:   {}", config.customized_dic_count);
    println!("cancel_disabled:        {}", config.is_cancel_button_disabled);
    println!("trigger:                {}", config.trigger);
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Layout { structure } => {
            print!("{}", layout_of(structure)?);
        }
        Command::Decode { file, hex, api_version } => {
            let data = read_input(file, hex)?;
            info!("Decoding {} bytes for api version 0x{:X}", data.len(), api_version);
            let config = decode_versioned(api_version, &data)?;
            print_config(&config);
        }
    }

    Ok(())
}

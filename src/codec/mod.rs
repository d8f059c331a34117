// Codec module for fixlayout structures
//
// This module turns resolved layouts into byte traffic. It includes:
//
// 1. Little-endian primitive I/O and byte cursors
// 2. Decode, encode and in-place mutate traversals
// 3. Remaining-length and consumed-bytes validation
// 4. The RCU cell backing the layout cache

use std::io::Cursor;
use std::sync::Arc;

use bytes::Bytes;

use crate::internal::error::Result;
use crate::schema::builder::Structure;
use crate::schema::resolver::LayoutRegistry;
use crate::schema::types::TypeLayout;

use self::cursor::{ReadCursor, WriteCursor};

pub(crate) mod access;
pub mod cursor;
pub mod decode;
pub mod encode;
pub mod mutate;
pub mod primitive;
pub mod rcu;
pub mod validate;

/// How strictly a call treats the bytes remaining in its cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Remaining bytes must equal the structure size exactly.
    #[default]
    Strict,
    /// Remaining bytes must be at least the structure size; the rest is left alone.
    Embedded,
}

/// What the encoder does with padding bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingPolicy {
    /// Write zeros.
    #[default]
    Zero,
    /// Skip the bytes, keeping whatever the buffer already held.
    Preserve,
}

/// Configuration for codec calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecConfig {
    /// Size check applied to the top-level structure
    pub mode: Mode,

    /// Padding handling on encode
    pub padding: PaddingPolicy,
}

impl CodecConfig {
    /// Returns the config with `mode` replaced.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the config with `padding` replaced.
    pub fn with_padding(mut self, padding: PaddingPolicy) -> Self {
        self.padding = padding;
        self
    }
}

/// Entry point for decoding, encoding and mutating structures.
///
/// A `Codec` borrows the registry holding the layout cache and carries the
/// per-call configuration. It is `Copy`; nested structures are processed by
/// an embedded-mode copy of the outer codec.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'r> {
    registry: &'r LayoutRegistry,
    config: CodecConfig,
}

impl Codec<'static> {
    /// Creates a strict codec backed by the process-wide registry.
    pub fn new() -> Self {
        Codec::with_registry(LayoutRegistry::global())
    }
}

impl Default for Codec<'static> {
    fn default() -> Self {
        Codec::new()
    }
}

impl<'r> Codec<'r> {
    /// Creates a strict codec backed by `registry`.
    pub fn with_registry(registry: &'r LayoutRegistry) -> Self {
        Codec { registry, config: CodecConfig::default() }
    }

    /// Returns the codec with `config` replaced.
    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    /// The codec used for nested structures: same registry and padding policy, embedded mode.
    pub fn embedded(&self) -> Self {
        self.with_config(self.config.with_mode(Mode::Embedded))
    }

    pub fn config(&self) -> CodecConfig {
        self.config
    }

    pub fn registry(&self) -> &'r LayoutRegistry {
        self.registry
    }

    /// Resolved layout of `T`.
    pub fn layout<T: Structure>(&self) -> Result<Arc<TypeLayout>> {
        self.registry.resolve::<T>()
    }

    /// Decodes a new `T` from `cursor`.
    pub fn decode<T: Structure>(&self, cursor: &mut ReadCursor<'_>) -> Result<T> {
        decode::decode_from(self, cursor)
    }

    /// Encodes `value` into `cursor`.
    pub fn encode<T: Structure>(&self, value: &T, cursor: &mut WriteCursor<'_>) -> Result<()> {
        encode::encode_into(value, self, cursor)
    }

    /// Overwrites `target` in place from `cursor`.
    pub fn mutate<T: Structure>(&self, target: &mut T, cursor: &mut ReadCursor<'_>) -> Result<()> {
        mutate::mutate_from(target, self, cursor)
    }

    /// Decodes a new `T` from the start of `bytes`.
    pub fn decode_slice<T: Structure>(&self, bytes: &[u8]) -> Result<T> {
        self.decode(&mut Cursor::new(bytes))
    }

    /// Overwrites `target` from the start of `bytes`.
    pub fn mutate_slice<T: Structure>(&self, target: &mut T, bytes: &[u8]) -> Result<()> {
        self.mutate(target, &mut Cursor::new(bytes))
    }

    /// Encodes `value` at the start of `out`.
    pub fn encode_slice<T: Structure>(&self, value: &T, out: &mut [u8]) -> Result<()> {
        self.encode(value, &mut Cursor::new(out))
    }

    /// Encodes `value` into a new buffer of exactly the layout size.
    pub fn encode_to_bytes<T: Structure>(&self, value: &T) -> Result<Bytes> {
        let layout = self.layout::<T>()?;
        let mut out = vec![0u8; layout.total_size()];
        // The buffer is sized for the layout, so strict mode always fits.
        self.with_config(self.config.with_mode(Mode::Strict)).encode_slice(value, &mut out)?;
        Ok(Bytes::from(out))
    }
}

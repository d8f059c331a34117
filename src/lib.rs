// fixlayout library entry point
//
// Declarative fixed-layout little-endian structures shared with native code,
// plus the software keyboard configuration schema built on top of them.

pub mod codec;
pub mod internal;
pub mod schema;
pub mod swkbd;

use std::sync::Arc;

use bytes::Bytes;

pub use crate::codec::cursor::{ReadCursor, Remaining, WriteCursor};
pub use crate::codec::primitive::{Char16, Primitive};
pub use crate::codec::{Codec, CodecConfig, Mode, PaddingPolicy};
pub use crate::internal::error::{Error, Result, Strictness};
pub use crate::schema::{fixed_array, FieldDescriptor, FieldKind, LayoutRegistry, ScalarKind, SchemaBuilder, Structure, TypeLayout};

/// Resolves the layout of `T` in the global registry.
pub fn resolve<T: Structure>() -> Result<Arc<TypeLayout>> {
    LayoutRegistry::global().resolve::<T>()
}

/// Decodes a `T` from a buffer holding exactly its bytes.
pub fn decode<T: Structure>(bytes: &[u8]) -> Result<T> {
    Codec::new().decode_slice(bytes)
}

/// Encodes `value` into a new buffer of exactly its layout size.
pub fn encode_to_bytes<T: Structure>(value: &T) -> Result<Bytes> {
    Codec::new().encode_to_bytes(value)
}

/// Overwrites `target` in place from a buffer holding exactly its bytes.
pub fn mutate<T: Structure>(target: &mut T, bytes: &[u8]) -> Result<()> {
    Codec::new().mutate_slice(target, bytes)
}

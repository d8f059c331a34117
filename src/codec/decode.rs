// Layout-driven decoding into fresh instances.

use crate::codec::cursor::ReadCursor;
use crate::codec::validate::guarded;
use crate::codec::Codec;
use crate::internal::error::Result;
use crate::schema::builder::Structure;

/// Builds a new `T` from the bytes under `cursor`.
///
/// The cursor is checked against the layout size for `codec`'s mode before
/// anything is read, and on success has advanced by exactly that size.
/// Padding bytes are skipped. On failure the cursor position is unspecified.
pub fn decode_from<T: Structure>(codec: &Codec<'_>, cursor: &mut ReadCursor<'_>) -> Result<T> {
    let binding = codec.registry().binding::<T>()?;
    let nested = codec.embedded();

    guarded(&binding.layout, codec.config().mode, cursor, |cursor| {
        let mut value = T::default();
        for (field, access) in binding.fields() {
            access.decode(&mut value, field, &nested, cursor)?;
        }
        Ok(value)
    })
}

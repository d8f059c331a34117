// In-place decoding into existing instances.

use crate::codec::cursor::ReadCursor;
use crate::codec::validate::guarded;
use crate::codec::Codec;
use crate::internal::error::Result;
use crate::schema::builder::Structure;

/// Overwrites every declared field of `target` with the bytes under `cursor`.
///
/// Nested structures and array storage are written through, never replaced,
/// so references held into `target` stay attached to the same storage. An
/// array whose length no longer matches its declaration fails with
/// `InvalidArrayLength`. Fields before the failing one may already hold the
/// new values.
pub fn mutate_from<T: Structure>(target: &mut T, codec: &Codec<'_>, cursor: &mut ReadCursor<'_>) -> Result<()> {
    let binding = codec.registry().binding::<T>()?;
    let nested = codec.embedded();

    guarded(&binding.layout, codec.config().mode, cursor, |cursor| {
        for (field, access) in binding.fields() {
            access.mutate(target, field, &nested, cursor)?;
        }
        Ok(())
    })
}

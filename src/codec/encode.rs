// Layout-driven encoding of existing instances.

use crate::codec::cursor::WriteCursor;
use crate::codec::validate::guarded;
use crate::codec::Codec;
use crate::internal::error::Result;
use crate::schema::builder::Structure;

/// Writes `source` under `cursor`.
///
/// Every array length in the whole instance tree is checked before the first
/// byte is written, so an `InvalidArrayLength` failure leaves the buffer
/// untouched.
pub fn encode_into<T: Structure>(source: &T, codec: &Codec<'_>, cursor: &mut WriteCursor<'_>) -> Result<()> {
    verify(source, codec)?;
    write_into(source, codec, cursor)
}

/// Checks every array-valued field of `source`, descending into nested structures.
pub fn verify<T: Structure>(source: &T, codec: &Codec<'_>) -> Result<()> {
    let binding = codec.registry().binding::<T>()?;
    let nested = codec.embedded();
    for (field, access) in binding.fields() {
        access.verify(source, field, &nested)?;
    }
    Ok(())
}

/// Writes `source` without the up-front verification pass.
pub(crate) fn write_into<T: Structure>(source: &T, codec: &Codec<'_>, cursor: &mut WriteCursor<'_>) -> Result<()> {
    let binding = codec.registry().binding::<T>()?;
    let nested = codec.embedded();

    guarded(&binding.layout, codec.config().mode, cursor, |cursor| {
        for (field, access) in binding.fields() {
            access.encode(source, field, &nested, cursor)?;
        }
        Ok(())
    })
}

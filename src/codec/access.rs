// Per-field accessors driven by the layout traversal.
//
// Every declared field owns one accessor. The traversal hands it the field's
// resolved descriptor and the cursor; the accessor moves exactly
// `descriptor.byte_len()` bytes or fails.

use std::io;

use crate::codec::cursor::{ReadCursor, Remaining, WriteCursor};
use crate::codec::primitive::Primitive;
use crate::codec::{decode, encode, mutate, Codec, PaddingPolicy};
use crate::internal::error::{Error, Result};
use crate::schema::builder::Structure;
use crate::schema::types::FieldDescriptor;

pub(crate) trait FieldAccess<T>: Send + Sync {
    /// Reads the field into a freshly constructed instance.
    fn decode(&self, target: &mut T, field: &FieldDescriptor, codec: &Codec<'_>, cursor: &mut ReadCursor<'_>) -> Result<()>;

    /// Overwrites the field of a live instance without reallocating it.
    fn mutate(&self, target: &mut T, field: &FieldDescriptor, codec: &Codec<'_>, cursor: &mut ReadCursor<'_>) -> Result<()>;

    /// Writes the field's current value.
    fn encode(&self, source: &T, field: &FieldDescriptor, codec: &Codec<'_>, cursor: &mut WriteCursor<'_>) -> Result<()>;

    /// Checks the field can be encoded without touching any buffer.
    fn verify(&self, source: &T, field: &FieldDescriptor, codec: &Codec<'_>) -> Result<()>;
}

fn ensure_length<T: Structure>(field: &FieldDescriptor, found: usize) -> Result<()> {
    if found != field.length {
        return Err(Error::InvalidArrayLength {
            type_name: T::NAME,
            field: field.name,
            expected: field.length,
            found,
        });
    }
    Ok(())
}

pub(crate) struct ScalarField<T, P> {
    pub get: fn(&T) -> &P,
    pub get_mut: fn(&mut T) -> &mut P,
}

impl<T: Structure, P: Primitive> FieldAccess<T> for ScalarField<T, P> {
    fn decode(&self, target: &mut T, field: &FieldDescriptor, codec: &Codec<'_>, cursor: &mut ReadCursor<'_>) -> Result<()> {
        self.mutate(target, field, codec, cursor)
    }

    fn mutate(&self, target: &mut T, _field: &FieldDescriptor, _codec: &Codec<'_>, cursor: &mut ReadCursor<'_>) -> Result<()> {
        *(self.get_mut)(target) = P::read_from(cursor)?;
        Ok(())
    }

    fn encode(&self, source: &T, _field: &FieldDescriptor, _codec: &Codec<'_>, cursor: &mut WriteCursor<'_>) -> Result<()> {
        (self.get)(source).write_to(cursor)?;
        Ok(())
    }

    fn verify(&self, _source: &T, _field: &FieldDescriptor, _codec: &Codec<'_>) -> Result<()> {
        Ok(())
    }
}

pub(crate) struct ScalarArrayField<T, P> {
    pub get: fn(&T) -> &Box<[P]>,
    pub get_mut: fn(&mut T) -> &mut Box<[P]>,
}

impl<T: Structure, P: Primitive> FieldAccess<T> for ScalarArrayField<T, P> {
    fn decode(&self, target: &mut T, field: &FieldDescriptor, _codec: &Codec<'_>, cursor: &mut ReadCursor<'_>) -> Result<()> {
        let mut values = vec![P::default(); field.length].into_boxed_slice();
        P::read_into(cursor, &mut values)?;
        *(self.get_mut)(target) = values;
        Ok(())
    }

    fn mutate(&self, target: &mut T, field: &FieldDescriptor, _codec: &Codec<'_>, cursor: &mut ReadCursor<'_>) -> Result<()> {
        let values = (self.get_mut)(target);
        ensure_length::<T>(field, values.len())?;
        P::read_into(cursor, &mut values[..])?;
        Ok(())
    }

    fn encode(&self, source: &T, field: &FieldDescriptor, _codec: &Codec<'_>, cursor: &mut WriteCursor<'_>) -> Result<()> {
        let values = (self.get)(source);
        ensure_length::<T>(field, values.len())?;
        P::write_slice(values, cursor)?;
        Ok(())
    }

    fn verify(&self, source: &T, field: &FieldDescriptor, _codec: &Codec<'_>) -> Result<()> {
        ensure_length::<T>(field, (self.get)(source).len())
    }
}

pub(crate) struct NestedField<T, S> {
    pub get: fn(&T) -> &S,
    pub get_mut: fn(&mut T) -> &mut S,
}

impl<T: Structure, S: Structure> FieldAccess<T> for NestedField<T, S> {
    fn decode(&self, target: &mut T, _field: &FieldDescriptor, codec: &Codec<'_>, cursor: &mut ReadCursor<'_>) -> Result<()> {
        *(self.get_mut)(target) = decode::decode_from::<S>(codec, cursor)?;
        Ok(())
    }

    fn mutate(&self, target: &mut T, _field: &FieldDescriptor, codec: &Codec<'_>, cursor: &mut ReadCursor<'_>) -> Result<()> {
        mutate::mutate_from((self.get_mut)(target), codec, cursor)
    }

    fn encode(&self, source: &T, _field: &FieldDescriptor, codec: &Codec<'_>, cursor: &mut WriteCursor<'_>) -> Result<()> {
        encode::write_into((self.get)(source), codec, cursor)
    }

    fn verify(&self, source: &T, _field: &FieldDescriptor, codec: &Codec<'_>) -> Result<()> {
        encode::verify((self.get)(source), codec)
    }
}

pub(crate) struct NestedArrayField<T, S> {
    pub get: fn(&T) -> &Box<[S]>,
    pub get_mut: fn(&mut T) -> &mut Box<[S]>,
}

impl<T: Structure, S: Structure> FieldAccess<T> for NestedArrayField<T, S> {
    fn decode(&self, target: &mut T, field: &FieldDescriptor, codec: &Codec<'_>, cursor: &mut ReadCursor<'_>) -> Result<()> {
        let mut items = Vec::with_capacity(field.length);
        for _ in 0..field.length {
            items.push(decode::decode_from::<S>(codec, cursor)?);
        }
        *(self.get_mut)(target) = items.into_boxed_slice();
        Ok(())
    }

    fn mutate(&self, target: &mut T, field: &FieldDescriptor, codec: &Codec<'_>, cursor: &mut ReadCursor<'_>) -> Result<()> {
        let items = (self.get_mut)(target);
        ensure_length::<T>(field, items.len())?;
        for item in items.iter_mut() {
            mutate::mutate_from(item, codec, cursor)?;
        }
        Ok(())
    }

    fn encode(&self, source: &T, field: &FieldDescriptor, codec: &Codec<'_>, cursor: &mut WriteCursor<'_>) -> Result<()> {
        let items = (self.get)(source);
        ensure_length::<T>(field, items.len())?;
        for item in items.iter() {
            encode::write_into(item, codec, cursor)?;
        }
        Ok(())
    }

    fn verify(&self, source: &T, field: &FieldDescriptor, codec: &Codec<'_>) -> Result<()> {
        let items = (self.get)(source);
        ensure_length::<T>(field, items.len())?;
        items.iter().try_for_each(|item| encode::verify(item, codec))
    }
}

pub(crate) struct PaddingField;

impl<T: Structure> FieldAccess<T> for PaddingField {
    fn decode(&self, _target: &mut T, field: &FieldDescriptor, _codec: &Codec<'_>, cursor: &mut ReadCursor<'_>) -> Result<()> {
        cursor.skip(field.byte_len());
        Ok(())
    }

    fn mutate(&self, _target: &mut T, field: &FieldDescriptor, _codec: &Codec<'_>, cursor: &mut ReadCursor<'_>) -> Result<()> {
        cursor.skip(field.byte_len());
        Ok(())
    }

    fn encode(&self, _source: &T, field: &FieldDescriptor, codec: &Codec<'_>, cursor: &mut WriteCursor<'_>) -> Result<()> {
        let bytes = field.byte_len();
        match codec.config().padding {
            PaddingPolicy::Zero => {
                let written = io::copy(&mut io::Read::take(io::repeat(0), bytes as u64), cursor)?;
                if written != bytes as u64 {
                    return Err(Error::CodecError(format!(
                        "Padding field '{}' wrote {} of {} bytes",
                        field.name, written, bytes
                    )));
                }
            }
            PaddingPolicy::Preserve => cursor.skip(bytes),
        }
        Ok(())
    }

    fn verify(&self, _source: &T, _field: &FieldDescriptor, _codec: &Codec<'_>) -> Result<()> {
        Ok(())
    }
}

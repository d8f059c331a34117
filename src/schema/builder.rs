// Declarative schema builder for fixlayout structures
//
// A structure describes itself once, field by field, in native byte order.
// Each declaration pairs the field's layout metadata with direct projection
// functions that the codec calls positionally.

use std::any::TypeId;
use std::sync::Arc;

use crate::codec::access::{FieldAccess, NestedArrayField, NestedField, PaddingField, ScalarArrayField, ScalarField};
use crate::codec::primitive::Primitive;
use crate::internal::error::Result;
use crate::schema::resolver::LayoutRegistry;
use crate::schema::types::{ScalarKind, TypeLayout};

/// A composite type with a fixed native byte layout.
///
/// `describe` must declare every field in the exact order the native
/// counterpart stores them, including explicit padding. `Default` supplies
/// the blank instance the decoder fills in; every declared field is
/// overwritten during decoding, so default array lengths do not matter there.
///
/// ```ignore
/// #[derive(Default)]
/// struct Entry { offset: u32, size: u16, lang: u16 }
///
/// impl Structure for Entry {
///     const NAME: &'static str = "Entry";
///
///     fn describe(schema: &mut SchemaBuilder<Self>) {
///         schema
///             .scalar("offset", |e| &e.offset, |e| &mut e.offset)
///             .scalar("size", |e| &e.size, |e| &mut e.size)
///             .scalar("lang", |e| &e.lang, |e| &mut e.lang);
///     }
/// }
/// ```
pub trait Structure: Default + 'static {
    /// Name used in layouts and error messages.
    const NAME: &'static str;

    /// Declares the fields of the structure in byte order.
    fn describe(schema: &mut SchemaBuilder<Self>);
}

/// Reference from a field to the nested structure type it holds.
pub(crate) struct NestedRef {
    pub type_name: &'static str,
    pub type_id: TypeId,
    pub resolve: fn(&LayoutRegistry) -> Result<Arc<TypeLayout>>,
}

impl NestedRef {
    fn of<S: Structure>() -> Self {
        NestedRef {
            type_name: S::NAME,
            type_id: TypeId::of::<S>(),
            resolve: LayoutRegistry::resolve::<S>,
        }
    }
}

/// Declared shape of one field, before sizes are resolved.
pub(crate) enum DeclKind {
    Scalar(ScalarKind),
    Array(ScalarKind),
    Struct(NestedRef),
    StructArray(NestedRef),
    Padding,
}

/// One declared field: metadata plus accessor.
///
/// `length` is the element count for arrays, the byte count for padding and
/// 1 for everything else.
pub(crate) struct FieldDecl<T> {
    pub name: &'static str,
    pub kind: DeclKind,
    pub length: usize,
    pub access: Box<dyn FieldAccess<T>>,
}

/// Collects the field declarations of a structure.
pub struct SchemaBuilder<T> {
    fields: Vec<FieldDecl<T>>,
}

impl<T: Structure> SchemaBuilder<T> {
    pub(crate) fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub(crate) fn into_fields(self) -> Vec<FieldDecl<T>> {
        self.fields
    }

    fn push(&mut self, name: &'static str, kind: DeclKind, length: usize, access: Box<dyn FieldAccess<T>>) -> &mut Self {
        self.fields.push(FieldDecl { name, kind, length, access });
        self
    }

    /// Declares a single scalar field.
    pub fn scalar<P: Primitive>(&mut self, name: &'static str, get: fn(&T) -> &P, get_mut: fn(&mut T) -> &mut P) -> &mut Self {
        self.push(name, DeclKind::Scalar(P::KIND), 1, Box::new(ScalarField { get, get_mut }))
    }

    /// Declares a fixed-length scalar array field holding `length` elements.
    #[allow(clippy::borrowed_box)]
    pub fn array<P: Primitive>(
        &mut self,
        name: &'static str,
        length: usize,
        get: fn(&T) -> &Box<[P]>,
        get_mut: fn(&mut T) -> &mut Box<[P]>,
    ) -> &mut Self {
        self.push(name, DeclKind::Array(P::KIND), length, Box::new(ScalarArrayField { get, get_mut }))
    }

    /// Declares a field holding one nested structure.
    pub fn nested<S: Structure>(&mut self, name: &'static str, get: fn(&T) -> &S, get_mut: fn(&mut T) -> &mut S) -> &mut Self {
        self.push(name, DeclKind::Struct(NestedRef::of::<S>()), 1, Box::new(NestedField { get, get_mut }))
    }

    /// Declares a fixed-length array of nested structures.
    #[allow(clippy::borrowed_box)]
    pub fn nested_array<S: Structure>(
        &mut self,
        name: &'static str,
        length: usize,
        get: fn(&T) -> &Box<[S]>,
        get_mut: fn(&mut T) -> &mut Box<[S]>,
    ) -> &mut Self {
        self.push(name, DeclKind::StructArray(NestedRef::of::<S>()), length, Box::new(NestedArrayField { get, get_mut }))
    }

    /// Declares `bytes` bytes of padding with no represented value.
    pub fn padding(&mut self, name: &'static str, bytes: usize) -> &mut Self {
        self.push(name, DeclKind::Padding, bytes, Box::new(PaddingField))
    }
}

/// Allocates a zeroed fixed-length array for a `Default` implementation.
pub fn fixed_array<E: Clone + Default>(length: usize) -> Box<[E]> {
    vec![E::default(); length].into_boxed_slice()
}

// Layout resolution and the per-type layout cache
//
// A structure's layout is computed from its declarations the first time any
// codec call needs it and is published to an RCU snapshot map. Later calls
// from any thread read the snapshot without contention.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use log::{debug, trace};

use crate::codec::access::FieldAccess;
use crate::codec::rcu::Rcu;
use crate::internal::error::{Error, Result};
use crate::schema::builder::{DeclKind, NestedRef, SchemaBuilder, Structure};
use crate::schema::types::{FieldDescriptor, FieldKind, TypeLayout};
use crate::schema::validator;

type CacheEntry = Arc<dyn Any + Send + Sync>;

lazy_static! {
    static ref GLOBAL_REGISTRY: LayoutRegistry = LayoutRegistry::new();
}

thread_local! {
    // Types whose layouts are being built on this thread, outermost first.
    static RESOLVING: RefCell<Vec<TypeId>> = RefCell::new(Vec::new());
}

/// Cache of resolved layouts keyed by structure type.
///
/// At most one layout per type is ever published. Schema errors are not
/// cached, so a failing type fails again on every call.
pub struct LayoutRegistry {
    entries: Rcu<HashMap<TypeId, CacheEntry>>,
}

impl LayoutRegistry {
    /// Creates an empty registry, independent of the global one.
    pub fn new() -> Self {
        LayoutRegistry { entries: Rcu::new(HashMap::new()) }
    }

    /// The process-wide registry used by `Codec::new` and the free functions.
    pub fn global() -> &'static LayoutRegistry {
        &GLOBAL_REGISTRY
    }

    /// Resolves the layout of `T`, computing and caching it on first use.
    ///
    /// Repeated calls return the same `Arc`.
    pub fn resolve<T: Structure>(&self) -> Result<Arc<TypeLayout>> {
        Ok(Arc::clone(&self.binding::<T>()?.layout))
    }

    /// Returns true if the layout of `T` has already been published.
    pub fn is_resolved<T: Structure>(&self) -> bool {
        self.entries.read().contains_key(&TypeId::of::<T>())
    }

    /// Number of cached layouts.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if no layout has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn binding<T: Structure>(&self) -> Result<Arc<Binding<T>>> {
        let key = TypeId::of::<T>();
        if let Some(entry) = self.entries.read().get(&key) {
            trace!("Layout cache hit for {}", T::NAME);
            return downcast::<T>(Arc::clone(entry));
        }

        // Built outside the writer lock: nested types resolve through this same path.
        let built: CacheEntry = Arc::new(Binding::<T>::build(self)?);

        let published = self.entries.copy_update(|entries| {
            if let Some(existing) = entries.get(&key) {
                debug!("{} was resolved concurrently, discarding the duplicate layout", T::NAME);
                return (None, Arc::clone(existing));
            }
            let mut next = entries.clone();
            next.insert(key, Arc::clone(&built));
            (Some(next), built)
        });

        let binding = downcast::<T>(published)?;
        debug!(
            "Resolved layout {} ({} fields, 0x{:X} bytes)",
            T::NAME,
            binding.layout.fields().len(),
            binding.layout.total_size()
        );
        Ok(binding)
    }
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        LayoutRegistry::new()
    }
}

impl fmt::Debug for LayoutRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutRegistry").field("resolved", &self.len()).finish()
    }
}

fn downcast<T: Structure>(entry: CacheEntry) -> Result<Arc<Binding<T>>> {
    entry
        .downcast::<Binding<T>>()
        .map_err(|_| Error::CodecError(format!("Layout cache entry for {} has an unexpected type", T::NAME)))
}

/// A resolved layout together with the accessors of its fields, in the same order.
pub(crate) struct Binding<T> {
    pub layout: Arc<TypeLayout>,
    access: Vec<Box<dyn FieldAccess<T>>>,
}

impl<T: Structure> Binding<T> {
    /// Fields paired with their accessors in byte order.
    #[allow(clippy::borrowed_box)]
    pub fn fields(&self) -> impl Iterator<Item = (&FieldDescriptor, &Box<dyn FieldAccess<T>>)> + '_ {
        self.layout.fields().iter().zip(self.access.iter())
    }

    fn build(registry: &LayoutRegistry) -> Result<Self> {
        let _guard = ResolvingGuard::enter::<T>()?;

        let mut schema = SchemaBuilder::<T>::new();
        T::describe(&mut schema);
        let decls = schema.into_fields();
        validator::validate_declarations(&decls)?;

        let mut fields = Vec::with_capacity(decls.len());
        let mut access = Vec::with_capacity(decls.len());
        let mut offset = 0usize;

        for decl in decls {
            let (kind, size, length) = match decl.kind {
                DeclKind::Scalar(kind) => (FieldKind::Scalar(kind), kind.size(), 1),
                DeclKind::Array(kind) => (FieldKind::Array(kind), kind.size(), decl.length),
                DeclKind::Struct(nested) => {
                    let layout = resolve_nested::<T>(registry, decl.name, &nested)?;
                    let size = layout.total_size();
                    (FieldKind::Struct(layout), size, 1)
                }
                DeclKind::StructArray(nested) => {
                    let layout = resolve_nested::<T>(registry, decl.name, &nested)?;
                    let size = layout.total_size();
                    (FieldKind::StructArray(layout), size, decl.length)
                }
                DeclKind::Padding => (FieldKind::Padding, decl.length, 1),
            };

            let bytes = size
                .checked_mul(length)
                .ok_or_else(|| Error::schema(T::NAME, format!("field '{}' is too large", decl.name)))?;
            fields.push(FieldDescriptor { name: decl.name, kind, size, length, offset });
            offset = offset
                .checked_add(bytes)
                .ok_or_else(|| Error::schema(T::NAME, format!("structure overflows at field '{}'", decl.name)))?;
            access.push(decl.access);
        }

        Ok(Binding {
            layout: Arc::new(TypeLayout::new(T::NAME, fields, offset)),
            access,
        })
    }
}

fn resolve_nested<T: Structure>(registry: &LayoutRegistry, field: &'static str, nested: &NestedRef) -> Result<Arc<TypeLayout>> {
    (nested.resolve)(registry)
        .map_err(|err| Error::schema(T::NAME, format!("field '{}' of type {}: {}", field, nested.type_name, err)))
}

const RECURSIVE: &str = "recursive structure";

/// Marks a type as being resolved on this thread for as long as it lives.
struct ResolvingGuard;

impl ResolvingGuard {
    fn enter<T: Structure>() -> Result<Self> {
        let id = TypeId::of::<T>();
        RESOLVING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.contains(&id) {
                return Err(Error::schema(T::NAME, RECURSIVE));
            }
            stack.push(id);
            Ok(ResolvingGuard)
        })
    }
}

impl Drop for ResolvingGuard {
    fn drop(&mut self) {
        RESOLVING.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

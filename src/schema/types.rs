// Layout type system for fixlayout
//
// This module defines the resolved, immutable description of a structure's
// byte layout: which fields it has, in which order, and how many bytes each
// one occupies.

use std::fmt;
use std::sync::Arc;

/// The fixed-width scalar kinds a field can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// One byte, zero is false
    Bool,
    /// 8-bit unsigned integer
    U8,
    /// 16-bit unsigned integer
    U16,
    /// UTF-16 code unit
    Char,
    /// 32-bit unsigned integer
    U32,
    /// 64-bit unsigned integer
    U64,
    /// 32-bit floating point (IEEE 754)
    F32,
    /// 64-bit floating point (IEEE 754)
    F64,
}

impl ScalarKind {
    /// Width of one value of this kind in bytes.
    pub const fn size(self) -> usize {
        match self {
            ScalarKind::Bool | ScalarKind::U8 => 1,
            ScalarKind::U16 | ScalarKind::Char => 2,
            ScalarKind::U32 | ScalarKind::F32 => 4,
            ScalarKind::U64 | ScalarKind::F64 => 8,
        }
    }

    /// Short name used when printing layouts.
    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::Char => "char16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a resolved field holds.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// A single scalar
    Scalar(ScalarKind),
    /// A fixed-length run of scalars
    Array(ScalarKind),
    /// A single nested structure
    Struct(Arc<TypeLayout>),
    /// A fixed-length run of nested structures
    StructArray(Arc<TypeLayout>),
    /// Bytes with no represented value
    Padding,
}

impl FieldKind {
    /// Returns true if the field stores a fixed-length container
    pub fn is_array(&self) -> bool {
        matches!(self, FieldKind::Array(_) | FieldKind::StructArray(_))
    }

    /// Returns the nested layout for structure-valued fields
    pub fn nested(&self) -> Option<&Arc<TypeLayout>> {
        match self {
            FieldKind::Struct(layout) | FieldKind::StructArray(layout) => Some(layout),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar(kind) => write!(f, "{}", kind),
            FieldKind::Array(kind) => write!(f, "[{}]", kind),
            FieldKind::Struct(layout) => write!(f, "{}", layout.name()),
            FieldKind::StructArray(layout) => write!(f, "[{}]", layout.name()),
            FieldKind::Padding => write!(f, "padding"),
        }
    }
}

/// One resolved field of a structure.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Declared field name
    pub name: &'static str,
    /// What the field holds
    pub kind: FieldKind,
    /// Bytes per element (the padding width for padding fields)
    pub size: usize,
    /// Number of elements (1 for everything except arrays)
    pub length: usize,
    /// Byte offset from the start of the enclosing structure
    pub offset: usize,
}

impl FieldDescriptor {
    /// Total bytes occupied by the field.
    pub fn byte_len(&self) -> usize {
        self.size * self.length
    }
}

/// The resolved byte layout of one structure type.
///
/// Field order is the declared order and is never rearranged. A layout is
/// built once by the registry and shared immutably afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeLayout {
    name: &'static str,
    fields: Vec<FieldDescriptor>,
    total_size: usize,
}

impl TypeLayout {
    pub(crate) fn new(name: &'static str, fields: Vec<FieldDescriptor>, total_size: usize) -> Self {
        Self { name, fields, total_size }
    }

    /// Name of the structure this layout describes.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fields in declared (and byte) order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Total encoded size in bytes.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// Looks up a field by its declared name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Resolves a dotted path such as `common.text_max_length` to its absolute offset.
    pub fn offset_of(&self, path: &str) -> Option<usize> {
        let mut layout = self;
        let mut base = 0;
        let mut parts = path.split('.').peekable();
        while let Some(part) = parts.next() {
            let field = layout.field(part)?;
            base += field.offset;
            if parts.peek().is_none() {
                return Some(base);
            }
            layout = match &field.kind {
                FieldKind::Struct(nested) => nested,
                _ => return None,
            };
        }
        None
    }
}

impl fmt::Display for TypeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (0x{:X} bytes)", self.name, self.total_size)?;
        for field in &self.fields {
            let kind = field.kind.to_string();
            if field.kind.is_array() {
                writeln!(
                    f,
                    "  0x{:04X}  {:>6}  {:<24} {} x{}",
                    field.offset, field.byte_len(), kind, field.name, field.length
                )?;
            } else {
                writeln!(f, "  0x{:04X}  {:>6}  {:<24} {}", field.offset, field.byte_len(), kind, field.name)?;
            }
        }
        Ok(())
    }
}

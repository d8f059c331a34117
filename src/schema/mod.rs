// Schema module for fixlayout structures
//
// This module provides the declaration side of the codec:
//
// 1. The layout type system (scalar kinds, field descriptors, layouts)
// 2. The `Structure` trait and its declaration builder
// 3. Declaration validation
// 4. Layout resolution and the per-type cache

// Re-export public types and functions
pub use self::builder::{fixed_array, SchemaBuilder, Structure};
pub use self::resolver::LayoutRegistry;
pub use self::types::{FieldDescriptor, FieldKind, ScalarKind, TypeLayout};

// Sub-modules
pub mod builder;
pub mod resolver;
pub mod types;
pub(crate) mod validator;

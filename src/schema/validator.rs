// Schema validator for fixlayout
//
// Checks a structure's declarations before any size is computed. Everything
// reported here is a defect in the declaration, not in the data.

use std::any::TypeId;
use std::collections::HashSet;

use crate::internal::error::{Error, Result};
use crate::schema::builder::{DeclKind, FieldDecl, Structure};

/// Validates the declarations of `T` in declared order, reporting the first problem.
pub(crate) fn validate_declarations<T: Structure>(decls: &[FieldDecl<T>]) -> Result<()> {
    if decls.is_empty() {
        return Err(Error::schema(T::NAME, "structure declares no fields"));
    }

    let mut seen = HashSet::with_capacity(decls.len());
    for (index, decl) in decls.iter().enumerate() {
        if decl.name.is_empty() {
            return Err(Error::schema(T::NAME, format!("field #{} has an empty name", index)));
        }
        if !seen.insert(decl.name) {
            return Err(Error::schema(T::NAME, format!("duplicate field name '{}'", decl.name)));
        }

        match &decl.kind {
            DeclKind::Array(_) | DeclKind::StructArray(_) if decl.length == 0 => {
                return Err(Error::schema(T::NAME, format!("array field '{}' has no length", decl.name)));
            }
            DeclKind::Padding if decl.length == 0 => {
                return Err(Error::schema(T::NAME, format!("padding field '{}' has no size", decl.name)));
            }
            _ => {}
        }

        if let DeclKind::Struct(nested) | DeclKind::StructArray(nested) = &decl.kind {
            if nested.type_id == TypeId::of::<T>() {
                return Err(Error::schema(
                    T::NAME,
                    format!("recursive structure: field '{}' holds {} itself", decl.name, nested.type_name),
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::builder::SchemaBuilder;

    #[derive(Default)]
    struct Probe {
        a: u32,
        b: Box<[u16]>,
        children: Box<[Probe]>,
    }

    impl Structure for Probe {
        const NAME: &'static str = "Probe";

        fn describe(schema: &mut SchemaBuilder<Self>) {
            schema.scalar("a", |p| &p.a, |p| &mut p.a);
        }
    }

    fn reason_of(result: Result<()>) -> String {
        match result {
            Err(Error::SchemaError { type_name, reason }) => {
                assert_eq!(type_name, "Probe");
                reason
            }
            other => panic!("expected a schema error, got {:?}", other),
        }
    }

    fn check(build: impl FnOnce(&mut SchemaBuilder<Probe>)) -> Result<()> {
        let mut schema = SchemaBuilder::new();
        build(&mut schema);
        validate_declarations(&schema.into_fields())
    }

    #[test]
    fn test_valid_declarations() {
        assert!(check(|s| {
            s.scalar("a", |p| &p.a, |p| &mut p.a)
                .padding("_pad", 2)
                .array("b", 4, |p| &p.b, |p| &mut p.b);
        })
        .is_ok());
    }

    #[test]
    fn test_empty_structure() {
        assert!(reason_of(check(|_| {})).contains("no fields"));
    }

    #[test]
    fn test_missing_sizes() {
        assert!(reason_of(check(|s| {
            s.array("b", 0, |p| &p.b, |p| &mut p.b);
        }))
        .contains("has no length"));
        assert!(reason_of(check(|s| {
            s.padding("_pad", 0);
        }))
        .contains("has no size"));
    }

    #[test]
    fn test_duplicate_names() {
        assert!(reason_of(check(|s| {
            s.scalar("a", |p| &p.a, |p| &mut p.a).padding("a", 4);
        }))
        .contains("duplicate field name 'a'"));
    }

    #[test]
    fn test_direct_self_nesting() {
        assert!(reason_of(check(|s| {
            s.nested_array("children", 1, |p| &p.children, |p| &mut p.children);
        }))
        .starts_with("recursive structure"));
    }
}

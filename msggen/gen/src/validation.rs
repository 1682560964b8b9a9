//! Validation module for service models.
//!
//! This module provides pre-generation validation so that structural
//! problems in the model surface as a named error before any code is
//! rendered.
//!
//! ## Validation Checks
//!
//! - **Method names**: unique, and usable as enum variant names
//! - **Path uniqueness**: no two fields of the same request (or response)
//!   tree share a path, since paths are the override table's join key
//! - **Name uniqueness**: no two fields of a composite, and no two variants
//!   of an enum, normalize to the same identifier
//! - **Type names**: every Composite and Enum carries a non-empty type name
//! - **Array dimensions**: at least one
//!
//! Paths are checked per tree, not per service. A method's request and
//! response share the root path (`ListPeers`), so a path can legitimately
//! appear in both trees, and an override keyed on it applies to both.
//!
//! ## Examples
//!
//! ```
//! use msggen_model::services::lightning::define_lightning_service;
//! use msggen_gen::validation::validate_service;
//!
//! assert!(validate_service(&define_lightning_service()).is_ok());
//! ```

use std::collections::{HashMap, HashSet};

use msggen_model::{CompositeField, Field, Service};

use crate::errors::GeneratorError;
use crate::naming::{normalize_variant, normalize_varname};

/// Validates a service before code generation.
///
/// ## Errors
///
/// Returns the first violation found, in method order:
/// - `GeneratorError::DuplicateMethod` if two methods share a name
/// - `GeneratorError::InvalidIdentifier` if a method name is not an identifier
/// - `GeneratorError::InvalidModel` for an empty type name, a zero-dimensional
///   array, or two names that normalize to the same identifier
/// - `GeneratorError::DuplicatePath` if a path repeats within one tree
pub fn validate_service(service: &Service) -> Result<(), GeneratorError> {
    let mut names = HashSet::new();

    for method in &service.methods {
        if syn::parse_str::<syn::Ident>(&method.name).is_err() {
            return Err(GeneratorError::InvalidIdentifier {
                name: method.name.clone(),
                path: method.name.clone(),
                reason: "method names must be valid Rust identifiers".to_string(),
            });
        }
        if !names.insert(method.name.as_str()) {
            return Err(GeneratorError::DuplicateMethod {
                name: method.name.clone(),
            });
        }

        validate_tree(&method.request, &format!("{} request", method.name))?;
        validate_tree(&method.response, &format!("{} response", method.name))?;
    }

    Ok(())
}

fn validate_tree(root: &CompositeField, scope: &str) -> Result<(), GeneratorError> {
    check_typename(&root.typename, &root.path)?;
    check_field_names(root)?;

    let mut seen = HashSet::new();
    seen.insert(root.path.as_str());
    for child in &root.fields {
        collect_paths(child, scope, &mut seen, true)?;
    }
    Ok(())
}

/// Records `field`'s path (unless it is an array item, which shares its
/// array's path) and descends.
fn collect_paths<'a>(
    field: &'a Field,
    scope: &str,
    seen: &mut HashSet<&'a str>,
    record: bool,
) -> Result<(), GeneratorError> {
    if record && !seen.insert(field.path()) {
        return Err(GeneratorError::DuplicatePath {
            path: field.path().to_string(),
            scope: scope.to_string(),
        });
    }

    match field {
        Field::Primitive(_) => Ok(()),
        Field::Enum(e) => {
            check_typename(&e.typename, &e.path)?;
            check_unique(
                &e.path,
                "variant",
                e.defined_variants().map(|(_, v)| (v, normalize_variant(v))),
            )
        }
        Field::Array(a) => {
            if a.dims == 0 {
                return Err(GeneratorError::InvalidModel {
                    path: a.path.clone(),
                    reason: "array must have at least one dimension".to_string(),
                });
            }
            collect_paths(&a.itemtype, scope, seen, false)
        }
        Field::Composite(c) => {
            check_typename(&c.typename, &c.path)?;
            check_field_names(c)?;
            for child in &c.fields {
                collect_paths(child, scope, seen, true)?;
            }
            Ok(())
        }
    }
}

fn check_field_names(c: &CompositeField) -> Result<(), GeneratorError> {
    check_unique(
        &c.path,
        "field",
        c.fields.iter().map(|f| (f.name(), normalize_varname(f.name()))),
    )
}

/// Fails if two raw names map to the same normalized identifier.
fn check_unique<'a>(
    path: &str,
    what: &str,
    names: impl Iterator<Item = (&'a str, String)>,
) -> Result<(), GeneratorError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for (raw, normalized) in names {
        if let Some(first) = seen.insert(normalized.clone(), raw) {
            return Err(GeneratorError::InvalidModel {
                path: path.to_string(),
                reason: format!(
                    "{what} names '{first}' and '{raw}' both normalize to '{normalized}'"
                ),
            });
        }
    }
    Ok(())
}

fn check_typename(typename: &str, path: &str) -> Result<(), GeneratorError> {
    if typename.trim().is_empty() {
        return Err(GeneratorError::InvalidModel {
            path: path.to_string(),
            reason: "type name is empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{make_listpeers_example, make_method, make_service};
    use msggen_model::{ArrayField, EnumField, Method, PrimitiveField};

    #[test]
    fn valid_service_passes() {
        let service = make_service(&["Getinfo", "ListPeers", "ListFunds"]);
        assert!(validate_service(&service).is_ok());
    }

    #[test]
    fn empty_service_passes() {
        assert!(validate_service(&Service::default()).is_ok());
    }

    #[test]
    fn nested_arrays_share_item_paths() {
        let request = CompositeField::new("ListPeers", "ListPeers", "ListpeersRequest");
        let service = Service::new(vec![Method::new(
            "ListPeers",
            request,
            make_listpeers_example(),
        )]);
        assert!(validate_service(&service).is_ok());
    }

    #[test]
    fn duplicate_method_is_rejected() {
        let service = make_service(&["Getinfo", "Getinfo"]);
        match validate_service(&service) {
            Err(GeneratorError::DuplicateMethod { name }) => assert_eq!(name, "Getinfo"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn invalid_method_name_is_rejected() {
        let service = make_service(&["list-peers"]);
        assert!(matches!(
            validate_service(&service),
            Err(GeneratorError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn duplicate_path_is_rejected() {
        let mut method = make_method("Getinfo");
        method.response = method
            .response
            .with_field(PrimitiveField::new("Getinfo.value", "value2", "string"));
        let service = Service::new(vec![method]);

        match validate_service(&service) {
            Err(GeneratorError::DuplicatePath { path, scope }) => {
                assert_eq!(path, "Getinfo.value");
                assert_eq!(scope, "Getinfo response");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn same_path_in_request_and_response_is_allowed() {
        let mut method = make_method("Getinfo");
        method.request = method
            .request
            .with_field(PrimitiveField::new("Getinfo.value", "value", "number"));
        assert!(validate_service(&Service::new(vec![method])).is_ok());
    }

    #[test]
    fn empty_enum_typename_is_rejected() {
        let mut method = make_method("Getinfo");
        method.response = method.response.with_field(EnumField::new(
            "Getinfo.state",
            "state",
            "",
            [Some("A")],
        ));

        match validate_service(&Service::new(vec![method])) {
            Err(GeneratorError::InvalidModel { path, .. }) => assert_eq!(path, "Getinfo.state"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn zero_dimensional_array_is_rejected() {
        let mut method = make_method("Getinfo");
        method.response = method.response.with_field(
            ArrayField::new(
                "Getinfo.ids[]",
                "ids",
                PrimitiveField::new("Getinfo.ids[]", "ids", "string"),
            )
            .with_dims(0),
        );

        assert!(matches!(
            validate_service(&Service::new(vec![method])),
            Err(GeneratorError::InvalidModel { .. })
        ));
    }

    #[test]
    fn colliding_field_names_are_rejected() {
        let mut method = make_method("Getinfo");
        method.response = method
            .response
            .with_field(PrimitiveField::new("Getinfo.short-channel-id", "short-channel-id", "string"))
            .with_field(PrimitiveField::new("Getinfo.short_channel_id", "short_channel_id", "string"));

        match validate_service(&Service::new(vec![method])) {
            Err(GeneratorError::InvalidModel { path, reason }) => {
                assert_eq!(path, "Getinfo");
                assert!(reason.contains("'short-channel-id'"));
                assert!(reason.contains("'short_channel_id'"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn colliding_nested_field_names_are_rejected() {
        let peer = CompositeField::new("Getinfo.peer", "peer", "GetinfoPeer")
            .with_field(PrimitiveField::new("Getinfo.peer.nodeId", "nodeId", "pubkey"))
            .with_field(PrimitiveField::new("Getinfo.peer.node_id", "node_id", "pubkey"));
        let mut method = make_method("Getinfo");
        method.response = method.response.with_field(peer);

        match validate_service(&Service::new(vec![method])) {
            Err(GeneratorError::InvalidModel { path, .. }) => assert_eq!(path, "Getinfo.peer"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn colliding_variant_names_are_rejected() {
        let mut method = make_method("Getinfo");
        method.response = method.response.with_field(EnumField::new(
            "Getinfo.kind",
            "kind",
            "GetinfoKind",
            [Some("a b"), None, Some("a_b")],
        ));

        match validate_service(&Service::new(vec![method])) {
            Err(GeneratorError::InvalidModel { path, reason }) => {
                assert_eq!(path, "Getinfo.kind");
                assert!(reason.contains("'a_b'"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}

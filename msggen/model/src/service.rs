//! Methods and services.

use serde::{Deserialize, Serialize};

use crate::field::CompositeField;

/// A single RPC method with its request and response shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    /// Method name, used as the dispatch variant name (e.g. "ListPeers").
    pub name: String,
    pub request: CompositeField,
    pub response: CompositeField,
}

impl Method {
    pub fn new(name: impl Into<String>, request: CompositeField, response: CompositeField) -> Self {
        Self {
            name: name.into(),
            request,
            response,
        }
    }
}

/// An ordered collection of methods.
///
/// Method order is preserved in every generated section.
///
/// ## Examples
///
/// ```
/// use msggen_model::{CompositeField, Method, Service};
///
/// let service = Service::new(vec![Method::new(
///     "Getinfo",
///     CompositeField::new("Getinfo", "Getinfo", "GetinfoRequest"),
///     CompositeField::new("Getinfo", "Getinfo", "GetinfoResponse"),
/// )]);
/// assert_eq!(service.methods.len(), 1);
/// assert!(service.method("Getinfo").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl Service {
    pub fn new(methods: Vec<Method>) -> Self {
        Self { methods }
    }

    /// Looks up a method by name.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }
}

//! msggen Field Model
//!
//! In-memory representation of an RPC interface: a [`Service`] is an
//! ordered list of [`Method`]s, and each method has a request and a
//! response [`CompositeField`] tree. These trees are consumed by the
//! `msggen` generator to emit Rust type declarations.
//!
//! ## Core Types
//!
//! - [`Field`] - Closed sum over the four field kinds
//! - [`PrimitiveField`] - Scalar leaf with a schema type name
//! - [`EnumField`] - Leaf with positional symbolic variants
//! - [`ArrayField`] - Sequence of a nested field, `dims` levels deep
//! - [`CompositeField`] - Object with ordered child fields
//! - [`Method`] / [`Service`] - The RPC surface
//!
//! ## Examples
//!
//! ```
//! use msggen_model::{ArrayField, CompositeField, Method, PrimitiveField, Service};
//!
//! let response = CompositeField::new("ListPeers", "ListPeers", "ListpeersResponse").with_field(
//!     ArrayField::new(
//!         "ListPeers.peers[]",
//!         "peers",
//!         CompositeField::new("ListPeers.peers[]", "peers", "ListpeersPeers")
//!             .with_field(PrimitiveField::new("ListPeers.peers[].id", "id", "pubkey")),
//!     ),
//! );
//! let request = CompositeField::new("ListPeers", "ListPeers", "ListpeersRequest");
//!
//! let service = Service::new(vec![Method::new("ListPeers", request, response)]);
//! assert_eq!(service.methods[0].response.fields.len(), 1);
//! ```
//!
//! The tree is built once and treated as read-only by the generator.

pub mod field;
pub mod service;
pub mod services;

pub use field::{ArrayField, CompositeField, EnumField, Field, FieldKind, PrimitiveField};
pub use service::{Method, Service};

//! msggen code generator library.
//!
//! This crate turns a service field model from `msggen-model` into Rust
//! declarations. The generated file includes:
//!
//! - A struct per Composite and an enum per Enum field, with serde
//!   attributes preserving the wire names
//! - A positional `TryFrom<i32>` conversion for every enum
//! - `Request`/`Response` dispatch enums tagged by method name
//! - `requests` and `responses` modules holding every method's payload types
//!
//! ## Modules
//!
//! - [`naming`] - Field name normalization and identifier escaping
//! - [`typemap`] - Primitive typemap and path-keyed overrides
//! - [`codegen`] - Tree rendering and token generation
//! - [`validation`] - Pre-generation model checks
//! - [`input`] - Loading serialized service models
//! - [`output`] - Final assembly, validation, and file writing
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use msggen_model::services::lightning::define_lightning_service;
//! use msggen_gen::output::generate_and_write;
//! use msggen_gen::typemap::TypeMapper;
//!
//! let service = define_lightning_service();
//! let mapper = TypeMapper::rust();
//!
//! // Generate code (dry_run=true prints instead of writing)
//! let code = generate_and_write(&service, &mapper, Path::new("src/model.rs"), "msggen", true).unwrap();
//! println!("{}", code);
//! ```

pub mod codegen;
pub mod errors;
pub mod input;
pub mod naming;
pub mod output;
pub mod typemap;
pub mod validation;

#[cfg(test)]
mod test_utils;

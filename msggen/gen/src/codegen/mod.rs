//! Code generation modules for msggen.
//!
//! Generation is split into a tree walk and a formatting pass:
//!
//! - [`render`] - Walks a field tree and produces the [`decl`] intermediate
//! - [`decl`] - Declarations and field fragments, free of Rust syntax
//! - [`tokens`] - Turns declarations into Rust tokens
//! - [`dispatch`] - Generates the `Request`/`Response` dispatch enums
//!
//! ## Output Format
//!
//! All token generators return `proc_macro2::TokenStream`, which is then:
//! - Validated with `syn::parse2` to ensure correctness
//! - Formatted with `prettyplease` for consistent style
//!
//! See [`crate::output`] for the assembly and file writing logic.

pub mod decl;
pub mod dispatch;
pub mod render;
pub mod tokens;

pub use decl::{Declaration, EnumDecl, FieldFragment, Rendered, StructDecl, TypeExpr, VariantDecl};
pub use dispatch::{Direction, generate_dispatch_enum};
pub use render::Renderer;
pub use tokens::declaration_tokens;

//! Output assembly and file writing for generated code.
//!
//! This module handles the final phase of code generation: assembling all
//! generated pieces of a service into one Rust file, validating the output,
//! formatting it, and writing it to disk atomically.
//!
//! ## Output Structure
//!
//! ```text
//! #![allow(non_camel_case_types)]
//! //! <provenance header>
//! use serde::{Deserialize, Serialize};
//! pub use requests::*;
//! pub use responses::*;
//!
//! pub enum Request { ... }      // one variant per method
//! pub enum Response { ... }     // one variant per method
//!
//! pub mod requests { ... }      // request declarations, method order
//! pub mod responses { ... }     // response declarations, method order
//! ```
//!
//! Both sections import `crate::primitives::*`, where the hand-written types
//! named by the override table and the typemap (`Amount`, `ChannelState`,
//! ...) are expected to live.
//!
//! ## Safety Guarantees
//!
//! - **Validation**: All generated code is validated with `syn` before writing
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **Atomic writes**: Uses temp file + rename pattern to prevent partial writes

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use msggen_model::{CompositeField, Service};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use tracing::{debug, info, warn};

use crate::codegen::{Direction, Renderer, declaration_tokens, generate_dispatch_enum};
use crate::errors::GeneratorError;
use crate::typemap::TypeMapper;
use crate::validation::validate_service;

/// Returns the provenance header lines, as inner doc comment text.
///
/// The header is informational only and is never parsed back.
pub fn provenance_lines(invocation: &str) -> Vec<String> {
    [
        " This file was automatically generated using the following command:",
        "",
        " ```bash",
        format!(" {invocation}").as_str(),
        " ```",
        "",
        " Do not edit this file, it'll be overwritten. Rather edit the schema that",
        " this file was generated from",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Assembles the `requests` or `responses` section.
///
/// Each method's payload composite is rendered in method order, nested
/// declarations first.
///
/// ## Errors
///
/// Propagates rendering errors, e.g. `GeneratorError::SuppressedRequiredField`
/// or `GeneratorError::OverriddenPayload` for a payload the override table
/// targets.
pub fn assemble_section(
    service: &Service,
    mapper: &TypeMapper,
    direction: Direction,
) -> Result<TokenStream, GeneratorError> {
    let renderer = Renderer::new(mapper);
    let mut declarations = Vec::new();

    for method in &service.methods {
        let rendered = renderer.render_payload(direction.composite(method))?;
        debug!(
            method = %method.name,
            section = direction.module(),
            declarations = rendered.declarations.len(),
            "Rendered method payload"
        );
        for decl in &rendered.declarations {
            declarations.push(declaration_tokens(decl)?);
        }
    }

    let module = Ident::new(direction.module(), Span::call_site());
    Ok(quote! {
        pub mod #module {
            #[allow(unused_imports)]
            use crate::primitives::*;
            #[allow(unused_imports)]
            use serde::{Deserialize, Serialize};

            #(#declarations)*
        }
    })
}

/// Assembles the complete file for a service.
///
/// ## Errors
///
/// Returns an error if any method or field cannot be rendered.
pub fn assemble_service(
    service: &Service,
    mapper: &TypeMapper,
    invocation: &str,
) -> Result<TokenStream, GeneratorError> {
    let header = provenance_lines(invocation);
    let request_enum = generate_dispatch_enum(service, Direction::Request)?;
    let response_enum = generate_dispatch_enum(service, Direction::Response)?;
    let requests = assemble_section(service, mapper, Direction::Request)?;
    let responses = assemble_section(service, mapper, Direction::Response)?;

    Ok(quote! {
        #![allow(non_camel_case_types)]
        #(#![doc = #header])*

        use serde::{Deserialize, Serialize};
        pub use requests::*;
        pub use responses::*;

        #request_enum
        #response_enum
        #requests
        #responses
    })
}

/// Validates generated code by parsing it with syn.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats generated code using prettyplease.
pub fn format_code(file: &syn::File) -> String {
    prettyplease::unparse(file)
}

/// Validates, renders and formats a service.
///
/// `invocation` is recorded in the provenance header. Output is identical
/// across runs for the same service, mapper and invocation.
///
/// ## Errors
///
/// Returns an error if:
/// - The service fails validation
/// - A field cannot be rendered
/// - Code generation produces invalid Rust
pub fn generate(
    service: &Service,
    mapper: &TypeMapper,
    invocation: &str,
) -> Result<String, GeneratorError> {
    validate_service(service)?;
    warn_dead_overrides(service, mapper);

    let tokens = assemble_service(service, mapper, invocation)?;
    let file = validate_code(&tokens)?;
    Ok(format_code(&file))
}

/// Writes content to a file atomically using temp file + rename.
///
/// Creates parent directories if they don't exist.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if:
/// - Parent directory creation fails
/// - Writing to temp file fails
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Generates the service file and writes it to `output_path`.
///
/// With `dry_run` the code is printed instead of written.
///
/// ## Returns
///
/// The formatted code.
///
/// ## Errors
///
/// Returns an error if generation or file writing fails. Nothing is
/// written when generation fails.
pub fn generate_and_write(
    service: &Service,
    mapper: &TypeMapper,
    output_path: &Path,
    invocation: &str,
    dry_run: bool,
) -> Result<String, GeneratorError> {
    let code = generate(service, mapper, invocation)?;

    if dry_run {
        println!("=== {} ===\n{}\n", output_path.display(), code);
    } else {
        write_atomic(output_path, &code)?;
        info!(path = %output_path.display(), bytes = code.len(), "Wrote generated code");
    }

    Ok(code)
}

/// Logs every override key that matches no path of the service.
fn warn_dead_overrides(service: &Service, mapper: &TypeMapper) {
    let mut paths = HashSet::new();
    for method in &service.methods {
        collect_paths(&method.request, &mut paths);
        collect_paths(&method.response, &mut paths);
    }

    for path in mapper.override_paths() {
        if !paths.contains(path) {
            warn!(path, "Override matches no field path");
        }
    }
}

fn collect_paths<'a>(root: &'a CompositeField, paths: &mut HashSet<&'a str>) {
    paths.insert(root.path.as_str());
    for child in &root.fields {
        child.walk(&mut |f| {
            paths.insert(f.path());
        });
    }
}

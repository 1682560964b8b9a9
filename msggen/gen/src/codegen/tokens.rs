//! Token generation for rendered declarations.
//!
//! Turns the [`decl`](super::decl) intermediate into `proc_macro2` tokens.
//! Identifiers and type names are checked here, so an unusable schema name
//! surfaces as a [`GeneratorError`] rather than as a `quote!` panic.

use proc_macro2::{Ident, Literal, TokenStream};
use quote::quote;

use crate::codegen::decl::{Declaration, EnumDecl, FieldFragment, StructDecl, TypeExpr};
use crate::errors::GeneratorError;
use crate::naming::to_ident;

/// Generates the tokens for any declaration.
pub fn declaration_tokens(decl: &Declaration) -> Result<TokenStream, GeneratorError> {
    match decl {
        Declaration::Struct(s) => struct_tokens(s),
        Declaration::Enum(e) => enum_tokens(e),
    }
}

/// Generates a serde struct.
///
/// ## Generated Code
///
/// ```ignore
/// #[derive(Clone, Debug, Deserialize, Serialize)]
/// pub struct ListpeersPeersChannels {
///     #[serde(alias = "short-channel-id", skip_serializing_if = "Option::is_none")]
///     pub short_channel_id: Option<String>,
/// }
/// ```
pub fn struct_tokens(decl: &StructDecl) -> Result<TokenStream, GeneratorError> {
    let name = type_ident(&decl.typename, &decl.path)?;
    let docs = doc_attrs(decl.description.as_deref());
    let fields = decl
        .fields
        .iter()
        .map(field_tokens)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(quote! {
        #(#docs)*
        #[derive(Clone, Debug, Deserialize, Serialize)]
        pub struct #name {
            #(#fields)*
        }
    })
}

/// Generates a single struct field line, including its serde attributes.
pub fn field_tokens(field: &FieldFragment) -> Result<TokenStream, GeneratorError> {
    let ident = to_ident(&field.ident, &field.path)?;
    let alias = &field.alias;
    let docs = doc_attrs(field.description.as_deref());
    let ty = type_tokens(&field.ty, &field.path)?;

    if field.required {
        Ok(quote! {
            #(#docs)*
            #[serde(alias = #alias)]
            pub #ident: #ty,
        })
    } else {
        Ok(quote! {
            #(#docs)*
            #[serde(alias = #alias, skip_serializing_if = "Option::is_none")]
            pub #ident: Option<#ty>,
        })
    }
}

/// Generates a type expression. Sequences become `Vec<..>`.
pub fn type_tokens(ty: &TypeExpr, path: &str) -> Result<TokenStream, GeneratorError> {
    match ty {
        TypeExpr::Named(name) => {
            let parsed = syn::parse_str::<syn::Type>(name).map_err(|e| {
                GeneratorError::InvalidTypeName {
                    type_name: name.clone(),
                    path: path.to_string(),
                    reason: e.to_string(),
                }
            })?;
            Ok(quote! { #parsed })
        }
        TypeExpr::Sequence(inner) => {
            let inner = type_tokens(inner, path)?;
            Ok(quote! { Vec<#inner> })
        }
    }
}

/// Generates an enum with string wire names and a positional
/// `TryFrom<i32>` conversion.
///
/// Reserved (null) slots have no arm, so their index falls through to the
/// error arm together with out-of-range values.
///
/// ## Generated Code
///
/// ```ignore
/// #[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
/// pub enum ChannelState {
///     #[serde(rename = "OPENING")]
///     OPENING,
///     #[serde(rename = "CLOSED")]
///     CLOSED,
/// }
///
/// impl TryFrom<i32> for ChannelState {
///     type Error = anyhow::Error;
///     fn try_from(c: i32) -> Result<ChannelState, anyhow::Error> {
///         match c {
///             0 => Ok(ChannelState::OPENING),
///             3 => Ok(ChannelState::CLOSED),
///             o => Err(anyhow::anyhow!("Unknown variant {} for enum ChannelState", o)),
///         }
///     }
/// }
/// ```
pub fn enum_tokens(decl: &EnumDecl) -> Result<TokenStream, GeneratorError> {
    let name = type_ident(&decl.typename, &decl.path)?;
    let docs = doc_attrs(decl.description.as_deref());

    let mut variants = Vec::with_capacity(decl.variants.len());
    let mut arms = Vec::with_capacity(decl.variants.len());
    for variant in &decl.variants {
        let ident = to_ident(&variant.ident, &decl.path)?;
        let wire = &variant.wire;
        let index = i32::try_from(variant.index).map_err(|_| {
            GeneratorError::CodeGenError(format!(
                "enum {} has too many variants for an i32 discriminant",
                decl.typename
            ))
        })?;
        let index = Literal::i32_unsuffixed(index);

        variants.push(quote! {
            #[serde(rename = #wire)]
            #ident,
        });
        arms.push(quote! {
            #index => Ok(#name::#ident),
        });
    }

    let unknown = format!("Unknown variant {{}} for enum {}", decl.typename);

    Ok(quote! {
        #(#docs)*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
        pub enum #name {
            #(#variants)*
        }

        impl TryFrom<i32> for #name {
            type Error = anyhow::Error;
            fn try_from(c: i32) -> Result<#name, anyhow::Error> {
                match c {
                    #(#arms)*
                    o => Err(anyhow::anyhow!(#unknown, o)),
                }
            }
        }
    })
}

/// Turns a description into `#[doc]` attributes, one per line.
pub fn doc_attrs(description: Option<&str>) -> Vec<TokenStream> {
    description
        .into_iter()
        .flat_map(str::lines)
        .map(|line| {
            let line = if line.is_empty() {
                String::new()
            } else {
                format!(" {line}")
            };
            quote! { #[doc = #line] }
        })
        .collect()
}

fn type_ident(typename: &str, path: &str) -> Result<Ident, GeneratorError> {
    syn::parse_str::<Ident>(typename).map_err(|e| GeneratorError::InvalidTypeName {
        type_name: typename.to_string(),
        path: path.to_string(),
        reason: e.to_string(),
    })
}

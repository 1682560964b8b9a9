//! Request/Response dispatch enum generation.
//!
//! Generates the two tagged unions that unify every method's payload under
//! a method-name discriminator, with `From` implementations for easy
//! conversion.

use std::collections::BTreeMap;

use msggen_model::{CompositeField, Method, Service};
use proc_macro2::{Ident, TokenStream};
use quote::quote;

use crate::errors::GeneratorError;

/// Which side of a method a dispatch enum wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Request,
    Response,
}

impl Direction {
    /// Name of the output section holding the payload types.
    pub fn module(self) -> &'static str {
        match self {
            Direction::Request => "requests",
            Direction::Response => "responses",
        }
    }

    pub fn enum_name(self) -> &'static str {
        match self {
            Direction::Request => "Request",
            Direction::Response => "Response",
        }
    }

    /// Serde `content` key for the payload.
    pub fn content_key(self) -> &'static str {
        match self {
            Direction::Request => "params",
            Direction::Response => "result",
        }
    }

    /// The method's payload composite for this direction.
    pub fn composite(self, method: &Method) -> &CompositeField {
        match self {
            Direction::Request => &method.request,
            Direction::Response => &method.response,
        }
    }
}

/// Generates the dispatch enum for one direction.
///
/// Creates an enum with one variant per method, plus:
/// - `method()` returning the wire name of the variant
/// - `From<Payload>` impl for each payload type used by a single variant
///
/// ## Generated Code
///
/// ```ignore
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// #[serde(tag = "method", content = "params")]
/// #[serde(rename_all = "lowercase")]
/// pub enum Request {
///     Getinfo(requests::GetinfoRequest),
///     ListPeers(requests::ListpeersRequest),
/// }
///
/// impl Request {
///     pub fn method(&self) -> &'static str {
///         match *self {
///             Self::Getinfo(_) => "getinfo",
///             Self::ListPeers(_) => "listpeers",
///         }
///     }
/// }
///
/// impl From<requests::GetinfoRequest> for Request {
///     fn from(req: requests::GetinfoRequest) -> Self {
///         Self::Getinfo(req)
///     }
/// }
/// ```
pub fn generate_dispatch_enum(
    service: &Service,
    direction: Direction,
) -> Result<TokenStream, GeneratorError> {
    let enum_name = Ident::new(direction.enum_name(), proc_macro2::Span::call_site());
    let module = Ident::new(direction.module(), proc_macro2::Span::call_site());
    let content = direction.content_key();
    let enum_doc = format!(
        " All {} payloads, tagged by method name.",
        direction.enum_name().to_lowercase()
    );

    let mut variants = Vec::with_capacity(service.methods.len());
    let mut arms = Vec::with_capacity(service.methods.len());
    let mut payloads: BTreeMap<&str, Vec<&Ident>> = BTreeMap::new();

    let idents = service
        .methods
        .iter()
        .map(|m| {
            let variant = variant_ident(&m.name)?;
            let payload = payload_ident(direction.composite(m))?;
            Ok((m, variant, payload))
        })
        .collect::<Result<Vec<_>, GeneratorError>>()?;

    for (method, variant, payload) in &idents {
        let wire = method.name.to_lowercase();
        variants.push(quote! { #variant(#module::#payload), });
        arms.push(quote! { Self::#variant(_) => #wire, });
        payloads
            .entry(direction.composite(method).typename.as_str())
            .or_default()
            .push(variant);
    }

    // A payload shared by several methods has no unambiguous target variant.
    let from_impls = idents
        .iter()
        .filter(|(method, ..)| {
            payloads
                .get(direction.composite(method).typename.as_str())
                .is_some_and(|v| v.len() == 1)
        })
        .map(|(_, variant, payload)| {
            quote! {
                impl From<#module::#payload> for #enum_name {
                    fn from(req: #module::#payload) -> Self {
                        Self::#variant(req)
                    }
                }
            }
        });

    Ok(quote! {
        #[doc = #enum_doc]
        #[derive(Clone, Debug, Serialize, Deserialize)]
        #[serde(tag = "method", content = #content)]
        #[serde(rename_all = "lowercase")]
        pub enum #enum_name {
            #(#variants)*
        }

        impl #enum_name {
            /// The method name used as the wire tag.
            pub fn method(&self) -> &'static str {
                match *self {
                    #(#arms)*
                }
            }
        }

        #(#from_impls)*
    })
}

fn variant_ident(method_name: &str) -> Result<Ident, GeneratorError> {
    syn::parse_str::<Ident>(method_name).map_err(|e| GeneratorError::InvalidIdentifier {
        name: method_name.to_string(),
        path: method_name.to_string(),
        reason: e.to_string(),
    })
}

fn payload_ident(composite: &CompositeField) -> Result<Ident, GeneratorError> {
    syn::parse_str::<Ident>(&composite.typename).map_err(|e| GeneratorError::InvalidTypeName {
        type_name: composite.typename.clone(),
        path: composite.path.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{format_code, validate_code};
    use crate::test_utils::{make_method, make_service};

    #[test]
    fn request_enum_wraps_request_types() {
        let service = make_service(&["Getinfo", "ListPeers"]);
        let tokens = generate_dispatch_enum(&service, Direction::Request).unwrap();
        let code = format_code(&validate_code(&tokens).expect("Failed to parse code"));

        assert!(code.contains("#[serde(tag = \"method\", content = \"params\")]"));
        assert!(code.contains("#[serde(rename_all = \"lowercase\")]"));
        assert!(code.contains("pub enum Request {"));
        assert!(code.contains("Getinfo(requests::GetinfoRequest)"));
        assert!(code.contains("ListPeers(requests::ListPeersRequest)"));
        assert!(code.contains("Self::ListPeers(_) => \"listpeers\""));
        assert!(code.contains("impl From<requests::GetinfoRequest> for Request"));

        let getinfo = code.find("Getinfo(requests").unwrap();
        let listpeers = code.find("ListPeers(requests").unwrap();
        assert!(getinfo < listpeers);
    }

    #[test]
    fn response_enum_uses_result_key() {
        let service = make_service(&["Getinfo"]);
        let tokens = generate_dispatch_enum(&service, Direction::Response).unwrap();
        let code = format_code(&validate_code(&tokens).expect("Failed to parse code"));

        assert!(code.contains("content = \"result\""));
        assert!(code.contains("pub enum Response {"));
        assert!(code.contains("Getinfo(responses::GetinfoResponse)"));
        assert!(code.contains("impl From<responses::GetinfoResponse> for Response"));
    }

    #[test]
    fn empty_service_produces_empty_enum() {
        let service = Service::default();
        let tokens = generate_dispatch_enum(&service, Direction::Request).unwrap();
        let code = format_code(&validate_code(&tokens).expect("Failed to parse code"));

        assert!(code.contains("pub enum Request"));
        assert!(code.contains("match *self {}"));
        assert!(!code.contains("(requests::"));
        assert!(!code.contains("impl From"));
    }

    #[test]
    fn shared_payloads_get_no_from_impl() {
        let mut a = make_method("Stop");
        let mut b = make_method("Shutdown");
        a.response.typename = "EmptyResponse".to_string();
        b.response.typename = "EmptyResponse".to_string();
        let service = Service::new(vec![a, b]);

        let tokens = generate_dispatch_enum(&service, Direction::Response).unwrap();
        let code = format_code(&validate_code(&tokens).expect("Failed to parse code"));
        assert!(code.contains("Stop(responses::EmptyResponse)"));
        assert!(code.contains("Shutdown(responses::EmptyResponse)"));
        assert!(!code.contains("impl From<responses::EmptyResponse>"));

        let tokens = generate_dispatch_enum(&service, Direction::Request).unwrap();
        let code = format_code(&validate_code(&tokens).expect("Failed to parse code"));
        assert!(code.contains("impl From<requests::StopRequest> for Request"));
    }

    #[test]
    fn invalid_method_name_is_rejected() {
        let service = make_service(&["list-peers"]);
        assert!(matches!(
            generate_dispatch_enum(&service, Direction::Request),
            Err(GeneratorError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn direction_accessors() {
        let method = make_method("Getinfo");
        assert_eq!(Direction::Request.composite(&method).typename, "GetinfoRequest");
        assert_eq!(Direction::Response.composite(&method).typename, "GetinfoResponse");
        assert_eq!(Direction::Request.module(), "requests");
        assert_eq!(Direction::Response.content_key(), "result");
    }
}

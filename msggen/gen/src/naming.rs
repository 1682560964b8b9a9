//! Name normalization for generated identifiers.
//!
//! Schema names are free-form (`short-channel-id`, `scriptPubKey`,
//! `type`). Rust field names are derived in two steps:
//!
//! 1. [`normalize_varname`] computes the canonical snake_case form.
//! 2. [`to_ident`] turns it into a `proc_macro2::Ident`, escaping reserved
//!    words as raw identifiers (`r#type`).
//!
//! The schema name itself is kept separately and emitted as a serde alias,
//! so the wire format does not depend on the identifier.

use proc_macro2::{Ident, Span};

use crate::errors::GeneratorError;

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Converts a schema field name into snake_case.
///
/// Dashes become underscores, an underscore is inserted before every
/// uppercase letter that is not the first character, and the result is
/// lowercased. Array suffixes (`[]`) are dropped. Applying it twice yields
/// the same result as applying it once.
///
/// ## Examples
///
/// ```
/// use msggen_gen::naming::normalize_varname;
///
/// assert_eq!(normalize_varname("short-channel-id"), "short_channel_id");
/// assert_eq!(normalize_varname("scriptPubKey"), "script_pub_key");
/// assert_eq!(normalize_varname("peers[]"), "peers");
/// assert_eq!(normalize_varname("script_pub_key"), "script_pub_key");
/// ```
pub fn normalize_varname(name: &str) -> String {
    let name = strip_array_suffix(name);
    let mut out = String::with_capacity(name.len() + 4);

    for (idx, c) in name.chars().enumerate() {
        if c == '-' {
            out.push('_');
        } else if c.is_uppercase() {
            if idx > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// Normalizes an enum variant name.
///
/// Variants keep their case (`CHANNELD_NORMAL` stays as is); only
/// separators that cannot appear in an identifier are replaced.
pub fn normalize_variant(variant: &str) -> String {
    variant.replace([' ', '-', '/', '.'], "_")
}

/// Drops every `[]` from a name (`peers[]` -> `peers`).
pub fn strip_array_suffix(name: &str) -> &str {
    let mut name = name;
    while let Some(stripped) = name.strip_suffix("[]") {
        name = stripped;
    }
    name
}

/// Builds an identifier, escaping reserved words.
///
/// - Strict and reserved keywords become raw identifiers (`r#type`).
/// - Keywords that cannot be raw (`self`, `crate`, ...) get a trailing `_`.
/// - Names starting with a digit get a leading `_`.
///
/// The candidate is run through the Rust lexer, so characters that
/// `char::is_alphanumeric` accepts but identifiers do not (`²`) are
/// reported instead of reaching `Ident::new`. `path` is only used for error
/// reporting.
///
/// ## Errors
///
/// Returns `GeneratorError::InvalidIdentifier` if the name is empty or
/// contains characters that are not valid in an identifier.
pub fn to_ident(name: &str, path: &str) -> Result<Ident, GeneratorError> {
    let invalid = |reason: &str| GeneratorError::InvalidIdentifier {
        name: name.to_string(),
        path: path.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if !name.chars().all(|c| c == '_' || c.is_alphanumeric()) {
        return Err(invalid("contains characters that are not valid in an identifier"));
    }
    if NON_RAW_KEYWORDS.contains(&name) {
        return Ok(Ident::new(&format!("{name}_"), Span::call_site()));
    }

    let candidate = if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name.to_string()
    };

    syn::parse_str::<Ident>(&candidate)
        .or_else(|_| syn::parse_str::<Ident>(&format!("r#{candidate}")))
        .map_err(|_| invalid("contains characters that are not valid in an identifier"))
}

/// Returns true if `name` is a Rust keyword.
///
/// `syn` refuses to parse keywords as plain identifiers but accepts them in
/// raw form, which keeps this in sync with the edition `syn` targets.
pub fn is_keyword(name: &str) -> bool {
    syn::parse_str::<Ident>(name).is_err()
        && syn::parse_str::<Ident>(&format!("r#{name}")).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashes_become_underscores() {
        assert_eq!(normalize_varname("short-channel-id"), "short_channel_id");
        assert_eq!(normalize_varname("lightning-dir"), "lightning_dir");
    }

    #[test]
    fn camel_case_becomes_snake_case() {
        assert_eq!(normalize_varname("scriptPubKey"), "script_pub_key");
        assert_eq!(normalize_varname("PascalCase"), "pascal_case");
        assert_eq!(normalize_varname("channelID"), "channel_i_d");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["short-channel-id", "scriptPubKey", "channels[]", "PascalCase", "plain"] {
            let once = normalize_varname(raw);
            assert_eq!(normalize_varname(&once), once, "not idempotent for {raw}");
        }
    }

    #[test]
    fn array_suffixes_are_stripped() {
        assert_eq!(normalize_varname("features[]"), "features");
        assert_eq!(normalize_varname("matrix[][]"), "matrix");
        assert_eq!(strip_array_suffix("matrix[][]"), "matrix");
        assert_eq!(strip_array_suffix("plain"), "plain");
    }

    #[test]
    fn variants_keep_case() {
        assert_eq!(normalize_variant("CHANNELD_NORMAL"), "CHANNELD_NORMAL");
        assert_eq!(normalize_variant("channel-funding"), "channel_funding");
        assert_eq!(normalize_variant("a b/c.d"), "a_b_c_d");
    }

    #[test]
    fn keywords_become_raw_identifiers() {
        assert_eq!(to_ident("type", "X.type").unwrap().to_string(), "r#type");
        assert_eq!(to_ident("in", "X.in").unwrap().to_string(), "r#in");
        assert_eq!(to_ident("async", "X.async").unwrap().to_string(), "r#async");
        assert!(is_keyword("type"));
        assert!(!is_keyword("channels"));
        assert!(!is_keyword("x²"));
    }

    #[test]
    fn non_raw_keywords_get_suffix() {
        assert_eq!(to_ident("self", "X.self").unwrap().to_string(), "self_");
        assert_eq!(to_ident("crate", "X.crate").unwrap().to_string(), "crate_");
    }

    #[test]
    fn leading_digit_gets_prefix() {
        assert_eq!(to_ident("2fa", "X.2fa").unwrap().to_string(), "_2fa");
    }

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(
            to_ident("short_channel_id", "X.short-channel-id").unwrap().to_string(),
            "short_channel_id"
        );
        assert_eq!(to_ident("OPENING", "X.state").unwrap().to_string(), "OPENING");
    }

    #[test]
    fn invalid_names_are_rejected() {
        assert!(matches!(
            to_ident("", "X"),
            Err(GeneratorError::InvalidIdentifier { .. })
        ));
        match to_ident("has space", "X.has space") {
            Err(GeneratorError::InvalidIdentifier { path, .. }) => assert_eq!(path, "X.has space"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn non_identifier_unicode_is_rejected() {
        // '²' is alphanumeric but not an identifier character.
        match to_ident("x²", "X.x²") {
            Err(GeneratorError::InvalidIdentifier { name, path, .. }) => {
                assert_eq!(name, "x²");
                assert_eq!(path, "X.x²");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(to_ident("²", "X.²").is_err());
        assert_eq!(to_ident("größe", "X.größe").unwrap().to_string(), "größe");
    }
}

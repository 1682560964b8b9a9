//! Schema type to Rust type resolution.
//!
//! Two static tables drive resolution:
//!
//! - [`PRIMITIVE_TYPEMAP`] maps schema scalar types to Rust types
//!   (`msat` -> `Amount`, `number` -> `i64`, ...).
//! - [`DEFAULT_OVERRIDES`] maps field paths to a hand-picked type name, or
//!   suppresses the field entirely.
//!
//! Both are bundled into a [`TypeMapper`] that the renderer receives as a
//! parameter, so a different target can bring its own tables.
//!
//! ## Resolution Order
//!
//! 1. Path override (suppress, or replace the type name)
//! 2. Primitive typemap
//! 3. Schema type name unchanged (a Composite/Enum declared elsewhere)

use std::collections::BTreeMap;

use tracing::trace;

/// Schema scalar type -> Rust type.
pub const PRIMITIVE_TYPEMAP: &[(&str, &str)] = &[
    ("boolean", "bool"),
    ("hex", "String"),
    ("msat", "Amount"),
    ("msat|all", "AmountOrAll"),
    ("msat|any", "AmountOrAny"),
    ("number", "i64"),
    ("pubkey", "String"),
    ("short_channel_id", "String"),
    ("signature", "String"),
    ("string", "String"),
    ("txid", "String"),
    ("float", "f32"),
    ("utxo", "Utxo"),
    ("feerate", "Feerate"),
    ("u8", "u8"),
    ("u16", "u16"),
    ("u32", "u32"),
    ("u64", "u64"),
    ("hash", "String"),
    ("secret", "String"),
];

/// Path -> override for the bundled lightning service.
///
/// `None` suppresses the field.
pub const DEFAULT_OVERRIDES: &[(&str, Option<&str>)] = &[
    (
        "ListPeers.peers[].channels[].state_changes[].old_state",
        Some("ChannelState"),
    ),
    (
        "ListPeers.peers[].channels[].state_changes[].new_state",
        Some("ChannelState"),
    ),
    (
        "ListPeers.peers[].channels[].state_changes[].cause",
        Some("ChannelStateChangeCause"),
    ),
    ("ListPeers.peers[].channels[].opener", Some("ChannelSide")),
    ("ListPeers.peers[].channels[].closer", Some("ChannelSide")),
    ("ListPeers.peers[].channels[].features[]", Some("string")),
    ("ListFunds.channels[].state", Some("ChannelState")),
    ("ListTransactions.transactions[].type[]", None),
];

/// A path-keyed replacement for an inferred type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override {
    /// Use this type name; no declaration is emitted for the node.
    Type(String),
    /// Drop the field and everything beneath it.
    Suppress,
}

/// Outcome of resolving a node's target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The node renders with this Rust type name.
    Type {
        name: String,
        /// True when the name came from the override table. Overridden
        /// nodes do not emit their own declaration.
        overridden: bool,
    },
    /// The node is dropped.
    Suppressed,
}

/// Primitive typemap plus override table.
///
/// ## Examples
///
/// ```
/// use msggen_gen::typemap::{Resolution, TypeMapper};
///
/// let mapper = TypeMapper::rust();
/// assert_eq!(
///     mapper.resolve("msat", "ListFunds.outputs[].amount_msat"),
///     Resolution::Type { name: "Amount".to_string(), overridden: false }
/// );
/// assert_eq!(
///     mapper.resolve("ListpeersPeersChannelsOpener", "ListPeers.peers[].channels[].opener"),
///     Resolution::Type { name: "ChannelSide".to_string(), overridden: true }
/// );
/// assert_eq!(
///     mapper.resolve("ListtransactionsTransactionsType", "ListTransactions.transactions[].type[]"),
///     Resolution::Suppressed
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeMapper {
    typemap: BTreeMap<String, String>,
    overrides: BTreeMap<String, Override>,
}

impl TypeMapper {
    /// Creates a mapper from explicit tables.
    pub fn new(typemap: BTreeMap<String, String>, overrides: BTreeMap<String, Override>) -> Self {
        Self { typemap, overrides }
    }

    /// The Rust target: [`PRIMITIVE_TYPEMAP`] and [`DEFAULT_OVERRIDES`].
    pub fn rust() -> Self {
        let typemap = PRIMITIVE_TYPEMAP
            .iter()
            .map(|(schema, target)| (schema.to_string(), target.to_string()))
            .collect();
        let overrides = DEFAULT_OVERRIDES
            .iter()
            .map(|(path, target)| {
                let ov = match target {
                    Some(name) => Override::Type(name.to_string()),
                    None => Override::Suppress,
                };
                (path.to_string(), ov)
            })
            .collect();
        Self::new(typemap, overrides)
    }

    /// The Rust primitive typemap without any overrides.
    pub fn rust_without_overrides() -> Self {
        Self {
            overrides: BTreeMap::new(),
            ..Self::rust()
        }
    }

    /// Adds (or replaces) a type override for `path`.
    pub fn with_override(mut self, path: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.overrides
            .insert(path.into(), Override::Type(type_name.into()));
        self
    }

    /// Suppresses the field at `path`.
    pub fn with_suppressed(mut self, path: impl Into<String>) -> Self {
        self.overrides.insert(path.into(), Override::Suppress);
        self
    }

    /// Iterates over the override keys in sorted order.
    pub fn override_paths(&self) -> impl Iterator<Item = &str> {
        self.overrides.keys().map(String::as_str)
    }

    /// Maps a schema primitive type; unknown names pass through unchanged.
    pub fn map_primitive<'a>(&'a self, schema_typename: &'a str) -> &'a str {
        self.typemap
            .get(schema_typename)
            .map(String::as_str)
            .unwrap_or(schema_typename)
    }

    /// Resolves the target type for the node at `path`.
    ///
    /// Override values that name a schema primitive (e.g. `string`) go
    /// through the typemap as well.
    pub fn resolve(&self, schema_typename: &str, path: &str) -> Resolution {
        let resolution = match self.overrides.get(path) {
            Some(Override::Suppress) => Resolution::Suppressed,
            Some(Override::Type(name)) => Resolution::Type {
                name: self.map_primitive(name).to_string(),
                overridden: true,
            },
            None => Resolution::Type {
                name: self.map_primitive(schema_typename).to_string(),
                overridden: false,
            },
        };
        trace!(path, schema_typename, ?resolution, "resolved type");
        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_types_map_to_rust() {
        let mapper = TypeMapper::rust();
        assert_eq!(mapper.map_primitive("number"), "i64");
        assert_eq!(mapper.map_primitive("float"), "f32");
        assert_eq!(mapper.map_primitive("msat"), "Amount");
        assert_eq!(mapper.map_primitive("msat|any"), "AmountOrAny");
        assert_eq!(mapper.map_primitive("short_channel_id"), "String");
        assert_eq!(mapper.map_primitive("boolean"), "bool");
    }

    #[test]
    fn unknown_types_pass_through() {
        let mapper = TypeMapper::rust();
        assert_eq!(mapper.map_primitive("ListpeersPeers"), "ListpeersPeers");
        assert_eq!(
            mapper.resolve("ListpeersPeers", "ListPeers.peers[]"),
            Resolution::Type {
                name: "ListpeersPeers".to_string(),
                overridden: false
            }
        );
    }

    #[test]
    fn override_replaces_type() {
        let mapper = TypeMapper::rust();
        let res = mapper.resolve(
            "ListpeersPeersChannelsState_changesCause",
            "ListPeers.peers[].channels[].state_changes[].cause",
        );
        assert_eq!(
            res,
            Resolution::Type {
                name: "ChannelStateChangeCause".to_string(),
                overridden: true
            }
        );
    }

    #[test]
    fn override_naming_a_primitive_is_mapped() {
        let mapper = TypeMapper::rust();
        let res = mapper.resolve(
            "ListpeersPeersChannelsFeatures",
            "ListPeers.peers[].channels[].features[]",
        );
        assert_eq!(
            res,
            Resolution::Type {
                name: "String".to_string(),
                overridden: true
            }
        );
    }

    #[test]
    fn suppression_wins_over_typemap() {
        let mapper = TypeMapper::rust_without_overrides().with_suppressed("X.y");
        assert_eq!(mapper.resolve("string", "X.y"), Resolution::Suppressed);
        assert_eq!(
            mapper.resolve("string", "X.z"),
            Resolution::Type {
                name: "String".to_string(),
                overridden: false
            }
        );
    }

    #[test]
    fn without_overrides_has_no_overrides() {
        let mapper = TypeMapper::rust_without_overrides();
        assert_eq!(mapper.override_paths().count(), 0);
        assert_eq!(
            mapper.resolve("ListpeersPeersChannelsOpener", "ListPeers.peers[].channels[].opener"),
            Resolution::Type {
                name: "ListpeersPeersChannelsOpener".to_string(),
                overridden: false
            }
        );
    }

    #[test]
    fn with_override_replaces_existing_entry() {
        let mapper = TypeMapper::rust().with_override("ListFunds.channels[].state", "MyState");
        assert_eq!(
            mapper.resolve("ListfundsChannelsState", "ListFunds.channels[].state"),
            Resolution::Type {
                name: "MyState".to_string(),
                overridden: true
            }
        );
    }

    #[test]
    fn override_paths_are_sorted() {
        let mapper = TypeMapper::rust_without_overrides()
            .with_override("b", "B")
            .with_suppressed("a");
        let paths: Vec<_> = mapper.override_paths().collect();
        assert_eq!(paths, vec!["a", "b"]);
    }
}

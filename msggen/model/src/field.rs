//! Field tree types.
//!
//! A schema is a tree of [`Field`] nodes. Every node carries a stable
//! `path` (the join key for overrides), the schema-declared `name`, a
//! `required` flag and an optional description. The four variants are:
//!
//! - [`PrimitiveField`] - a scalar leaf (`number`, `string`, `msat`, ...)
//! - [`EnumField`] - a leaf with a closed set of symbolic values
//! - [`ArrayField`] - a sequence of one nested field, `dims` levels deep
//! - [`CompositeField`] - an object with ordered child fields
//!
//! ## Paths
//!
//! Paths are dotted, with a `[]` suffix per array dimension. An array and
//! its item share the same path:
//!
//! ```text
//! ListPeers                        (response composite)
//! ListPeers.peers[]                (array field and its item composite)
//! ListPeers.peers[].id             (primitive inside the item)
//! ```

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

/// Discriminant of a [`Field`], used in logs and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    Primitive,
    Enum,
    Array,
    Composite,
}

/// One node of a schema field tree.
///
/// The set of variants is closed: renderers match on it exhaustively, so a
/// new kind of field cannot be silently ignored.
///
/// ## Examples
///
/// ```
/// use msggen_model::{Field, FieldKind, PrimitiveField};
///
/// let field: Field = PrimitiveField::new("Getinfo.id", "id", "pubkey").into();
/// assert_eq!(field.kind(), FieldKind::Primitive);
/// assert_eq!(field.path(), "Getinfo.id");
/// assert!(field.required());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Field {
    Primitive(PrimitiveField),
    Enum(EnumField),
    Array(ArrayField),
    Composite(CompositeField),
}

impl Field {
    /// Returns the discriminant of this field.
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Primitive(_) => FieldKind::Primitive,
            Field::Enum(_) => FieldKind::Enum,
            Field::Array(_) => FieldKind::Array,
            Field::Composite(_) => FieldKind::Composite,
        }
    }

    /// Stable path of this node within its service.
    pub fn path(&self) -> &str {
        match self {
            Field::Primitive(f) => &f.path,
            Field::Enum(f) => &f.path,
            Field::Array(f) => &f.path,
            Field::Composite(f) => &f.path,
        }
    }

    /// Schema-declared name, before any normalization.
    pub fn name(&self) -> &str {
        match self {
            Field::Primitive(f) => &f.name,
            Field::Enum(f) => &f.name,
            Field::Array(f) => &f.name,
            Field::Composite(f) => &f.name,
        }
    }

    pub fn required(&self) -> bool {
        match self {
            Field::Primitive(f) => f.required,
            Field::Enum(f) => f.required,
            Field::Array(f) => f.required,
            Field::Composite(f) => f.required,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Field::Primitive(f) => f.description.as_deref(),
            Field::Enum(f) => f.description.as_deref(),
            Field::Array(f) => f.description.as_deref(),
            Field::Composite(f) => f.description.as_deref(),
        }
    }

    /// Schema type name of the node, if it has one.
    ///
    /// Arrays have no type name of their own; their item carries it.
    pub fn typename(&self) -> Option<&str> {
        match self {
            Field::Primitive(f) => Some(&f.typename),
            Field::Enum(f) => Some(&f.typename),
            Field::Array(_) => None,
            Field::Composite(f) => Some(&f.typename),
        }
    }

    /// Visits this field and every descendant, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Field)) {
        visit(self);
        match self {
            Field::Primitive(_) | Field::Enum(_) => {}
            Field::Array(a) => a.itemtype.walk(visit),
            Field::Composite(c) => {
                for child in &c.fields {
                    child.walk(visit);
                }
            }
        }
    }
}

/// A scalar leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveField {
    pub path: String,
    pub name: String,
    /// Schema scalar type (e.g. `number`, `msat`, `short_channel_id`).
    pub typename: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PrimitiveField {
    /// Creates a required primitive field.
    pub fn new(path: impl Into<String>, name: impl Into<String>, typename: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            typename: typename.into(),
            required: true,
            description: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A leaf with a closed, ordered set of symbolic values.
///
/// Variant order is significant: the variant at index `i` has wire value
/// `i`. A `None` entry reserves its index without declaring a variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumField {
    pub path: String,
    pub name: String,
    pub typename: String,
    pub variants: Vec<Option<String>>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EnumField {
    /// Creates a required enum field.
    ///
    /// ## Examples
    ///
    /// ```
    /// use msggen_model::EnumField;
    ///
    /// let state = EnumField::new(
    ///     "ListFunds.channels[].state",
    ///     "state",
    ///     "ChannelState",
    ///     [Some("OPENING"), Some("CHANNELD_NORMAL"), None, Some("CLOSED")],
    /// );
    /// assert_eq!(state.defined_variants().count(), 3);
    /// ```
    pub fn new<I, S>(
        path: impl Into<String>,
        name: impl Into<String>,
        typename: impl Into<String>,
        variants: I,
    ) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            path: path.into(),
            name: name.into(),
            typename: typename.into(),
            variants: variants.into_iter().map(|v| v.map(Into::into)).collect(),
            required: true,
            description: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Iterates over the non-null variants together with their wire index.
    pub fn defined_variants(&self) -> impl Iterator<Item = (usize, &str)> {
        self.variants
            .iter()
            .enumerate()
            .filter_map(|(idx, v)| v.as_deref().map(|v| (idx, v)))
    }
}

/// A sequence of `itemtype`, nested `dims` levels deep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayField {
    pub path: String,
    pub name: String,
    pub itemtype: Box<Field>,
    #[serde(default = "default_dims")]
    pub dims: usize,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_dims() -> usize {
    1
}

impl ArrayField {
    /// Creates a required one-dimensional array field.
    pub fn new(path: impl Into<String>, name: impl Into<String>, itemtype: impl Into<Field>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            itemtype: Box::new(itemtype.into()),
            dims: 1,
            required: true,
            description: None,
        }
    }

    pub fn with_dims(mut self, dims: usize) -> Self {
        self.dims = dims;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An object type with ordered child fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeField {
    pub path: String,
    pub name: String,
    pub typename: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CompositeField {
    /// Creates a required composite with no children.
    pub fn new(path: impl Into<String>, name: impl Into<String>, typename: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            typename: typename.into(),
            fields: Vec::new(),
            required: true,
            description: None,
        }
    }

    /// Appends a child field.
    pub fn with_field(mut self, field: impl Into<Field>) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<PrimitiveField> for Field {
    fn from(field: PrimitiveField) -> Self {
        Field::Primitive(field)
    }
}

impl From<EnumField> for Field {
    fn from(field: EnumField) -> Self {
        Field::Enum(field)
    }
}

impl From<ArrayField> for Field {
    fn from(field: ArrayField) -> Self {
        Field::Array(field)
    }
}

impl From<CompositeField> for Field {
    fn from(field: CompositeField) -> Self {
        Field::Composite(field)
    }
}

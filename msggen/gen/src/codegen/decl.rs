//! Structured intermediate produced by the renderer.
//!
//! The tree walk in [`render`](super::render) produces these values; the
//! [`tokens`](super::tokens) pass turns them into Rust syntax. Nothing here
//! knows about Rust syntax beyond type names.

/// A type expression for a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A named type, as resolved by the type mapper (e.g. `String`, `Amount`).
    Named(String),
    /// A sequence of the inner type.
    Sequence(Box<TypeExpr>),
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    /// Wraps `self` in `dims` nested sequences.
    pub fn nested_in(self, dims: usize) -> Self {
        (0..dims).fold(self, |inner, _| TypeExpr::Sequence(Box::new(inner)))
    }
}

/// One field line inside a parent struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFragment {
    /// Path of the schema node this field was rendered from.
    pub path: String,
    /// Normalized identifier (before keyword escaping).
    pub ident: String,
    /// Schema name with array suffixes removed, used as the serde alias.
    pub alias: String,
    pub ty: TypeExpr,
    /// Optional fields are wrapped in `Option`.
    pub required: bool,
    pub description: Option<String>,
}

/// A named aggregate type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    pub path: String,
    pub typename: String,
    pub description: Option<String>,
    pub fields: Vec<FieldFragment>,
}

/// One declared enum variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDecl {
    /// Wire value of the variant in numeric form (its position in the schema).
    pub index: usize,
    /// Wire value of the variant in string form.
    pub wire: String,
    /// Normalized identifier.
    pub ident: String,
}

/// An enum with a positional numeric mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    pub path: String,
    pub typename: String,
    pub description: Option<String>,
    /// Non-null variants in schema order. Indices may have gaps.
    pub variants: Vec<VariantDecl>,
}

/// A standalone type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Struct(StructDecl),
    Enum(EnumDecl),
}

impl Declaration {
    pub fn typename(&self) -> &str {
        match self {
            Declaration::Struct(s) => &s.typename,
            Declaration::Enum(e) => &e.typename,
        }
    }
}

/// Result of rendering one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    /// The field line for the parent; `None` when the field is suppressed.
    pub fragment: Option<FieldFragment>,
    /// Declarations contributed by this node and its descendants,
    /// dependencies first.
    pub declarations: Vec<Declaration>,
}

impl Rendered {
    pub fn suppressed() -> Self {
        Self::default()
    }

    /// Returns true if a declaration named `typename` was produced.
    pub fn declares(&self, typename: &str) -> bool {
        self.declarations.iter().any(|d| d.typename() == typename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_in_wraps_per_dimension() {
        let ty = TypeExpr::named("String").nested_in(2);
        assert_eq!(
            ty,
            TypeExpr::Sequence(Box::new(TypeExpr::Sequence(Box::new(TypeExpr::named(
                "String"
            )))))
        );
        assert_eq!(TypeExpr::named("u32").nested_in(0), TypeExpr::named("u32"));
    }

    #[test]
    fn declares_matches_by_typename() {
        let rendered = Rendered {
            fragment: None,
            declarations: vec![Declaration::Struct(StructDecl {
                path: "X".to_string(),
                typename: "XResponse".to_string(),
                description: None,
                fields: Vec::new(),
            })],
        };
        assert!(rendered.declares("XResponse"));
        assert!(!rendered.declares("X"));
        assert!(!Rendered::suppressed().declares("XResponse"));
    }
}

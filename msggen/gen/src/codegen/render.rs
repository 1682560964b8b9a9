//! Declaration rendering for field trees.
//!
//! Walks a [`Field`] tree depth-first and produces, for every node, the
//! field line its parent embeds plus the standalone declarations the node
//! contributes. Children are always rendered before their parent so each
//! type is declared before the aggregate that uses it.
//!
//! ## Per-kind behavior
//!
//! | Kind      | Fragment                    | Declarations                         |
//! |-----------|-----------------------------|--------------------------------------|
//! | Primitive | mapped scalar type          | none                                 |
//! | Enum      | enum type name              | the enum, unless overridden          |
//! | Array     | item type in `dims` `Vec`s  | forwarded from the item              |
//! | Composite | composite type name         | children's, then its own unless overridden |
//!
//! A suppressed node renders to nothing at all.

use msggen_model::{ArrayField, CompositeField, EnumField, Field, PrimitiveField};
use tracing::debug;

use crate::codegen::decl::{
    Declaration, EnumDecl, FieldFragment, Rendered, StructDecl, TypeExpr, VariantDecl,
};
use crate::errors::GeneratorError;
use crate::naming::{normalize_variant, normalize_varname, strip_array_suffix};
use crate::typemap::{Resolution, TypeMapper};

/// Renders field trees using a given [`TypeMapper`].
///
/// ## Examples
///
/// ```
/// use msggen_gen::codegen::render::Renderer;
/// use msggen_gen::typemap::TypeMapper;
/// use msggen_model::{CompositeField, Field, PrimitiveField};
///
/// let mapper = TypeMapper::rust();
/// let renderer = Renderer::new(&mapper);
///
/// let getinfo = CompositeField::new("Getinfo", "Getinfo", "GetinfoResponse")
///     .with_field(PrimitiveField::new("Getinfo.num_peers", "num_peers", "u32"));
///
/// let rendered = renderer.render(&Field::from(getinfo)).unwrap();
/// assert!(rendered.declares("GetinfoResponse"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    mapper: &'a TypeMapper,
}

impl<'a> Renderer<'a> {
    pub fn new(mapper: &'a TypeMapper) -> Self {
        Self { mapper }
    }

    /// Renders any field.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::SuppressedRequiredField` if an override
    /// suppresses a required child of a composite.
    pub fn render(&self, field: &Field) -> Result<Rendered, GeneratorError> {
        match field {
            Field::Primitive(p) => Ok(self.render_primitive(p)),
            Field::Enum(e) => Ok(self.render_enum(e)),
            Field::Array(a) => self.render_array(a),
            Field::Composite(c) => self.render_composite(c),
        }
    }

    fn render_primitive(&self, p: &PrimitiveField) -> Rendered {
        match self.mapper.resolve(&p.typename, &p.path) {
            Resolution::Suppressed => Rendered::suppressed(),
            Resolution::Type { name, .. } => Rendered {
                fragment: Some(fragment(
                    &p.path,
                    &p.name,
                    TypeExpr::Named(name),
                    p.required,
                    p.description.as_deref(),
                )),
                declarations: Vec::new(),
            },
        }
    }

    fn render_enum(&self, e: &EnumField) -> Rendered {
        debug!(typename = %e.typename, path = %e.path, "Generating enum field");

        let (name, overridden) = match self.mapper.resolve(&e.typename, &e.path) {
            Resolution::Suppressed => return Rendered::suppressed(),
            Resolution::Type { name, overridden } => (name, overridden),
        };

        let mut declarations = Vec::new();
        if !overridden {
            let variants = e
                .defined_variants()
                .map(|(index, wire)| VariantDecl {
                    index,
                    wire: wire.to_string(),
                    ident: normalize_variant(wire),
                })
                .collect();

            declarations.push(Declaration::Enum(EnumDecl {
                path: e.path.clone(),
                typename: e.typename.clone(),
                description: e.description.clone(),
                variants,
            }));
        }

        Rendered {
            fragment: Some(fragment(
                &e.path,
                &e.name,
                TypeExpr::Named(name),
                e.required,
                e.description.as_deref(),
            )),
            declarations,
        }
    }

    fn render_array(&self, a: &ArrayField) -> Result<Rendered, GeneratorError> {
        debug!(name = %a.name, path = %a.path, dims = a.dims, "Generating array field");

        // The item's own field line is discarded; only its type and
        // declarations are kept.
        let item = self.render(&a.itemtype)?;

        let item_typename = a.itemtype.typename().unwrap_or_default();
        let item_ty = match self.mapper.resolve(item_typename, &a.path) {
            Resolution::Suppressed => None,
            Resolution::Type {
                name,
                overridden: true,
            } => Some(TypeExpr::Named(name)),
            Resolution::Type {
                overridden: false, ..
            } => item.fragment.map(|f| f.ty),
        };

        let Some(item_ty) = item_ty else {
            debug!(path = %a.path, "Array suppressed");
            return Ok(Rendered::suppressed());
        };

        Ok(Rendered {
            fragment: Some(fragment(
                &a.path,
                &a.name,
                item_ty.nested_in(a.dims),
                a.required,
                a.description.as_deref(),
            )),
            declarations: item.declarations,
        })
    }

    /// Renders a method's top-level request or response composite.
    ///
    /// A payload is always required and is referenced by its schema type
    /// name from the dispatch enums, so it can be neither suppressed nor
    /// overridden.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::SuppressedRequiredField` if the payload is
    /// suppressed and `GeneratorError::OverriddenPayload` if its type is
    /// overridden, plus any error from [`Renderer::render_composite`].
    pub fn render_payload(&self, c: &CompositeField) -> Result<Rendered, GeneratorError> {
        match self.mapper.resolve(&c.typename, &c.path) {
            Resolution::Suppressed => Err(GeneratorError::SuppressedRequiredField {
                path: c.path.clone(),
            }),
            Resolution::Type {
                overridden: true, ..
            } => Err(GeneratorError::OverriddenPayload {
                path: c.path.clone(),
            }),
            Resolution::Type { .. } => self.render_composite(c),
        }
    }

    /// Renders a composite and everything beneath it.
    ///
    /// An overridden composite still renders its children so that nested
    /// declarations which are not themselves overridden are kept.
    pub fn render_composite(&self, c: &CompositeField) -> Result<Rendered, GeneratorError> {
        debug!(typename = %c.typename, path = %c.path, "Generating composite field");

        let (name, overridden) = match self.mapper.resolve(&c.typename, &c.path) {
            Resolution::Suppressed => return Ok(Rendered::suppressed()),
            Resolution::Type { name, overridden } => (name, overridden),
        };

        let mut fields = Vec::with_capacity(c.fields.len());
        let mut declarations = Vec::new();

        for child in &c.fields {
            let rendered = self.render(child)?;
            match rendered.fragment {
                Some(f) => fields.push(f),
                None if child.required() => {
                    return Err(GeneratorError::SuppressedRequiredField {
                        path: child.path().to_string(),
                    });
                }
                None => debug!(path = %child.path(), "Skipping suppressed field"),
            }
            declarations.extend(rendered.declarations);
        }

        if !overridden {
            declarations.push(Declaration::Struct(StructDecl {
                path: c.path.clone(),
                typename: c.typename.clone(),
                description: c.description.clone(),
                fields,
            }));
        }

        Ok(Rendered {
            fragment: Some(fragment(
                &c.path,
                &c.name,
                TypeExpr::Named(name),
                c.required,
                c.description.as_deref(),
            )),
            declarations,
        })
    }
}

fn fragment(
    path: &str,
    name: &str,
    ty: TypeExpr,
    required: bool,
    description: Option<&str>,
) -> FieldFragment {
    FieldFragment {
        path: path.to_string(),
        ident: normalize_varname(name),
        alias: strip_array_suffix(name).to_string(),
        ty,
        required,
        description: description.map(str::to_string),
    }
}

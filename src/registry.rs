//! type registry adapter
//!
//! wraps `graphql_parser` output into an owned, normalized schema model:
//! named types, field lists with arguments, and recursive type-reference
//! wrappers. also home to [`render_type`], the pure mapping from a
//! [`TypeRef`] to a rust type expression.

use crate::config::GenerationConfig;
use crate::error::{Error, Result};
use crate::naming;
use graphql_parser::schema::{parse_schema, Definition, Type, TypeDefinition};
use std::collections::BTreeMap;

/// recursive type reference: a named type, a list, or a non-null wrapper.
/// the innermost node is always `Named`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// the innermost named type
    pub fn named_type(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.named_type(),
        }
    }

    /// true if the outermost wrapper is non-null
    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }

    /// sdl rendering, e.g. `[DateTime!]!`
    pub fn to_sdl(&self) -> String {
        match self {
            TypeRef::Named(name) => name.clone(),
            TypeRef::List(inner) => format!("[{}]", inner.to_sdl()),
            TypeRef::NonNull(inner) => format!("{}!", inner.to_sdl()),
        }
    }

    fn from_parser(ty: &Type<'_, String>) -> Self {
        match ty {
            Type::NamedType(name) => TypeRef::Named(name.clone()),
            Type::ListType(inner) => TypeRef::List(Box::new(TypeRef::from_parser(inner))),
            Type::NonNullType(inner) => TypeRef::NonNull(Box::new(TypeRef::from_parser(inner))),
        }
    }
}

/// argument on a field
#[derive(Debug, Clone)]
pub struct ArgumentDef {
    pub name: String,
    pub ty: TypeRef,
    pub description: Option<String>,
    pub has_default: bool,
}

impl ArgumentDef {
    /// true if the argument must be supplied: non-null with no default
    pub fn is_required(&self) -> bool {
        self.ty.is_non_null() && !self.has_default
    }
}

/// field on an object or input type
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeRef,
    pub arguments: Vec<ArgumentDef>,
    pub description: Option<String>,
}

/// declared enum value
#[derive(Debug, Clone)]
pub struct EnumValueDef {
    pub name: String,
    pub description: Option<String>,
}

/// schema type variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Object,
    Input,
    Enum,
    Interface,
    Union,
    Scalar,
}

/// a named schema type.
///
/// `fields` is populated for objects and inputs, `enum_values` for enums;
/// interfaces, unions, and scalars carry only their name and description.
#[derive(Debug, Clone)]
pub struct SchemaType {
    pub name: String,
    pub kind: TypeKind,
    pub description: Option<String>,
    pub fields: Vec<FieldDef>,
    pub enum_values: Vec<EnumValueDef>,
}

/// graphql built-in scalars with fixed rust equivalents
pub const BUILT_IN_SCALARS: &[&str] = &["ID", "String", "Int", "Float", "Boolean"];

/// flat mapping from type name to [`SchemaType`] plus root-type accessors
#[derive(Debug)]
pub struct TypeRegistry {
    types: BTreeMap<String, SchemaType>,
    query_type: Option<String>,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
}

impl TypeRegistry {
    /// parse sdl text into a registry
    ///
    /// grammar violations surface as [`Error::SchemaSyntax`]; references to
    /// undeclared type names surface as [`Error::SchemaSemantic`].
    pub fn parse(sdl: &str) -> Result<Self> {
        let document =
            parse_schema::<String>(sdl).map_err(|err| Error::SchemaSyntax(err.to_string()))?;

        let mut types = BTreeMap::new();
        let mut declared_query = None;
        let mut declared_mutation = None;
        let mut declared_subscription = None;

        for def in &document.definitions {
            match def {
                Definition::TypeDefinition(ty) => {
                    let adapted = adapt_type(ty);
                    types.insert(adapted.name.clone(), adapted);
                }
                Definition::SchemaDefinition(schema) => {
                    declared_query = schema.query.clone();
                    declared_mutation = schema.mutation.clone();
                    declared_subscription = schema.subscription.clone();
                }
                _ => {}
            }
        }

        // without an explicit schema definition, graphql's default root
        // names apply when objects of those names exist
        let root = |declared: Option<String>, default: &str| {
            declared.or_else(|| types.contains_key(default).then(|| default.to_string()))
        };
        let registry = Self {
            query_type: root(declared_query, "Query"),
            mutation_type: root(declared_mutation, "Mutation"),
            subscription_type: root(declared_subscription, "Subscription"),
            types,
        };
        registry.check_references()?;
        Ok(registry)
    }

    /// look up a type by name
    pub fn get(&self, name: &str) -> Option<&SchemaType> {
        self.types.get(name)
    }

    /// iterate all types in name order
    pub fn types(&self) -> impl Iterator<Item = &SchemaType> {
        self.types.values()
    }

    /// declared query root type name, if any
    pub fn query_type(&self) -> Option<&str> {
        self.query_type.as_deref()
    }

    /// declared mutation root type name, if any
    pub fn mutation_type(&self) -> Option<&str> {
        self.mutation_type.as_deref()
    }

    /// declared subscription root type name, if any
    pub fn subscription_type(&self) -> Option<&str> {
        self.subscription_type.as_deref()
    }

    /// true if the name is one of the schema's root operation types
    pub fn is_root(&self, name: &str) -> bool {
        [self.query_type(), self.mutation_type(), self.subscription_type()]
            .into_iter()
            .flatten()
            .any(|root| root == name)
    }

    /// kind of a named type, if declared
    pub fn kind_of(&self, name: &str) -> Option<TypeKind> {
        self.types.get(name).map(|ty| ty.kind)
    }

    /// true if the named type renders as a selection-set leaf (built-in
    /// scalar, declared scalar, or enum)
    pub fn is_leaf(&self, name: &str) -> bool {
        BUILT_IN_SCALARS.contains(&name)
            || matches!(self.kind_of(name), Some(TypeKind::Scalar | TypeKind::Enum))
    }

    fn check_references(&self) -> Result<()> {
        for ty in self.types.values() {
            for field in &ty.fields {
                self.check_ref(&field.ty, &ty.name, &field.name)?;
                for arg in &field.arguments {
                    self.check_ref(&arg.ty, &ty.name, &field.name)?;
                }
            }
        }
        Ok(())
    }

    fn check_ref(&self, ty: &TypeRef, owner: &str, field: &str) -> Result<()> {
        let name = ty.named_type();
        if BUILT_IN_SCALARS.contains(&name) || self.types.contains_key(name) {
            return Ok(());
        }
        Err(Error::SchemaSemantic(format!(
            "field {}.{} references undeclared type {}",
            owner, field, name
        )))
    }
}

fn adapt_type(ty: &TypeDefinition<'_, String>) -> SchemaType {
    match ty {
        TypeDefinition::Object(obj) => SchemaType {
            name: obj.name.clone(),
            kind: TypeKind::Object,
            description: obj.description.clone(),
            fields: obj.fields.iter().map(adapt_field).collect(),
            enum_values: Vec::new(),
        },
        TypeDefinition::InputObject(input) => SchemaType {
            name: input.name.clone(),
            kind: TypeKind::Input,
            description: input.description.clone(),
            fields: input
                .fields
                .iter()
                .map(|field| FieldDef {
                    name: field.name.clone(),
                    ty: TypeRef::from_parser(&field.value_type),
                    arguments: Vec::new(),
                    description: field.description.clone(),
                })
                .collect(),
            enum_values: Vec::new(),
        },
        TypeDefinition::Enum(enum_ty) => SchemaType {
            name: enum_ty.name.clone(),
            kind: TypeKind::Enum,
            description: enum_ty.description.clone(),
            fields: Vec::new(),
            enum_values: enum_ty
                .values
                .iter()
                .map(|value| EnumValueDef {
                    name: value.name.clone(),
                    description: value.description.clone(),
                })
                .collect(),
        },
        TypeDefinition::Interface(interface) => SchemaType {
            name: interface.name.clone(),
            kind: TypeKind::Interface,
            description: interface.description.clone(),
            fields: Vec::new(),
            enum_values: Vec::new(),
        },
        TypeDefinition::Union(union_ty) => SchemaType {
            name: union_ty.name.clone(),
            kind: TypeKind::Union,
            description: union_ty.description.clone(),
            fields: Vec::new(),
            enum_values: Vec::new(),
        },
        TypeDefinition::Scalar(scalar) => SchemaType {
            name: scalar.name.clone(),
            kind: TypeKind::Scalar,
            description: scalar.description.clone(),
            fields: Vec::new(),
            enum_values: Vec::new(),
        },
    }
}

fn adapt_field(field: &graphql_parser::schema::Field<'_, String>) -> FieldDef {
    FieldDef {
        name: field.name.clone(),
        ty: TypeRef::from_parser(&field.field_type),
        arguments: field
            .arguments
            .iter()
            .map(|arg| ArgumentDef {
                name: arg.name.clone(),
                ty: TypeRef::from_parser(&arg.value_type),
                description: arg.description.clone(),
                has_default: arg.default_value.is_some(),
            })
            .collect(),
        description: field.description.clone(),
    }
}

/// a rendered rust type expression plus its outermost nullability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedType {
    pub expr: String,
    pub nullable: bool,
}

/// map a [`TypeRef`] to a rust type expression.
///
/// nullability wraps `Option`, lists wrap `Vec`. named leaves resolve in
/// order: graphql built-ins to fixed primitives, declared scalars through
/// the config's scalar map (`String` when unmapped), interfaces and unions
/// to `serde_json::Value`, and everything else to a fully qualified
/// reference to the generated class. direct object references in output
/// position are boxed so recursive types stay representable.
pub fn render_type(
    ty: &TypeRef,
    registry: &TypeRegistry,
    config: &GenerationConfig,
    input_position: bool,
) -> RenderedType {
    RenderedType {
        expr: render_expr(ty, registry, config, input_position, false),
        nullable: !ty.is_non_null(),
    }
}

/// like [`render_type`] but without the outermost `Option`, used for
/// builder setter parameters
pub fn render_required_type(
    ty: &TypeRef,
    registry: &TypeRegistry,
    config: &GenerationConfig,
    input_position: bool,
) -> String {
    render_bare(ty, registry, config, input_position, false)
}

fn render_expr(
    ty: &TypeRef,
    registry: &TypeRegistry,
    config: &GenerationConfig,
    input_position: bool,
    in_list: bool,
) -> String {
    match ty {
        TypeRef::NonNull(inner) => render_bare(inner, registry, config, input_position, in_list),
        _ => format!(
            "Option<{}>",
            render_bare(ty, registry, config, input_position, in_list)
        ),
    }
}

fn render_bare(
    ty: &TypeRef,
    registry: &TypeRegistry,
    config: &GenerationConfig,
    input_position: bool,
    in_list: bool,
) -> String {
    match ty {
        TypeRef::NonNull(inner) => render_bare(inner, registry, config, input_position, in_list),
        TypeRef::List(inner) => format!(
            "Vec<{}>",
            render_expr(inner, registry, config, input_position, true)
        ),
        TypeRef::Named(name) => render_leaf(name, registry, config, input_position, in_list),
    }
}

fn render_leaf(
    name: &str,
    registry: &TypeRegistry,
    config: &GenerationConfig,
    input_position: bool,
    in_list: bool,
) -> String {
    match name {
        "ID" | "String" => return "String".to_string(),
        "Int" => return "i64".to_string(),
        "Float" => return "f64".to_string(),
        "Boolean" => return "bool".to_string(),
        _ => {}
    }
    match registry.kind_of(name) {
        Some(TypeKind::Scalar) | None => config.scalar_type(name),
        Some(TypeKind::Enum) => naming::rust_path(config, naming::Category::Type, name),
        Some(TypeKind::Input) => {
            let class = format!("{}{}", name, config.input_suffix());
            naming::rust_path(config, naming::Category::Input, &class)
        }
        Some(TypeKind::Object) => {
            let class = format!("{}{}", name, config.type_suffix());
            let path = naming::rust_path(config, naming::Category::Type, &class);
            if input_position || in_list {
                path
            } else {
                format!("Box<{}>", path)
            }
        }
        Some(TypeKind::Interface) | Some(TypeKind::Union) => "serde_json::Value".to_string(),
    }
}

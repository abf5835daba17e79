//! source emitters
//!
//! each emitter walks the adapted registry and renders one
//! [`EmittedArtifact`] per generated class. emitters only build strings;
//! the orchestrator decides where files land.

use crate::config::GenerationConfig;
use crate::naming::{self, Category};
use crate::registry::{TypeKind, TypeRef, TypeRegistry};

pub mod operations;
pub mod selectors;
pub mod types;

/// one generated unit: target package, class name, and rendered source
#[derive(Debug, Clone)]
pub struct EmittedArtifact {
    pub category: Category,
    pub package: String,
    pub name: String,
    pub source: String,
}

impl EmittedArtifact {
    pub fn new(
        config: &GenerationConfig,
        category: Category,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            category,
            package: naming::package_for(config, category),
            name: name.into(),
            source: source.into(),
        }
    }

    /// file name for this artifact
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.name)
    }
}

/// standard header for every generated file
pub(crate) fn file_header(out: &mut String, what: &str) {
    out.push_str(&format!("//! generated {} (graphql-forge)\n", what));
    out.push_str("//!\n");
    out.push_str("//! regenerate instead of editing.\n\n");
}

/// render a schema description as a doc comment at the given indent
pub(crate) fn push_doc(out: &mut String, description: Option<&str>, indent: &str) {
    let Some(description) = description else { return };
    for line in description.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            out.push_str(&format!("{}///\n", indent));
        } else {
            out.push_str(&format!("{}/// {}\n", indent, line));
        }
    }
}

/// parameter type and `ArgumentValue` conversion for an owned argument.
///
/// used by operation builders (constructor params and fluent setters) where
/// the caller hands over the value. `var` is the binding name interpolated
/// into the conversion expression.
pub(crate) fn argument_param(
    ty: &TypeRef,
    registry: &TypeRegistry,
    config: &GenerationConfig,
    var: &str,
) -> (String, String) {
    owned_param(ty, registry, config, var, true)
}

fn owned_param(
    ty: &TypeRef,
    registry: &TypeRegistry,
    config: &GenerationConfig,
    var: &str,
    top_level: bool,
) -> (String, String) {
    match ty {
        TypeRef::NonNull(inner) => owned_param(inner, registry, config, var, top_level),
        TypeRef::List(inner) => {
            // nested selectors aside, graphql lists map to Vec; nullable
            // elements are flattened away since the literal grammar here
            // carries no null token
            let (element_ty, element_expr) = owned_param(inner, registry, config, "item", false);
            let nullable_elements = !inner.is_non_null();
            let param = if nullable_elements {
                format!("Vec<Option<{}>>", element_ty)
            } else {
                format!("Vec<{}>", element_ty)
            };
            let iter = if nullable_elements {
                format!("{}.into_iter().flatten()", var)
            } else {
                format!("{}.into_iter()", var)
            };
            let expr = format!(
                "ArgumentValue::List({}.map(|item| {}).collect())",
                iter, element_expr
            );
            (param, expr)
        }
        TypeRef::Named(name) => owned_leaf(name, registry, config, var, top_level),
    }
}

fn owned_leaf(
    name: &str,
    registry: &TypeRegistry,
    config: &GenerationConfig,
    var: &str,
    top_level: bool,
) -> (String, String) {
    let string_param = |var: &str| {
        if top_level {
            (
                "impl Into<String>".to_string(),
                format!("ArgumentValue::Str({}.into())", var),
            )
        } else {
            (
                "String".to_string(),
                format!("ArgumentValue::Str({})", var),
            )
        }
    };

    match name {
        "ID" | "String" => return string_param(var),
        "Int" => return ("i64".to_string(), format!("ArgumentValue::Int({})", var)),
        "Float" => return ("f64".to_string(), format!("ArgumentValue::Float({})", var)),
        "Boolean" => return ("bool".to_string(), format!("ArgumentValue::Bool({})", var)),
        _ => {}
    }
    match registry.kind_of(name) {
        Some(TypeKind::Enum) => {
            let path = naming::rust_path(config, Category::Type, name);
            (path, format!("ArgumentValue::from({})", var))
        }
        Some(TypeKind::Input) => {
            let class = format!("{}{}", name, config.input_suffix());
            let path = naming::rust_path(config, Category::Input, &class);
            (path, format!("{}.to_argument()", var))
        }
        Some(TypeKind::Scalar) | None => {
            let rust = config.scalar_type(name);
            if rust == "String" {
                string_param(var)
            } else {
                (rust, format!("ArgumentValue::Str({}.to_string())", var))
            }
        }
        // objects/interfaces/unions are not valid argument types; accept a
        // pre-rendered literal so a misdeclared schema still generates
        _ => (
            "ArgumentValue".to_string(),
            var.to_string(),
        ),
    }
}

/// `ArgumentValue` conversion for a borrowed field, used by generated input
/// `to_argument` bodies where fields are read through `&self`
pub(crate) fn field_argument_expr(
    ty: &TypeRef,
    registry: &TypeRegistry,
    config: &GenerationConfig,
    var: &str,
) -> String {
    match ty {
        TypeRef::NonNull(inner) => field_argument_expr(inner, registry, config, var),
        TypeRef::List(inner) => {
            let iter = if inner.is_non_null() {
                format!("{}.iter()", var)
            } else {
                format!("{}.iter().flatten()", var)
            };
            let element = field_argument_expr(inner, registry, config, "item");
            format!("ArgumentValue::List({}.map(|item| {}).collect())", iter, element)
        }
        TypeRef::Named(name) => borrowed_leaf(name, registry, config, var),
    }
}

fn borrowed_leaf(
    name: &str,
    registry: &TypeRegistry,
    config: &GenerationConfig,
    var: &str,
) -> String {
    match name {
        "ID" | "String" => return format!("ArgumentValue::Str({}.clone())", var),
        "Int" => return format!("ArgumentValue::Int(*{})", var),
        "Float" => return format!("ArgumentValue::Float(*{})", var),
        "Boolean" => return format!("ArgumentValue::Bool(*{})", var),
        _ => {}
    }
    match registry.kind_of(name) {
        Some(TypeKind::Enum) => format!("ArgumentValue::from({}.clone())", var),
        Some(TypeKind::Input) => format!("{}.to_argument()", var),
        Some(TypeKind::Scalar) | None => {
            if config.scalar_type(name) == "String" {
                format!("ArgumentValue::Str({}.clone())", var)
            } else {
                format!("ArgumentValue::Str({}.to_string())", var)
            }
        }
        _ => format!("ArgumentValue::Str({}.to_string())", var),
    }
}

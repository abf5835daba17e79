//! data type emitter
//!
//! emits immutable value types for object, enum, and input schema types.
//! roots are never emitted here. inputs additionally get a fluent builder
//! (when enabled) and a `to_argument` bridge so operation builders can
//! inline-render them as graphql literals.

use crate::config::GenerationConfig;
use crate::emit::{field_argument_expr, file_header, push_doc, EmittedArtifact};
use crate::naming::{self, Category};
use crate::registry::{render_required_type, render_type, SchemaType, TypeRegistry};

/// emit an object type as a plain struct
pub fn emit_object(
    schema_type: &SchemaType,
    registry: &TypeRegistry,
    config: &GenerationConfig,
) -> EmittedArtifact {
    let class = naming::class_name(config, schema_type);
    let mut out = String::new();
    file_header(&mut out, "data type");
    out.push_str("use serde::{Deserialize, Serialize};\n\n");

    push_doc(&mut out, schema_type.description.as_deref(), "");
    out.push_str("#[derive(Debug, Clone, Serialize, Deserialize)]\n");
    out.push_str(&format!("pub struct {} {{\n", class));
    for field in &schema_type.fields {
        push_doc(&mut out, field.description.as_deref(), "    ");
        let rust_name = naming::to_rust_field(&field.name);
        if rust_name != field.name {
            out.push_str(&format!("    #[serde(rename = \"{}\")]\n", field.name));
        }
        let rendered = render_type(&field.ty, registry, config, false);
        out.push_str(&format!("    pub {}: {},\n", rust_name, rendered.expr));
    }
    out.push_str("}\n");

    EmittedArtifact::new(config, Category::Type, class, out)
}

/// emit an enum type with one constant per declared value, in declared
/// order, plus the literal-rendering bridge
pub fn emit_enum(schema_type: &SchemaType, config: &GenerationConfig) -> EmittedArtifact {
    let class = schema_type.name.clone();
    let mut out = String::new();
    file_header(&mut out, "enum type");
    out.push_str("use graphql_forge::ArgumentValue;\n");
    out.push_str("use serde::{Deserialize, Serialize};\n\n");

    push_doc(&mut out, schema_type.description.as_deref(), "");
    out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]\n");
    out.push_str(&format!("pub enum {} {{\n", class));
    for value in &schema_type.enum_values {
        push_doc(&mut out, value.description.as_deref(), "    ");
        // graphql enum values are already valid identifiers; carried unchanged
        out.push_str(&format!("    {},\n", value.name));
    }
    out.push_str("}\n\n");

    out.push_str(&format!("impl From<{}> for ArgumentValue {{\n", class));
    out.push_str(&format!("    fn from(value: {}) -> Self {{\n", class));
    out.push_str("        ArgumentValue::Enum(\n");
    out.push_str("            match value {\n");
    for value in &schema_type.enum_values {
        out.push_str(&format!(
            "                {}::{} => \"{}\",\n",
            class, value.name, value.name
        ));
    }
    out.push_str("            }\n");
    out.push_str("            .to_string(),\n");
    out.push_str("        )\n");
    out.push_str("    }\n");
    out.push_str("}\n");

    EmittedArtifact::new(config, Category::Type, class, out)
}

/// emit an input type: plain struct, optional fluent builder, and
/// `to_argument`
pub fn emit_input(
    schema_type: &SchemaType,
    registry: &TypeRegistry,
    config: &GenerationConfig,
) -> EmittedArtifact {
    let class = naming::class_name(config, schema_type);
    let builder = format!("{}Builder", class);
    let mut out = String::new();
    file_header(&mut out, "input type");
    out.push_str("use graphql_forge::ArgumentValue;\n");
    out.push_str("use serde::{Deserialize, Serialize};\n\n");

    push_doc(&mut out, schema_type.description.as_deref(), "");
    out.push_str("#[derive(Debug, Clone, Serialize, Deserialize)]\n");
    out.push_str(&format!("pub struct {} {{\n", class));
    for field in &schema_type.fields {
        push_doc(&mut out, field.description.as_deref(), "    ");
        let rust_name = naming::to_rust_field(&field.name);
        if rust_name != field.name {
            out.push_str(&format!("    #[serde(rename = \"{}\")]\n", field.name));
        }
        let rendered = render_type(&field.ty, registry, config, true);
        out.push_str(&format!("    pub {}: {},\n", rust_name, rendered.expr));
    }
    out.push_str("}\n\n");

    out.push_str(&format!("impl {} {{\n", class));
    if config.generate_builders() {
        out.push_str(&format!("    /// start building a {}\n", class));
        out.push_str(&format!("    pub fn builder() -> {} {{\n", builder));
        out.push_str(&format!("        {}::default()\n", builder));
        out.push_str("    }\n\n");
    }
    out.push_str("    /// render as a graphql input-object literal\n");
    out.push_str("    pub fn to_argument(&self) -> ArgumentValue {\n");
    out.push_str("        let mut pairs: Vec<(String, ArgumentValue)> = Vec::new();\n");
    for field in &schema_type.fields {
        let rust_name = naming::to_rust_field(&field.name);
        let expr = field_argument_expr(&field.ty, registry, config, "value");
        if field.ty.is_non_null() {
            out.push_str(&format!("        let value = &self.{};\n", rust_name));
            out.push_str(&format!(
                "        pairs.push((\"{}\".to_string(), {}));\n",
                field.name, expr
            ));
        } else {
            out.push_str(&format!(
                "        if let Some(value) = &self.{} {{\n",
                rust_name
            ));
            out.push_str(&format!(
                "            pairs.push((\"{}\".to_string(), {}));\n",
                field.name, expr
            ));
            out.push_str("        }\n");
        }
    }
    out.push_str("        ArgumentValue::Object(pairs)\n");
    out.push_str("    }\n");
    out.push_str("}\n");

    if config.generate_builders() {
        out.push('\n');
        out.push_str(&format!("/// fluent builder for [`{}`]\n", class));
        out.push_str("#[derive(Debug, Clone, Default)]\n");
        out.push_str(&format!("pub struct {} {{\n", builder));
        for field in &schema_type.fields {
            let rust_name = naming::to_rust_field(&field.name);
            let bare = render_required_type(&field.ty, registry, config, true);
            out.push_str(&format!("    {}: Option<{}>,\n", rust_name, bare));
        }
        out.push_str("}\n\n");

        out.push_str(&format!("impl {} {{\n", builder));
        for field in &schema_type.fields {
            let rust_name = naming::to_rust_field(&field.name);
            let bare = render_required_type(&field.ty, registry, config, true);
            let (param, assign) = if bare == "String" {
                ("impl Into<String>".to_string(), "value.into()".to_string())
            } else {
                (bare, "value".to_string())
            };
            push_doc(&mut out, field.description.as_deref(), "    ");
            out.push_str(&format!(
                "    pub fn {}(mut self, value: {}) -> Self {{\n",
                rust_name, param
            ));
            out.push_str(&format!("        self.{} = Some({});\n", rust_name, assign));
            out.push_str("        self\n");
            out.push_str("    }\n\n");
        }
        out.push_str(&format!("    /// build the immutable {}\n", class));
        out.push_str(&format!("    pub fn build(self) -> {} {{\n", class));
        out.push_str(&format!("        {} {{\n", class));
        for field in &schema_type.fields {
            let rust_name = naming::to_rust_field(&field.name);
            if field.ty.is_non_null() {
                out.push_str(&format!(
                    "            {}: self.{}.expect(\"{} is required\"),\n",
                    rust_name, rust_name, field.name
                ));
            } else {
                out.push_str(&format!("            {}: self.{},\n", rust_name, rust_name));
            }
        }
        out.push_str("        }\n");
        out.push_str("    }\n");
        out.push_str("}\n");
    }

    EmittedArtifact::new(config, Category::Input, class, out)
}

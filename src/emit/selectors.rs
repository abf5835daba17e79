//! field selector emitter
//!
//! emits one `<TypeName>Selector` per object type. selectors wrap the
//! runtime `SelectionSet` and expose a typed fluent method per schema
//! field; nested object fields take a configuration callback over the
//! referenced type's selector, looked up by name rather than generated
//! recursively, so cyclic schemas emit each selector exactly once.

use crate::config::GenerationConfig;
use crate::emit::{file_header, push_doc, EmittedArtifact};
use crate::naming::{self, Category};
use crate::registry::{SchemaType, TypeKind, TypeRegistry};

/// emit the selector class for an object type
pub fn emit_selector(
    schema_type: &SchemaType,
    registry: &TypeRegistry,
    config: &GenerationConfig,
) -> EmittedArtifact {
    let class = naming::selector_name(&schema_type.name);
    let mut out = String::new();
    file_header(&mut out, "field selector");
    out.push_str("use graphql_forge::SelectionSet;\n\n");

    out.push_str(&format!(
        "/// field selector for `{}`; field order in the built selection\n",
        schema_type.name
    ));
    out.push_str("/// follows call order\n");
    out.push_str("#[derive(Debug, Clone, Default)]\n");
    out.push_str(&format!("pub struct {} {{\n", class));
    out.push_str("    selection: SelectionSet,\n");
    out.push_str("}\n\n");

    out.push_str(&format!("impl {} {{\n", class));
    out.push_str("    /// create an empty selector\n");
    out.push_str("    pub fn new() -> Self {\n");
    out.push_str("        Self::default()\n");
    out.push_str("    }\n\n");

    for field in &schema_type.fields {
        let method = naming::to_rust_field(&field.name);
        let referenced = field.ty.named_type();
        push_doc(&mut out, field.description.as_deref(), "    ");
        match registry.kind_of(referenced) {
            Some(TypeKind::Object) => {
                let nested = naming::rust_path(
                    config,
                    Category::Query,
                    &naming::selector_name(referenced),
                );
                out.push_str(&format!(
                    "    pub fn {}(mut self, configure: impl FnOnce({nested}) -> {nested}) -> Self {{\n",
                    method,
                    nested = nested
                ));
                out.push_str(&format!(
                    "        let nested = configure({}::new()).build();\n",
                    nested
                ));
                out.push_str(&format!(
                    "        self.selection.nested(\"{}\", &nested);\n",
                    field.name
                ));
            }
            Some(TypeKind::Interface) | Some(TypeKind::Union) => {
                // no per-member selection surface; pin the discriminator
                out.push_str(&format!("    pub fn {}(mut self) -> Self {{\n", method));
                out.push_str(&format!(
                    "        self.selection.nested(\"{}\", \"{{ __typename }}\");\n",
                    field.name
                ));
            }
            _ => {
                out.push_str(&format!("    pub fn {}(mut self) -> Self {{\n", method));
                out.push_str(&format!(
                    "        self.selection.field(\"{}\");\n",
                    field.name
                ));
            }
        }
        out.push_str("        self\n");
        out.push_str("    }\n\n");
    }

    out.push_str("    /// render the accumulated selection set\n");
    out.push_str("    pub fn build(self) -> String {\n");
    out.push_str("        self.selection.render()\n");
    out.push_str("    }\n");
    out.push_str("}\n");

    EmittedArtifact::new(config, Category::Query, class, out)
}

//! query/mutation builder emitter
//!
//! emits the `QueryRoot` / `MutationRoot` entry classes plus one dedicated
//! builder per root field. builders collect typed arguments, optionally a
//! selection over the return type's selector, and finish into a runtime
//! `Operation<T>` carrying the rendered operation text and response type.

use crate::config::GenerationConfig;
use crate::emit::{argument_param, file_header, push_doc, EmittedArtifact};
use crate::naming::{self, Category};
use crate::operation::OperationKind;
use crate::registry::{render_type, FieldDef, SchemaType, TypeKind, TypeRegistry};

fn category_for(kind: OperationKind) -> Category {
    match kind {
        OperationKind::Query => Category::Query,
        OperationKind::Mutation => Category::Mutation,
    }
}

fn root_class(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Query => "QueryRoot",
        OperationKind::Mutation => "MutationRoot",
    }
}

/// emit the entry class with one method per root field
pub fn emit_operation_root(
    root: &SchemaType,
    kind: OperationKind,
    registry: &TypeRegistry,
    config: &GenerationConfig,
) -> EmittedArtifact {
    let category = category_for(kind);
    let class = root_class(kind);
    let mut out = String::new();
    file_header(&mut out, "operation root");

    out.push_str(&format!(
        "/// entry points for the schema's {} operations\n",
        kind.keyword()
    ));
    out.push_str(&format!("pub struct {};\n\n", class));
    out.push_str(&format!("impl {} {{\n", class));
    for field in &root.fields {
        let method = naming::to_rust_field(&field.name);
        let builder = naming::rust_path(
            config,
            category,
            &naming::builder_name(&field.name, kind),
        );
        let mut params = Vec::new();
        let mut forwards = Vec::new();
        for arg in &field.arguments {
            if !arg.is_required() {
                continue;
            }
            let var = naming::to_rust_field(&arg.name);
            let (param_ty, _) = argument_param(&arg.ty, registry, config, &var);
            params.push(format!("{}: {}", var, param_ty));
            forwards.push(var);
        }
        push_doc(&mut out, field.description.as_deref(), "    ");
        out.push_str(&format!(
            "    pub fn {}({}) -> {} {{\n",
            method,
            params.join(", "),
            builder
        ));
        out.push_str(&format!("        {}::new({})\n", builder, forwards.join(", ")));
        out.push_str("    }\n\n");
    }
    out.push_str("}\n");

    EmittedArtifact::new(config, category, class, out)
}

/// emit the dedicated builder class for one root field
pub fn emit_field_builder(
    field: &FieldDef,
    kind: OperationKind,
    registry: &TypeRegistry,
    config: &GenerationConfig,
) -> EmittedArtifact {
    let category = category_for(kind);
    let class = naming::builder_name(&field.name, kind);
    let return_type = field.ty.named_type();
    let return_kind = registry.kind_of(return_type);
    let selectable = matches!(return_kind, Some(TypeKind::Object));
    let response = render_type(&field.ty, registry, config, false).expr;

    let mut out = String::new();
    file_header(&mut out, "operation builder");
    out.push_str("use graphql_forge::{ArgumentValue, Operation, OperationKind};\n\n");

    push_doc(&mut out, field.description.as_deref(), "");
    out.push_str(&format!(
        "/// builder for the `{}` {}\n",
        field.name,
        kind.keyword()
    ));
    out.push_str("#[derive(Debug, Clone)]\n");
    out.push_str(&format!("pub struct {} {{\n", class));
    out.push_str("    arguments: Vec<(String, ArgumentValue)>,\n");
    if selectable {
        out.push_str("    selection: Option<String>,\n");
    }
    out.push_str("}\n\n");

    out.push_str(&format!("impl {} {{\n", class));

    // constructor takes the required arguments, fluent setters the rest
    let mut params = Vec::new();
    let mut pushes = Vec::new();
    for arg in &field.arguments {
        if !arg.is_required() {
            continue;
        }
        let var = naming::to_rust_field(&arg.name);
        let (param_ty, expr) = argument_param(&arg.ty, registry, config, &var);
        params.push(format!("{}: {}", var, param_ty));
        pushes.push(format!(
            "        arguments.push((\"{}\".to_string(), {}));\n",
            arg.name, expr
        ));
    }
    if params.is_empty() {
        out.push_str("    /// create the builder\n");
    } else {
        out.push_str("    /// create the builder with all required arguments\n");
    }
    out.push_str(&format!("    pub fn new({}) -> Self {{\n", params.join(", ")));
    if pushes.is_empty() {
        out.push_str("        let arguments: Vec<(String, ArgumentValue)> = Vec::new();\n");
    } else {
        out.push_str("        let mut arguments: Vec<(String, ArgumentValue)> = Vec::new();\n");
        for push in &pushes {
            out.push_str(push);
        }
    }
    if selectable {
        out.push_str("        Self { arguments, selection: None }\n");
    } else {
        out.push_str("        Self { arguments }\n");
    }
    out.push_str("    }\n\n");

    for arg in &field.arguments {
        if arg.is_required() {
            continue;
        }
        let var = naming::to_rust_field(&arg.name);
        let (param_ty, expr) = argument_param(&arg.ty, registry, config, "value");
        push_doc(&mut out, arg.description.as_deref(), "    ");
        out.push_str(&format!(
            "    /// set the optional `{}` argument ({})\n",
            arg.name,
            arg.ty.to_sdl()
        ));
        out.push_str(&format!(
            "    pub fn {}(mut self, value: {}) -> Self {{\n",
            var, param_ty
        ));
        out.push_str(&format!(
            "        self.arguments.push((\"{}\".to_string(), {}));\n",
            arg.name, expr
        ));
        out.push_str("        self\n");
        out.push_str("    }\n\n");
    }

    if selectable {
        let selector = naming::rust_path(
            config,
            Category::Query,
            &naming::selector_name(return_type),
        );
        out.push_str(&format!(
            "    /// configure the selection on the returned `{}`\n",
            return_type
        ));
        out.push_str(&format!(
            "    pub fn select(mut self, configure: impl FnOnce({selector}) -> {selector}) -> Self {{\n",
            selector = selector
        ));
        out.push_str(&format!(
            "        self.selection = Some(configure({}::new()).build());\n",
            selector
        ));
        out.push_str("        self\n");
        out.push_str("    }\n\n");
    }

    out.push_str("    /// build the executable operation\n");
    out.push_str(&format!("    pub fn build(self) -> Operation<{}> {{\n", response));
    let kind_expr = match kind {
        OperationKind::Query => "OperationKind::Query",
        OperationKind::Mutation => "OperationKind::Mutation",
    };
    // composite returns always carry a selection set; interface and union
    // returns have no per-member surface, so the discriminator is pinned
    // like selectors do for such fields
    let selection_expr = if selectable {
        "self.selection"
    } else if matches!(return_kind, Some(TypeKind::Interface | TypeKind::Union)) {
        "Some(\"{ __typename }\".to_string())"
    } else {
        "None"
    };
    out.push_str(&format!(
        "        Operation::new({}, \"{}\", self.arguments, {})\n",
        kind_expr, field.name, selection_expr
    ));
    out.push_str("    }\n");
    out.push_str("}\n");

    EmittedArtifact::new(config, category, class, out)
}

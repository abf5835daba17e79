//! naming and package planning
//!
//! computes packages, file paths, and class names for every generated
//! artifact category, plus the identifier conversions shared by all
//! emitters. the configurable suffixes apply only to plain data classes;
//! selectors and operation builders use fixed structural names.

use crate::config::GenerationConfig;
use crate::operation::OperationKind;
use crate::registry::{SchemaType, TypeKind};
use std::path::PathBuf;

/// generated artifact category, each with a fixed sub-package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Type,
    Input,
    Query,
    Mutation,
}

impl Category {
    /// fixed sub-package appended to the base package
    pub fn sub_package(&self) -> &'static str {
        match self {
            Category::Type => "type",
            Category::Input => "input",
            Category::Query => "query",
            Category::Mutation => "mutation",
        }
    }
}

/// dotted package for a category: base package + fixed sub-package
pub fn package_for(config: &GenerationConfig, category: Category) -> String {
    format!("{}.{}", config.package(), category.sub_package())
}

/// output directory for a category, under the configured output root
pub fn dir_for(config: &GenerationConfig, category: Category) -> PathBuf {
    let mut dir = config.output_dir().to_path_buf();
    for segment in config.package().split('.') {
        dir.push(segment);
    }
    dir.push(category.sub_package());
    dir
}

/// class name for a schema data type.
///
/// the configured suffix applies to object types (type category) and input
/// types (input category) only; enums never receive a suffix.
pub fn class_name(config: &GenerationConfig, schema_type: &SchemaType) -> String {
    match schema_type.kind {
        TypeKind::Object => format!("{}{}", schema_type.name, config.type_suffix()),
        TypeKind::Input => format!("{}{}", schema_type.name, config.input_suffix()),
        _ => schema_type.name.clone(),
    }
}

/// selector class name: always `<TypeName>Selector`, never suffixed
pub fn selector_name(type_name: &str) -> String {
    format!("{}Selector", type_name)
}

/// operation builder class name: `<FieldName>Query` / `<FieldName>Mutation`
pub fn builder_name(field_name: &str, kind: OperationKind) -> String {
    let suffix = match kind {
        OperationKind::Query => "Query",
        OperationKind::Mutation => "Mutation",
    };
    format!("{}{}", to_pascal(field_name), suffix)
}

/// fully qualified rust path for a generated class, assuming the output
/// tree is mounted at the crate root under the configured package
pub fn rust_path(config: &GenerationConfig, category: Category, class: &str) -> String {
    let mut out = String::from("crate");
    for segment in config.package().split('.') {
        out.push_str("::");
        out.push_str(&escape_keyword(segment));
    }
    out.push_str("::");
    out.push_str(&escape_keyword(category.sub_package()));
    out.push_str("::");
    out.push_str(class);
    out
}

/// convert a graphql name to PascalCase
pub fn to_pascal(name: &str) -> String {
    let mut out = String::new();
    let mut upper = true;
    for ch in name.chars() {
        if ch == '_' || ch == '-' {
            upper = true;
            continue;
        }
        if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// convert a graphql field name to a rust field/method identifier,
/// escaping keywords with `r#`
pub fn to_rust_field(name: &str) -> String {
    let mut out = String::new();
    for (idx, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if idx > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    escape_keyword(&out)
}

fn escape_keyword(name: &str) -> String {
    if is_rust_keyword(name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}

fn is_rust_keyword(name: &str) -> bool {
    matches!(
        name,
        "as" | "break"
            | "const"
            | "continue"
            | "crate"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "self"
            | "static"
            | "struct"
            | "super"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "async"
            | "await"
            | "dyn"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SchemaType;

    fn config() -> GenerationConfig {
        GenerationConfig::new("petstore.api", "out", "schema.graphql")
    }

    fn schema_type(name: &str, kind: TypeKind) -> SchemaType {
        SchemaType {
            name: name.to_string(),
            kind,
            description: None,
            fields: Vec::new(),
            enum_values: Vec::new(),
        }
    }

    #[test]
    fn test_packages_and_dirs() {
        let config = config();
        assert_eq!(package_for(&config, Category::Type), "petstore.api.type");
        assert_eq!(package_for(&config, Category::Mutation), "petstore.api.mutation");
        assert_eq!(
            dir_for(&config, Category::Input),
            PathBuf::from("out/petstore/api/input")
        );
    }

    #[test]
    fn test_class_name_suffix_rules() {
        let plain = config();
        let suffixed = config().with_type_suffix("Type").with_input_suffix("Dto");

        let user = schema_type("User", TypeKind::Object);
        assert_eq!(class_name(&plain, &user), "User");
        assert_eq!(class_name(&suffixed, &user), "UserType");

        let input = schema_type("CreateUserInput", TypeKind::Input);
        assert_eq!(class_name(&plain, &input), "CreateUserInput");
        assert_eq!(class_name(&suffixed, &input), "CreateUserInputDto");

        // blind append: a configured `Input` suffix doubles up
        let doubled = config().with_input_suffix("Input");
        assert_eq!(class_name(&doubled, &input), "CreateUserInputInput");

        let status = schema_type("Status", TypeKind::Enum);
        assert_eq!(class_name(&suffixed, &status), "Status");
    }

    #[test]
    fn test_structural_names_never_suffixed() {
        assert_eq!(selector_name("User"), "UserSelector");
        assert_eq!(builder_name("user", OperationKind::Query), "UserQuery");
        assert_eq!(builder_name("createUser", OperationKind::Mutation), "CreateUserMutation");
        assert_eq!(builder_name("user_by_id", OperationKind::Query), "UserByIdQuery");
    }

    #[test]
    fn test_rust_path_escapes_keyword_segments() {
        let config = config();
        assert_eq!(
            rust_path(&config, Category::Type, "User"),
            "crate::petstore::api::r#type::User"
        );
        assert_eq!(
            rust_path(&config, Category::Query, "UserSelector"),
            "crate::petstore::api::query::UserSelector"
        );
    }

    #[test]
    fn test_to_rust_field() {
        assert_eq!(to_rust_field("createdAt"), "created_at");
        assert_eq!(to_rust_field("id"), "id");
        assert_eq!(to_rust_field("type"), "r#type");
        assert_eq!(to_rust_field("URL"), "u_r_l");
    }

    #[test]
    fn test_to_pascal() {
        assert_eq!(to_pascal("createUser"), "CreateUser");
        assert_eq!(to_pascal("user_by_id"), "UserById");
        assert_eq!(to_pascal("user"), "User");
    }
}

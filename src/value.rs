//! graphql argument literals
//!
//! [`ArgumentValue`] is the closed value model used by generated operation
//! builders to render argument literals. graphql argument literals and
//! selection values share one grammar, so this is the single rendering
//! path for both.

use std::fmt;

/// a graphql argument literal, decided at generation time from the schema's
/// declared argument type
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    /// string literal, quoted and escaped on render
    Str(String),
    /// integer literal
    Int(i64),
    /// float literal
    Float(f64),
    /// boolean literal
    Bool(bool),
    /// enum value, rendered as a bare identifier
    Enum(String),
    /// list literal, elements rendered recursively
    List(Vec<ArgumentValue>),
    /// input-object literal, ordered key/value pairs
    Object(Vec<(String, ArgumentValue)>),
    /// variable reference, rendered verbatim with a `$` sigil and never
    /// escaped as a string
    Var(String),
}

impl ArgumentValue {
    /// render as a graphql literal token
    pub fn render(&self) -> String {
        match self {
            ArgumentValue::Str(value) => format!("\"{}\"", escape_string(value)),
            ArgumentValue::Int(value) => value.to_string(),
            ArgumentValue::Float(value) => value.to_string(),
            ArgumentValue::Bool(value) => value.to_string(),
            ArgumentValue::Enum(name) => name.clone(),
            ArgumentValue::List(items) => {
                let rendered: Vec<String> = items.iter().map(|item| item.render()).collect();
                format!("[{}]", rendered.join(", "))
            }
            ArgumentValue::Object(pairs) => {
                let rendered: Vec<String> = pairs
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value.render()))
                    .collect();
                format!("{{{}}}", rendered.join(", "))
            }
            ArgumentValue::Var(name) => format!("${}", name),
        }
    }
}

impl fmt::Display for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// render a named argument list: `(a: 1, b: "x")`, empty string for no args
pub fn render_arguments(arguments: &[(String, ArgumentValue)]) -> String {
    if arguments.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = arguments
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value.render()))
        .collect();
    format!("({})", rendered.join(", "))
}

fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

impl From<String> for ArgumentValue {
    fn from(value: String) -> Self {
        ArgumentValue::Str(value)
    }
}

impl From<&str> for ArgumentValue {
    fn from(value: &str) -> Self {
        ArgumentValue::Str(value.to_string())
    }
}

impl From<i64> for ArgumentValue {
    fn from(value: i64) -> Self {
        ArgumentValue::Int(value)
    }
}

impl From<f64> for ArgumentValue {
    fn from(value: f64) -> Self {
        ArgumentValue::Float(value)
    }
}

impl From<bool> for ArgumentValue {
    fn from(value: bool) -> Self {
        ArgumentValue::Bool(value)
    }
}

impl<T: Into<ArgumentValue>> From<Vec<T>> for ArgumentValue {
    fn from(values: Vec<T>) -> Self {
        ArgumentValue::List(values.into_iter().map(Into::into).collect())
    }
}

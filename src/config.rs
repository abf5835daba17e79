//! generation configuration
//!
//! build a [`GenerationConfig`] with the target package, output directory,
//! and schema path, then pass it to [`crate::Generator::new`]. optional
//! knobs (scalar mappings, class-name suffixes, input builders) use the
//! same chained `with_*` style as the client config.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// built-in custom scalar mappings, overridable per entry.
///
/// applied after the fixed graphql built-ins (`ID`, `String`, `Int`,
/// `Float`, `Boolean`); any declared scalar absent from the map falls back
/// to `String`.
pub const DEFAULT_SCALAR_MAP: &[(&str, &str)] = &[
    ("BigDecimal", "f64"),
    ("Date", "String"),
    ("DateTime", "String"),
    ("Long", "i64"),
    ("Time", "String"),
    ("URL", "String"),
    ("UUID", "String"),
];

/// configuration for one generation run
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// dotted output package, e.g. `petstore.api`
    pub(crate) package: String,

    /// root directory generated files are written under
    pub(crate) output_dir: PathBuf,

    /// sdl source path; read by [`crate::Generator::run`] and echoed in
    /// diagnostics
    pub(crate) schema_path: PathBuf,

    /// custom scalar name to rust type name
    pub(crate) scalar_map: BTreeMap<String, String>,

    /// suffix appended to object type class names
    pub(crate) type_suffix: String,

    /// suffix appended to input type class names
    pub(crate) input_suffix: String,

    /// whether input types get a fluent builder
    pub(crate) generate_builders: bool,
}

impl GenerationConfig {
    /// create a configuration with the three mandatory fields
    pub fn new(
        package: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        schema_path: impl Into<PathBuf>,
    ) -> Self {
        let scalar_map = DEFAULT_SCALAR_MAP
            .iter()
            .map(|(name, ty)| (name.to_string(), ty.to_string()))
            .collect();
        Self {
            package: package.into(),
            output_dir: output_dir.into(),
            schema_path: schema_path.into(),
            scalar_map,
            type_suffix: String::new(),
            input_suffix: String::new(),
            generate_builders: true,
        }
    }

    /// map a custom scalar to a rust type, overriding any default entry
    pub fn with_scalar(mut self, name: impl Into<String>, rust_type: impl Into<String>) -> Self {
        self.scalar_map.insert(name.into(), rust_type.into());
        self
    }

    /// set the suffix appended to object type class names
    ///
    /// default: empty
    pub fn with_type_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.type_suffix = suffix.into();
        self
    }

    /// set the suffix appended to input type class names
    ///
    /// the suffix is appended blindly: an input already named
    /// `CreateUserInput` with suffix `Input` emits `CreateUserInputInput`.
    ///
    /// default: empty
    pub fn with_input_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.input_suffix = suffix.into();
        self
    }

    /// toggle fluent builders on generated input types
    ///
    /// default: enabled
    pub fn with_builders(mut self, generate: bool) -> Self {
        self.generate_builders = generate;
        self
    }

    /// target package
    pub fn package(&self) -> &str {
        &self.package
    }

    /// output root
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// sdl source path
    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    /// suffix applied to object type class names
    pub fn type_suffix(&self) -> &str {
        &self.type_suffix
    }

    /// suffix applied to input type class names
    pub fn input_suffix(&self) -> &str {
        &self.input_suffix
    }

    /// whether input types get a fluent builder
    pub fn generate_builders(&self) -> bool {
        self.generate_builders
    }

    /// resolve a named scalar through the map, with the `String` fallback
    pub(crate) fn scalar_type(&self, name: &str) -> String {
        self.scalar_map
            .get(name)
            .cloned()
            .unwrap_or_else(|| "String".to_string())
    }

    /// validate mandatory fields before any schema processing
    pub(crate) fn validate(&self) -> Result<()> {
        if self.package.is_empty() {
            return Err(Error::Config("package name cannot be empty".to_string()));
        }
        for segment in self.package.split('.') {
            if !is_identifier(segment) {
                return Err(Error::Config(format!(
                    "invalid package segment: {:?} in {}",
                    segment, self.package
                )));
            }
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::Config("output directory cannot be empty".to_string()));
        }
        if self.schema_path.as_os_str().is_empty() {
            return Err(Error::Config("schema path cannot be empty".to_string()));
        }
        Ok(())
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

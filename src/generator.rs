//! generation orchestrator
//!
//! drives the emitters in dependency order (types, then selectors, then
//! operation builders), plans every artifact in memory, and only then
//! writes files. fails fast on the first error; files already written stay
//! on disk, a rerun regenerates them byte-identically.

use crate::config::GenerationConfig;
use crate::emit::{operations, selectors, types, EmittedArtifact};
use crate::error::{Error, Result};
use crate::naming;
use crate::operation::OperationKind;
use crate::registry::{SchemaType, TypeKind, TypeRegistry};
use std::fs;
use std::path::{Path, PathBuf};

/// orchestrator step, advanced as generation proceeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Parsing,
    EmittingTypes,
    EmittingSelectors,
    EmittingOperations,
    Writing,
    Done,
    Failed,
}

/// summary of one generation run
#[derive(Debug, Clone)]
pub struct GenerationResult {
    files_written: usize,
    output_root: PathBuf,
}

impl GenerationResult {
    /// number of files written
    pub fn files_written(&self) -> usize {
        self.files_written
    }

    /// configured output root
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }
}

/// single-pass, single-threaded schema-to-source generator
#[derive(Debug)]
pub struct Generator {
    config: GenerationConfig,
    phase: Phase,
}

impl Generator {
    /// create a generator, validating the configuration up front so a bad
    /// config never leaves partial output
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            phase: Phase::NotStarted,
        })
    }

    /// current orchestrator phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// the configuration this generator runs with
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// read the configured schema path and generate from it
    pub fn run(&mut self) -> Result<GenerationResult> {
        let sdl = match fs::read_to_string(self.config.schema_path()) {
            Ok(sdl) => sdl,
            Err(err) => {
                self.phase = Phase::Failed;
                return Err(Error::Io(err));
            }
        };
        self.generate(&sdl)
    }

    /// generate from sdl text into the configured output directory
    pub fn generate(&mut self, sdl: &str) -> Result<GenerationResult> {
        match self.generate_inner(sdl) {
            Ok(result) => {
                self.phase = Phase::Done;
                Ok(result)
            }
            Err(err) => {
                self.phase = Phase::Failed;
                Err(err)
            }
        }
    }

    fn generate_inner(&mut self, sdl: &str) -> Result<GenerationResult> {
        self.phase = Phase::Parsing;
        let registry = TypeRegistry::parse(sdl)?;

        let mut artifacts = Vec::new();

        self.phase = Phase::EmittingTypes;
        for schema_type in registry.types() {
            if registry.is_root(&schema_type.name) {
                continue;
            }
            match schema_type.kind {
                TypeKind::Object => {
                    artifacts.push(types::emit_object(schema_type, &registry, &self.config));
                }
                TypeKind::Enum => {
                    artifacts.push(types::emit_enum(schema_type, &self.config));
                }
                TypeKind::Input => {
                    artifacts.push(types::emit_input(schema_type, &registry, &self.config));
                }
                _ => {}
            }
        }

        self.phase = Phase::EmittingSelectors;
        for schema_type in registry.types() {
            if schema_type.kind == TypeKind::Object && !registry.is_root(&schema_type.name) {
                artifacts.push(selectors::emit_selector(schema_type, &registry, &self.config));
            }
        }

        self.phase = Phase::EmittingOperations;
        let roots = [
            (registry.query_type(), OperationKind::Query),
            (registry.mutation_type(), OperationKind::Mutation),
        ];
        for (root_name, kind) in roots {
            let Some(root_name) = root_name else { continue };
            let root = self.resolve_root(&registry, root_name)?;
            artifacts.push(operations::emit_operation_root(
                root,
                kind,
                &registry,
                &self.config,
            ));
            for field in &root.fields {
                artifacts.push(operations::emit_field_builder(
                    field,
                    kind,
                    &registry,
                    &self.config,
                ));
            }
        }

        self.phase = Phase::Writing;
        let files_written = self.write(&artifacts)?;

        Ok(GenerationResult {
            files_written,
            output_root: self.config.output_dir().to_path_buf(),
        })
    }

    fn resolve_root<'a>(
        &self,
        registry: &'a TypeRegistry,
        name: &str,
    ) -> Result<&'a SchemaType> {
        match registry.get(name) {
            Some(root) if root.kind == TypeKind::Object => Ok(root),
            Some(_) => Err(Error::SchemaSemantic(format!(
                "root type {} is not an object type",
                name
            ))),
            None => Err(Error::SchemaSemantic(format!(
                "schema declares root type {} but it is not defined",
                name
            ))),
        }
    }

    fn write(&self, artifacts: &[EmittedArtifact]) -> Result<usize> {
        let mut written = 0;
        for artifact in artifacts {
            let dir = naming::dir_for(&self.config, artifact.category);
            fs::create_dir_all(&dir)?;
            fs::write(dir.join(artifact.file_name()), &artifact.source)?;
            written += 1;
        }
        Ok(written)
    }
}

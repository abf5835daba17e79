//! graphql-forge
//!
//! generates a typed rust client from a graphql sdl schema: plain data
//! types, fluent field selectors, and query/mutation builders, plus the
//! thin runtime (`SelectionSet`, `ArgumentValue`, `Operation`, `Client`)
//! the generated code runs on.
//!
//! ## generating
//!
//! ```no_run
//! use graphql_forge::{GenerationConfig, Generator};
//!
//! # fn example() -> graphql_forge::Result<()> {
//! let config = GenerationConfig::new("petstore.api", "src/generated", "schema.graphql")
//!     .with_scalar("DateTime", "String");
//! let mut generator = Generator::new(config)?;
//! let result = generator.run()?;
//! println!("wrote {} files under {}", result.files_written(), result.output_root().display());
//! # Ok(())
//! # }
//! ```
//!
//! ## executing a generated operation
//!
//! generated builders produce an [`Operation`]; hand it to [`Client`]:
//!
//! ```no_run
//! use graphql_forge::{Client, ClientConfig};
//!
//! # async fn example(op: graphql_forge::Operation<serde_json::Value>) -> graphql_forge::Result<()> {
//! let client = Client::new(ClientConfig::new("https://api.example.com/graphql"))?;
//! let response = client.execute_operation(&op).await?;
//! println!("{:?}", response.data);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
pub mod emit;
mod error;
mod generator;
mod graphql;
pub mod naming;
mod operation;
pub mod registry;
mod selection;
mod value;

pub use client::{Client, ClientConfig};
pub use config::{GenerationConfig, DEFAULT_SCALAR_MAP};
pub use emit::EmittedArtifact;
pub use error::{Error, Result};
pub use generator::{GenerationResult, Generator, Phase};
pub use graphql::{GraphQlError, GraphQlLocation, GraphQlResponse};
pub use operation::{Operation, OperationKind};
pub use registry::{TypeRef, TypeRegistry};
pub use selection::SelectionSet;
pub use value::ArgumentValue;

//! error types
//!
//! structured errors for configuration, schema parsing, emission, io, and
//! graphql responses.

use crate::graphql::GraphQlError;
use std::fmt;

/// library result type
pub type Result<T> = std::result::Result<T, Error>;

/// error type for the generator core and the runtime client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// missing or invalid generation / client configuration
    #[error("config error: {0}")]
    Config(String),

    /// malformed sdl, surfaced from the parser verbatim
    #[error("schema syntax error: {0}")]
    SchemaSyntax(String),

    /// structurally valid sdl referencing undeclared type names
    #[error("schema semantic error: {0}")]
    SchemaSemantic(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url error: {0}")]
    Url(#[from] url::ParseError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("graphql error: {message}")]
    GraphQl {
        /// http status if available
        status: Option<u16>,
        /// graphql error list
        errors: Vec<GraphQlError>,
        /// raw response body
        body: String,
        /// top-level message
        message: String,
    },
}

impl Error {
    /// true if the error originated in the schema (syntax or semantics)
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Error::SchemaSyntax(_) | Error::SchemaSemantic(_))
    }

    /// true if the error looks like an auth failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::GraphQl { status: Some(401 | 403), .. })
            || matches!(self, Error::Http(err) if err.status() == Some(reqwest::StatusCode::UNAUTHORIZED))
    }
}

impl fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

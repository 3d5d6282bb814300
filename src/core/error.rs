//! Error types for Semdex

use thiserror::Error;

use crate::index::types::Location;

/// Result type alias using Semdex's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Semdex error types
///
/// Only fatal conditions surface here. Recoverable conditions (orphan
/// captures, unknown capture names, ERROR subtrees, duplicate scopes) are
/// handled locally by the pipeline and logged via `tracing`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported language: {language}")]
    UnsupportedLanguage { language: String },

    #[error("Malformed declaration: `{node_kind}` node is missing its `{field}` field at {location}")]
    MissingCstField {
        node_kind: String,
        field: String,
        location: Location,
    },

    #[error("Failed to parse {language} source: {message}")]
    ParseFailed { language: String, message: String },

    #[error("Invalid capture query for {language}: {message}")]
    InvalidQuery { language: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

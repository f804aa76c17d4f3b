//! Error types for loading statement files.

use std::path::PathBuf;

use oxide_query::QueryError;

/// Errors that can occur while loading or compiling a statement file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// IO error reading the statement file.
    #[error("IO error reading '{path}': {source}")]
    Io {
        /// Path to the statement file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not a valid statement description.
    #[error("Invalid statement file: {0}")]
    Json(#[from] serde_json::Error),

    /// A value cannot be used where it was given.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        /// Where the value was found.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// Compilation failed.
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Result type alias for statement loading.
pub type Result<T> = std::result::Result<T, LoadError>;

//! # oxide-query-cli
//!
//! Loads JSON statement descriptions and compiles them with
//! [`oxide_query::QueryBuilder`]. The `oxide-query` binary is a thin wrapper
//! around [`compile_file`].

pub mod description;
pub mod error;

use std::path::Path;

use tracing::debug;

use oxide_query::{QueryBuilder, QueryObject};

pub use description::{parse_descriptions, StatementDescription};
pub use error::{LoadError, Result};

/// Reads a description file and compiles every statement in it, in order.
///
/// # Errors
///
/// Fails when the file cannot be read or parsed, or when any statement
/// fails to compile.
pub fn compile_file(path: &Path, base: &QueryBuilder) -> Result<Vec<QueryObject>> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let descriptions = parse_descriptions(&content)?;
    debug!(
        path = %path.display(),
        statements = descriptions.len(),
        "loaded statement descriptions"
    );

    let mut compiled = vec![];
    for description in &descriptions {
        compiled.extend(description.compile(base)?);
    }
    Ok(compiled)
}

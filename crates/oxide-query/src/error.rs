//! Error types for statement compilation.

use thiserror::Error;

use crate::query::Action;

/// Errors raised while selecting an adapter or compiling a statement.
///
/// Compilation is deterministic, so none of these are transient: the same
/// input always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The statement has no table to read from or write to.
    #[error("no table specified")]
    NoTable,

    /// A mutating statement was given an empty payload.
    #[error("no data given for {action}")]
    NoData {
        /// The action that required data.
        action: Action,
    },

    /// A filter condition lacks a required part.
    #[error("malformed criterion on {key}: missing {missing}")]
    MalformedCriterion {
        /// The condition's key as the caller wrote it.
        key: String,
        /// Which part is missing (`operator` or `value`).
        missing: &'static str,
    },

    /// The requested action is not one the compiler knows.
    #[error("{0} is not a known type")]
    UnknownAction(String),

    /// A keyword argument such as a sort direction was not recognised.
    #[error("unknown {kind} {value}")]
    UnknownKeyword {
        /// What was being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// The dialect cannot express the requested statement.
    #[error("{feature} is not supported by the {dialect} dialect")]
    UnsupportedFeature {
        /// The statement feature, e.g. `INSERT IGNORE`.
        feature: &'static str,
        /// The dialect name.
        dialect: &'static str,
    },

    /// No statement adapter exists for the requested dialect.
    #[error("no statement adapter for dialect {0}")]
    UnsupportedDialect(String),
}

/// Broad category of a [`QueryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required fragment is missing from the statement.
    Malformed,
    /// The action or feature cannot be compiled.
    Unsupported,
    /// The dialect could not be constructed.
    Dialect,
}

impl QueryError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoTable | Self::NoData { .. } | Self::MalformedCriterion { .. } => {
                ErrorKind::Malformed
            }
            Self::UnknownAction(_)
            | Self::UnknownKeyword { .. }
            | Self::UnsupportedFeature { .. } => ErrorKind::Unsupported,
            Self::UnsupportedDialect(_) => ErrorKind::Dialect,
        }
    }

    /// Returns true if the statement itself is incomplete.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self.kind(), ErrorKind::Malformed)
    }
}

/// Result type alias for compilation.
pub type Result<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(QueryError::NoTable.kind(), ErrorKind::Malformed);
        assert_eq!(
            QueryError::UnknownAction("truncate".into()).kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(
            QueryError::UnsupportedDialect("oracle".into()).kind(),
            ErrorKind::Dialect
        );
        assert!(QueryError::NoData {
            action: Action::Update
        }
        .is_malformed());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(QueryError::NoTable.to_string(), "no table specified");
        assert_eq!(
            QueryError::UnknownAction("truncate".into()).to_string(),
            "truncate is not a known type"
        );
        assert_eq!(
            QueryError::NoData {
                action: Action::Insert
            }
            .to_string(),
            "no data given for insert"
        );
        assert_eq!(
            QueryError::UnsupportedFeature {
                feature: "REPLACE",
                dialect: "pgsql"
            }
            .to_string(),
            "REPLACE is not supported by the pgsql dialect"
        );
    }
}

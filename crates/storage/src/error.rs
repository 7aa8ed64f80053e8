//! Typed error enum for the storage layer.
//!
//! Each variant maps to one failure class of the item store so callers can
//! decide per operation whether to abort, log and continue, or retry.

use thiserror::Error;
use vecstore_core::CoreError;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Could not open a connection to the database.
    #[error("connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// `CREATE EXTENSION vector` failed (missing package, no privilege).
    #[error("vector extension setup failed: {0}")]
    ExtensionSetup(#[source] sqlx::Error),

    /// Creating or dropping the items table failed.
    #[error("schema setup failed: {0}")]
    SchemaSetup(#[source] sqlx::Error),

    /// The existing table was created for a different embedding size.
    #[error("table {table} stores {actual}-dimensional vectors, expected {expected}")]
    SchemaMismatch { table: String, expected: usize, actual: usize },

    /// INSERT failed; the transaction was rolled back.
    #[error("insert failed: {0}")]
    Insert(#[source] sqlx::Error),

    /// Nearest-neighbor SELECT failed.
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// Any other SQL failure (count, lookup).
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Embedding length differs from the store's configured dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Embedding has a NaN or infinite component.
    #[error("invalid vector: {0}")]
    InvalidVector(#[source] CoreError),

    /// `limit` must be at least 1.
    #[error("invalid limit: {0}")]
    InvalidLimit(usize),

    /// Bad store configuration (table name).
    #[error("invalid configuration: {0}")]
    Config(#[source] CoreError),

    /// Row data could not be decoded into a domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Connection(e) | Self::Insert(e) | Self::Query(e) | Self::Database(e) => {
                matches!(e, sqlx::Error::PoolTimedOut | sqlx::Error::Io(_))
            },
            _ => false,
        }
    }

    /// Whether the caller handed in bad data, as opposed to a backend failure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. } | Self::InvalidVector(_) | Self::InvalidLimit(_)
        )
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_is_transient() {
        assert!(StorageError::Query(sqlx::Error::PoolTimedOut).is_transient());
        assert!(!StorageError::SchemaSetup(sqlx::Error::PoolTimedOut).is_transient());
        assert!(!StorageError::InvalidLimit(0).is_transient());
    }

    #[test]
    fn dimension_mismatch_is_invalid_input() {
        let err = StorageError::DimensionMismatch { expected: 384, actual: 10 };
        assert!(err.is_invalid_input());
        assert_eq!(err.to_string(), "dimension mismatch: expected 384, got 10");
    }
}

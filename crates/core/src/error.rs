use thiserror::Error;

/// Errors from the core helpers (vector literal codec, configuration).
#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("invalid vector literal: {0}")]
    InvalidVectorLiteral(String),

    #[error("non-finite vector component at index {index}")]
    NonFiniteComponent { index: usize },

    #[error("invalid table name: {0:?}")]
    InvalidTableName(String),
}

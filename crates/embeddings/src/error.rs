//! Failures of the sentence-embedding model.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Model files could not be fetched or the ONNX session failed to start.
    #[error("cannot load embedding model {model}: {reason}")]
    ModelInit { model: &'static str, reason: String },
    #[error("embedding model lock poisoned by a panicked caller")]
    LockPoisoned,
    #[error("embedding model returned no vector")]
    EmptyResult,
    #[error("embedding model failed on input: {0}")]
    Generation(String),
    /// The model answered with a vector the store cannot hold.
    #[error("model produced {actual}-dimensional vector, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_init_names_the_model() {
        let err = EmbeddingError::ModelInit {
            model: "all-MiniLM-L6-v2",
            reason: "no network".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("all-MiniLM-L6-v2"), "{msg}");
        assert!(msg.contains("no network"), "{msg}");
    }
}

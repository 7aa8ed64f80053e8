//! Embedding generation for semantic search.
//!
//! `EmbeddingService` wraps a fastembed `all-MiniLM-L6-v2` model. It is built
//! once by the caller and shared through `Arc`; the model is never stored in a
//! global.

pub mod error;

use std::sync::Mutex;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use vecstore_core::{EMBEDDING_DIMENSION, EMBEDDING_MODEL_NAME};

pub use error::EmbeddingError;

/// Text → fixed-length vector. Implementations must be deterministic for a
/// given model version and always return `dimension()` components.
pub trait EmbeddingProvider: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    fn dimension(&self) -> usize;
}

/// Local sentence-embedding model (384 dimensions, ONNX runtime).
pub struct EmbeddingService {
    model: Mutex<TextEmbedding>,
}

impl EmbeddingService {
    /// Load the model. The first run downloads the weights (~90MB) into the
    /// fastembed cache, so this can take seconds.
    pub fn new() -> Result<Self, EmbeddingError> {
        tracing::info!(model = EMBEDDING_MODEL_NAME, "loading embedding model");
        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(true),
        )
        .map_err(|e| EmbeddingError::ModelInit {
            model: EMBEDDING_MODEL_NAME,
            reason: e.to_string(),
        })?;
        tracing::info!(
            model = EMBEDDING_MODEL_NAME,
            dimension = EMBEDDING_DIMENSION,
            "embedding model loaded"
        );
        Ok(Self { model: Mutex::new(model) })
    }

    fn check_dimension(vector: Vec<f32>) -> Result<Vec<f32>, EmbeddingError> {
        match vector.len() {
            0 => Err(EmbeddingError::EmptyResult),
            EMBEDDING_DIMENSION => Ok(vector),
            actual => {
                Err(EmbeddingError::DimensionMismatch { expected: EMBEDDING_DIMENSION, actual })
            },
        }
    }
}

impl std::fmt::Debug for EmbeddingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingService").field("model", &EMBEDDING_MODEL_NAME).finish()
    }
}

impl EmbeddingProvider for EmbeddingService {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut model = self.model.lock().map_err(|_| EmbeddingError::LockPoisoned)?;
        let vector = model
            .embed(vec![text], None)
            .map_err(|e| EmbeddingError::Generation(e.to_string()))?
            .into_iter()
            .next()
            .ok_or(EmbeddingError::EmptyResult)?;
        Self::check_dimension(vector)
    }

    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION
    }
}

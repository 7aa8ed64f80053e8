//! Storage backend trait abstraction
//!
//! Defines the async item-store contract shared by the PostgreSQL and
//! in-memory backends, plus the input checks every backend applies.

use async_trait::async_trait;
use vecstore_core::{first_non_finite, CoreError, Item, ItemId, NearestMatch};

use crate::error::StorageError;

/// A table of `(id, content, embedding)` rows searchable by L2 distance.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Number of components every stored embedding must have.
    fn dimension(&self) -> usize;

    /// Make sure the vector column type is available (`CREATE EXTENSION IF NOT EXISTS`).
    async fn ensure_extension(&self) -> Result<(), StorageError>;

    /// Create the items table if missing. Idempotent.
    async fn ensure_table(&self) -> Result<(), StorageError>;

    /// Drop and recreate the items table. Destroys all rows and restarts ids.
    async fn reset_table(&self) -> Result<(), StorageError>;

    /// Append a row and return its id. Either the whole row lands or nothing does.
    async fn insert(&self, content: &str, embedding: &[f32]) -> Result<ItemId, StorageError>;

    /// The `limit` rows closest to `query` by L2 distance, nearest first,
    /// ties broken by ascending id. Empty table gives an empty vec.
    async fn query_nearest(
        &self,
        query: &[f32],
        limit: usize,
    ) -> Result<Vec<NearestMatch>, StorageError>;

    /// Fetch a single row by id.
    async fn get(&self, id: ItemId) -> Result<Option<Item>, StorageError>;

    /// Number of stored rows.
    async fn count(&self) -> Result<u64, StorageError>;

    /// Extension plus table, idempotently.
    async fn ensure_schema(&self) -> Result<(), StorageError> {
        self.ensure_extension().await?;
        self.ensure_table().await
    }

    /// Extension plus a freshly recreated table. Not safe on production data.
    async fn reset_schema(&self) -> Result<(), StorageError> {
        self.ensure_extension().await?;
        self.reset_table().await
    }
}

/// Reject embeddings of the wrong length or with non-finite components.
pub fn validate_embedding(expected: usize, embedding: &[f32]) -> Result<(), StorageError> {
    if embedding.len() != expected {
        return Err(StorageError::DimensionMismatch { expected, actual: embedding.len() });
    }
    if let Some(index) = first_non_finite(embedding) {
        return Err(StorageError::InvalidVector(CoreError::NonFiniteComponent { index }));
    }
    Ok(())
}

/// `limit` must be at least 1. There is no upper bound at this layer.
pub fn validate_limit(limit: usize) -> Result<usize, StorageError> {
    if limit == 0 {
        return Err(StorageError::InvalidLimit(limit));
    }
    Ok(limit)
}

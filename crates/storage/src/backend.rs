//! Unified storage backend with enum dispatch.

use std::sync::Arc;

use async_trait::async_trait;
use vecstore_core::{DbConfig, Item, ItemId, NearestMatch};

use crate::error::StorageError;
use crate::memory::MemoryStore;
use crate::pg_storage::PgStorage;
use crate::traits::VectorStore;

macro_rules! dispatch {
    ($self:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Postgres(s) => <PgStorage as VectorStore>::$method(s, $($arg),*).await,
            StorageBackend::Memory(s) => <MemoryStore as VectorStore>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    Postgres(PgStorage),
    Memory(Arc<MemoryStore>),
}

impl StorageBackend {
    pub async fn new_postgres(config: &DbConfig) -> Result<Self, StorageError> {
        Ok(Self::Postgres(PgStorage::connect(config).await?))
    }

    pub fn new_memory(dimension: usize) -> Self {
        Self::Memory(Arc::new(MemoryStore::new(dimension)))
    }

    /// Release the underlying connection, if any.
    pub async fn close(self) {
        match self {
            Self::Postgres(s) => s.close().await,
            Self::Memory(_) => {},
        }
    }
}

#[async_trait]
impl VectorStore for StorageBackend {
    fn dimension(&self) -> usize {
        match self {
            Self::Postgres(s) => s.dimension(),
            Self::Memory(s) => s.dimension(),
        }
    }

    async fn ensure_extension(&self) -> Result<(), StorageError> {
        dispatch!(self, ensure_extension())
    }

    async fn ensure_table(&self) -> Result<(), StorageError> {
        dispatch!(self, ensure_table())
    }

    async fn reset_table(&self) -> Result<(), StorageError> {
        dispatch!(self, reset_table())
    }

    async fn insert(&self, content: &str, embedding: &[f32]) -> Result<ItemId, StorageError> {
        dispatch!(self, insert(content, embedding))
    }

    async fn query_nearest(
        &self,
        query: &[f32],
        limit: usize,
    ) -> Result<Vec<NearestMatch>, StorageError> {
        dispatch!(self, query_nearest(query, limit))
    }

    async fn get(&self, id: ItemId) -> Result<Option<Item>, StorageError> {
        dispatch!(self, get(id))
    }

    async fn count(&self) -> Result<u64, StorageError> {
        dispatch!(self, count())
    }
}

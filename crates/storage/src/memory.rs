//! In-process item store with the same contract as the PostgreSQL backend.
//!
//! Nearest-neighbor search is an exact full scan, O(rows × dimension).

use async_trait::async_trait;
use tokio::sync::RwLock;
use vecstore_core::{l2_distance, Item, ItemId, NearestMatch, EMBEDDING_DIMENSION};

use crate::error::StorageError;
use crate::traits::{validate_embedding, validate_limit, VectorStore};

#[derive(Debug)]
struct Table {
    items: Vec<Item>,
    next_id: i64,
}

impl Table {
    fn empty() -> Self {
        Self { items: Vec::new(), next_id: 1 }
    }
}

#[derive(Debug)]
pub struct MemoryStore {
    dimension: usize,
    table: RwLock<Table>,
}

impl MemoryStore {
    pub fn new(dimension: usize) -> Self {
        Self { dimension, table: RwLock::new(Table::empty()) }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(EMBEDDING_DIMENSION)
    }
}

#[async_trait]
impl VectorStore for MemoryStore {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn ensure_extension(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn ensure_table(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn reset_table(&self) -> Result<(), StorageError> {
        *self.table.write().await = Table::empty();
        tracing::debug!(dimension = self.dimension, "memory table reset");
        Ok(())
    }

    async fn insert(&self, content: &str, embedding: &[f32]) -> Result<ItemId, StorageError> {
        validate_embedding(self.dimension, embedding)?;
        let mut table = self.table.write().await;
        let id = ItemId(table.next_id);
        table.next_id = table.next_id.saturating_add(1);
        table.items.push(Item { id, content: content.to_owned(), embedding: embedding.to_vec() });
        Ok(id)
    }

    async fn query_nearest(
        &self,
        query: &[f32],
        limit: usize,
    ) -> Result<Vec<NearestMatch>, StorageError> {
        validate_embedding(self.dimension, query)?;
        let limit = validate_limit(limit)?;
        let table = self.table.read().await;

        let mut scored: Vec<(f64, &Item)> =
            table.items.iter().map(|item| (l2_distance(&item.embedding, query), item)).collect();
        scored.sort_by(|(da, a), (db, b)| da.total_cmp(db).then_with(|| a.id.cmp(&b.id)));

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(distance, item)| NearestMatch::new(item.id, item.content.clone(), distance))
            .collect())
    }

    async fn get(&self, id: ItemId) -> Result<Option<Item>, StorageError> {
        Ok(self.table.read().await.items.iter().find(|item| item.id == id).cloned())
    }

    async fn count(&self) -> Result<u64, StorageError> {
        Ok(u64::try_from(self.table.read().await.items.len()).unwrap_or(u64::MAX))
    }
}

//! VectorStore implementation for PgStorage.

use super::*;

use async_trait::async_trait;
use vecstore_core::format_vector_literal;

use crate::pg_schema::{ensure_items_table, ensure_vector_extension, recreate_items_table};
use crate::traits::{validate_embedding, validate_limit, VectorStore};

fn to_literal(embedding: &[f32]) -> Result<String, StorageError> {
    format_vector_literal(embedding).map_err(StorageError::InvalidVector)
}

#[async_trait]
impl VectorStore for PgStorage {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn ensure_extension(&self) -> Result<(), StorageError> {
        ensure_vector_extension(&self.pool).await?;
        tracing::info!("vector extension present");
        Ok(())
    }

    async fn ensure_table(&self) -> Result<(), StorageError> {
        ensure_items_table(&self.pool, &self.table, self.dimension).await?;
        tracing::info!(table = %self.table, dimension = self.dimension, "items table ready");
        Ok(())
    }

    async fn reset_table(&self) -> Result<(), StorageError> {
        recreate_items_table(&self.pool, &self.table, self.dimension).await?;
        tracing::info!(table = %self.table, dimension = self.dimension, "items table recreated");
        Ok(())
    }

    async fn insert(&self, content: &str, embedding: &[f32]) -> Result<ItemId, StorageError> {
        validate_embedding(self.dimension, embedding)?;
        let literal = to_literal(embedding)?;

        let mut tx = self.pool.begin().await.map_err(StorageError::Insert)?;
        let id: i64 = sqlx::query_scalar(&format!(
            "INSERT INTO {} (content, embedding) VALUES ($1, $2::vector) RETURNING id",
            self.table
        ))
        .bind(content)
        .bind(&literal)
        .fetch_one(&mut *tx)
        .await
        .map_err(StorageError::Insert)?;
        tx.commit().await.map_err(StorageError::Insert)?;

        Ok(ItemId(id))
    }

    async fn query_nearest(
        &self,
        query: &[f32],
        limit: usize,
    ) -> Result<Vec<NearestMatch>, StorageError> {
        validate_embedding(self.dimension, query)?;
        let limit = validate_limit(limit)?;
        let literal = to_literal(query)?;

        let rows = sqlx::query(&format!(
            "SELECT id, content, embedding <-> $1::vector AS distance
               FROM {}
              ORDER BY distance ASC, id ASC
              LIMIT $2",
            self.table
        ))
        .bind(&literal)
        .bind(usize_to_i64(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Query)?;
        rows.iter().map(row_to_match).collect()
    }

    async fn get(&self, id: ItemId) -> Result<Option<Item>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT id, content, embedding::text AS embedding FROM {} WHERE id = $1",
            self.table
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_item).transpose()
    }

    async fn count(&self) -> Result<u64, StorageError> {
        let n: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", self.table))
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(n).unwrap_or(0))
    }
}

//! DDL for the pgvector items table.

use sqlx::{PgPool, Postgres, Transaction};

use crate::error::StorageError;

pub(crate) async fn ensure_vector_extension(pool: &PgPool) -> Result<(), StorageError> {
    sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
        .execute(pool)
        .await
        .map_err(StorageError::ExtensionSetup)?;
    Ok(())
}

fn create_table_sql(table: &str, dimension: usize, if_not_exists: bool) -> String {
    let guard = if if_not_exists { "IF NOT EXISTS " } else { "" };
    format!(
        "CREATE TABLE {guard}{table} (
            id BIGSERIAL PRIMARY KEY,
            content TEXT NOT NULL,
            embedding vector({dimension}) NOT NULL
        )"
    )
}

/// Create the table if missing, then verify the column width of whatever is there.
pub(crate) async fn ensure_items_table(
    pool: &PgPool,
    table: &str,
    dimension: usize,
) -> Result<(), StorageError> {
    sqlx::query(&create_table_sql(table, dimension, true))
        .execute(pool)
        .await
        .map_err(StorageError::SchemaSetup)?;

    // pgvector stores the declared dimension in atttypmod.
    let typmod: Option<i32> = sqlx::query_scalar(
        "SELECT atttypmod FROM pg_attribute
          WHERE attrelid = to_regclass($1) AND attname = 'embedding' AND NOT attisdropped",
    )
    .bind(table)
    .fetch_optional(pool)
    .await
    .map_err(StorageError::SchemaSetup)?;

    match typmod.and_then(|t| usize::try_from(t).ok()) {
        Some(actual) if actual != dimension => Err(StorageError::SchemaMismatch {
            table: table.to_owned(),
            expected: dimension,
            actual,
        }),
        _ => Ok(()),
    }
}

/// Drop and recreate in one transaction so a failed CREATE leaves the old table.
pub(crate) async fn recreate_items_table(
    pool: &PgPool,
    table: &str,
    dimension: usize,
) -> Result<(), StorageError> {
    let mut tx: Transaction<'_, Postgres> =
        pool.begin().await.map_err(StorageError::SchemaSetup)?;
    sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
        .execute(&mut *tx)
        .await
        .map_err(StorageError::SchemaSetup)?;
    sqlx::query(&create_table_sql(table, dimension, false))
        .execute(&mut *tx)
        .await
        .map_err(StorageError::SchemaSetup)?;
    tx.commit().await.map_err(StorageError::SchemaSetup)?;
    Ok(())
}

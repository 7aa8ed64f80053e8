//! PostgreSQL storage backend using sqlx and pgvector.

mod items;

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Row};
use vecstore_core::{
    parse_vector_literal, validate_table_name, DbConfig, Item, ItemId, NearestMatch,
    DEFAULT_TABLE_NAME, EMBEDDING_DIMENSION, PG_POOL_ACQUIRE_TIMEOUT_SECS,
    PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS,
};

use crate::error::StorageError;

/// Item store over a single pooled connection.
///
/// Vectors travel as text parameters cast with `$n::vector`; they are never
/// spliced into SQL. Only the validated table name is.
#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
    table: String,
    dimension: usize,
}

impl PgStorage {
    /// Connect with the default table (`items`) and dimension (384).
    pub async fn connect(config: &DbConfig) -> Result<Self, StorageError> {
        Self::connect_with(config, DEFAULT_TABLE_NAME, EMBEDDING_DIMENSION).await
    }

    pub async fn connect_with(
        config: &DbConfig,
        table: &str,
        dimension: usize,
    ) -> Result<Self, StorageError> {
        let options = connect_options(config)?;
        Self::from_options(options, table, dimension, &config.display_target()).await
    }

    async fn from_options(
        options: PgConnectOptions,
        table: &str,
        dimension: usize,
        target: &str,
    ) -> Result<Self, StorageError> {
        let table = validate_table_name(table).map_err(StorageError::Config)?.to_owned();
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect_with(options)
            .await
            .map_err(StorageError::Connection)?;
        tracing::info!(target_db = %target, table = %table, dimension, "PgStorage connected");
        Ok(Self { pool, table, dimension })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Close the pool and wait for the connection to be released.
    pub async fn close(self) {
        self.pool.close().await;
        tracing::info!(table = %self.table, "PgStorage closed");
    }
}

fn connect_options(config: &DbConfig) -> Result<PgConnectOptions, StorageError> {
    if let Some(url) = &config.url {
        return PgConnectOptions::from_str(url).map_err(StorageError::Connection);
    }
    let mut options = PgConnectOptions::new().host(&config.host).port(config.port);
    if let Some(database) = &config.database {
        options = options.database(database);
    }
    if let Some(user) = &config.user {
        options = options.username(user);
    }
    if let Some(password) = &config.password {
        options = options.password(password);
    }
    Ok(options)
}

/// Convert `usize` to `i64` for SQL LIMIT binds.
/// Saturates to `i64::MAX` on overflow (only possible on 128-bit targets).
pub(crate) fn usize_to_i64(val: usize) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}

pub(crate) fn row_to_match(row: &sqlx::postgres::PgRow) -> Result<NearestMatch, StorageError> {
    Ok(NearestMatch::new(
        ItemId(row.try_get("id")?),
        row.try_get("content")?,
        row.try_get("distance")?,
    ))
}

pub(crate) fn row_to_item(row: &sqlx::postgres::PgRow) -> Result<Item, StorageError> {
    let literal: String = row.try_get("embedding")?;
    let embedding = parse_vector_literal(&literal).map_err(|e| StorageError::DataCorruption {
        context: "embedding column is not a vector literal".to_owned(),
        source: Box::new(e),
    })?;
    Ok(Item { id: ItemId(row.try_get("id")?), content: row.try_get("content")?, embedding })
}

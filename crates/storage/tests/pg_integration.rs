//! Integration tests for PgStorage against a live pgvector instance.
//! Run with: DATABASE_URL=... cargo test -p vecstore-storage -- --ignored pg_

#![allow(clippy::unwrap_used, reason = "integration test code")]

use uuid::Uuid;
use vecstore_core::{DbConfig, ItemId, EMBEDDING_DIMENSION};
use vecstore_storage::{PgStorage, StorageError, VectorStore};

/// Each test gets its own table so tests can run in parallel on one database.
async fn create_pg_storage() -> PgStorage {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for PgStorage integration tests");
    let config = DbConfig { url: Some(url), ..DbConfig::default() };
    let table = format!("items_test_{}", Uuid::new_v4().simple());
    let storage = PgStorage::connect_with(&config, &table, EMBEDDING_DIMENSION)
        .await
        .expect("Failed to connect to PostgreSQL");
    storage.reset_schema().await.unwrap();
    storage
}

async fn drop_table(storage: PgStorage) {
    // Best effort; a leftover test table is harmless.
    let url = std::env::var("DATABASE_URL").unwrap();
    let pool = sqlx::PgPool::connect(&url).await.unwrap();
    sqlx::query(&format!("DROP TABLE IF EXISTS {}", storage.table()))
        .execute(&pool)
        .await
        .ok();
    pool.close().await;
    storage.close().await;
}

fn axis_vector(axis: usize, value: f32) -> Vec<f32> {
    let mut v = vec![0.0_f32; EMBEDDING_DIMENSION];
    if let Some(slot) = v.get_mut(axis) {
        *slot = value;
    }
    v
}

#[tokio::test]
#[ignore]
async fn pg_empty_table_query_returns_nothing() {
    let storage = create_pg_storage().await;
    let results = storage.query_nearest(&axis_vector(0, 1.0), 3).await.unwrap();
    assert!(results.is_empty());
    drop_table(storage).await;
}

#[tokio::test]
#[ignore]
async fn pg_insert_then_query_same_vector_is_first_at_zero() {
    let storage = create_pg_storage().await;
    storage.insert("rocket launched to Mars", &axis_vector(1, 1.0)).await.unwrap();
    let v = axis_vector(0, 0.123_456);
    let id = storage.insert("banana, yellow, ripe", &v).await.unwrap();

    let results = storage.query_nearest(&v, 2).await.unwrap();
    assert_eq!(results.len(), 2);
    let first = results.first().unwrap();
    assert_eq!(first.id, id);
    assert!(first.distance.abs() < 1e-6, "distance {}", first.distance);
    assert!(results.windows(2).all(|w| w[0].distance <= w[1].distance));
    drop_table(storage).await;
}

#[tokio::test]
#[ignore]
async fn pg_ids_increase_and_ties_break_by_id() {
    let storage = create_pg_storage().await;
    let a = storage.insert("a", &axis_vector(0, 1.0)).await.unwrap();
    let b = storage.insert("b", &axis_vector(1, 1.0)).await.unwrap();
    assert!(b > a);

    let results = storage.query_nearest(&axis_vector(2, 0.0), 2).await.unwrap();
    let ids: Vec<ItemId> = results.iter().map(|m| m.id).collect();
    assert_eq!(ids, [a, b]);
    drop_table(storage).await;
}

#[tokio::test]
#[ignore]
async fn pg_dimension_mismatch_creates_no_row() {
    let storage = create_pg_storage().await;
    let err = storage.insert("short", &[0.1; 10]).await.unwrap_err();
    assert!(matches!(err, StorageError::DimensionMismatch { actual: 10, .. }));
    assert_eq!(storage.count().await.unwrap(), 0);
    drop_table(storage).await;
}

#[tokio::test]
#[ignore]
async fn pg_get_round_trips_embedding() {
    let storage = create_pg_storage().await;
    let v = axis_vector(9, -0.000_001);
    let id = storage.insert("tiny component", &v).await.unwrap();
    let item = storage.get(id).await.unwrap().unwrap();
    assert_eq!(item.content, "tiny component");
    assert_eq!(item.embedding, v);
    drop_table(storage).await;
}

#[tokio::test]
#[ignore]
async fn pg_ensure_table_detects_dimension_change() {
    let storage = create_pg_storage().await;
    let url = std::env::var("DATABASE_URL").unwrap();
    let config = DbConfig { url: Some(url), ..DbConfig::default() };
    let narrow = PgStorage::connect_with(&config, storage.table(), 8).await.unwrap();

    let err = narrow.ensure_table().await.unwrap_err();
    assert!(matches!(err, StorageError::SchemaMismatch { expected: 8, actual, .. } if actual == EMBEDDING_DIMENSION));
    narrow.close().await;
    drop_table(storage).await;
}

#[tokio::test]
#[ignore]
async fn pg_bad_credentials_fail_with_connection_error() {
    let config = DbConfig {
        host: "127.0.0.1".to_owned(),
        port: 1,
        database: Some("nope".to_owned()),
        ..DbConfig::default()
    };
    let err = PgStorage::connect(&config).await.unwrap_err();
    assert!(matches!(err, StorageError::Connection(_)));
}

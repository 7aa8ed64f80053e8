//! Shared constants for vecstore.

/// Embedding vector dimension (all-MiniLM-L6-v2: 384d).
pub const EMBEDDING_DIMENSION: usize = 384;

/// Human-readable name of the default sentence-embedding model.
pub const EMBEDDING_MODEL_NAME: &str = "all-MiniLM-L6-v2";

/// Table holding items and their embeddings.
pub const DEFAULT_TABLE_NAME: &str = "items";

/// Host used when `POSTGRES_HOST` is not set.
pub const DEFAULT_PG_HOST: &str = "127.0.0.1";

/// Port used when `POSTGRES_PORT` is not set.
pub const DEFAULT_PG_PORT: u16 = 5432;

/// PostgreSQL connection pool: maximum connections. The store is driven
/// sequentially, one connection is all it ever holds.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 1;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Default number of neighbors returned by a similarity query.
pub const DEFAULT_QUERY_LIMIT: usize = 3;

/// Upper bound the `search` command applies to `--limit`.
pub const MAX_QUERY_LIMIT: usize = 1000;

/// Longest identifier PostgreSQL accepts without truncation.
pub const PG_MAX_IDENTIFIER_LEN: usize = 63;

//! Storage layer for vecstore
//!
//! A single table of `(id, content, embedding)` rows with L2 nearest-neighbor
//! search. PostgreSQL + pgvector is the real backend; an in-process store with
//! the same contract backs tests and database-less runs.

mod backend;
pub mod error;
mod memory;
mod pg_schema;
mod pg_storage;
#[cfg(test)]
mod tests;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStore;
pub use pg_storage::PgStorage;
pub use sqlx::Error as SqlxError;
pub use traits::VectorStore;

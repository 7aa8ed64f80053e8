//! Test utilities and module declarations for storage tests.

use crate::MemoryStore;
use vecstore_core::EMBEDDING_DIMENSION;

pub fn create_test_store() -> MemoryStore {
    MemoryStore::new(EMBEDDING_DIMENSION)
}

/// `EMBEDDING_DIMENSION`-sized vector with `value` at `axis` and zeros elsewhere.
pub fn axis_vector(axis: usize, value: f32) -> Vec<f32> {
    let mut v = vec![0.0_f32; EMBEDDING_DIMENSION];
    if let Some(slot) = v.get_mut(axis) {
        *slot = value;
    }
    v
}

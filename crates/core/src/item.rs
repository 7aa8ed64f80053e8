use std::fmt;

use serde::{Deserialize, Serialize};

/// Surrogate row identifier, assigned by the store in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A stored text together with its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub content: String,
    pub embedding: Vec<f32>,
}

/// One row of a nearest-neighbor result. Smaller `distance` means more similar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestMatch {
    pub id: ItemId,
    pub content: String,
    pub distance: f64,
}

impl NearestMatch {
    pub fn new(id: ItemId, content: String, distance: f64) -> Self {
        Self { id, content, distance }
    }
}

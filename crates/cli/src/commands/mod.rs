use std::sync::Arc;

use anyhow::Result;
use vecstore_embeddings::EmbeddingProvider;

pub(crate) mod demo;
pub(crate) mod insert;
pub(crate) mod search;

/// Run the CPU-bound model off the async workers.
pub(crate) async fn embed_text(embedder: &Arc<dyn EmbeddingProvider>, text: &str) -> Result<Vec<f32>> {
    let emb = Arc::clone(embedder);
    let text = text.to_owned();
    Ok(tokio::task::spawn_blocking(move || emb.embed(&text)).await??)
}

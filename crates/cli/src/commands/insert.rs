use std::sync::Arc;

use anyhow::Result;
use vecstore_core::ItemId;
use vecstore_embeddings::EmbeddingProvider;
use vecstore_storage::VectorStore;

use super::embed_text;

/// Append one row without resetting the table.
pub(crate) async fn run<S: VectorStore + ?Sized>(
    store: &S,
    embedder: &Arc<dyn EmbeddingProvider>,
    text: &str,
) -> Result<ItemId> {
    store.ensure_schema().await?;
    let embedding = embed_text(embedder, text).await?;
    let id = store.insert(text, &embedding).await?;
    tracing::info!(%id, "inserted");
    println!("{id}");
    Ok(id)
}

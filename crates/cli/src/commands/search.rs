use std::sync::Arc;

use anyhow::Result;
use vecstore_core::{NearestMatch, MAX_QUERY_LIMIT};
use vecstore_embeddings::EmbeddingProvider;
use vecstore_storage::VectorStore;

use super::embed_text;

/// Query the existing table without resetting it and print matches as JSON.
pub(crate) async fn run<S: VectorStore + ?Sized>(
    store: &S,
    embedder: &Arc<dyn EmbeddingProvider>,
    query: &str,
    limit: usize,
) -> Result<Vec<NearestMatch>> {
    let results = nearest(store, embedder, query, limit).await?;
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(results)
}

async fn nearest<S: VectorStore + ?Sized>(
    store: &S,
    embedder: &Arc<dyn EmbeddingProvider>,
    query: &str,
    limit: usize,
) -> Result<Vec<NearestMatch>> {
    if limit > MAX_QUERY_LIMIT {
        tracing::warn!(requested = limit, max = MAX_QUERY_LIMIT, "--limit capped");
    }
    store.ensure_schema().await?;
    let query_vec = embed_text(embedder, query).await?;
    Ok(store.query_nearest(&query_vec, limit.min(MAX_QUERY_LIMIT)).await?)
}

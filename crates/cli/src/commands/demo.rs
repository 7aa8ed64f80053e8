//! Fixed demo sequence: reset the table, insert the sample sentences, run the
//! sample queries. Every step after connecting logs its own failure and the
//! sequence keeps going.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use vecstore_core::NearestMatch;
use vecstore_embeddings::EmbeddingProvider;
use vecstore_storage::{StorageError, VectorStore};

use super::embed_text;

pub(crate) const SAMPLE_CORPUS: [&str; 5] = [
    "A ripe yellow banana, perfect for a smoothie or dessert.",
    "Red and green apples grown in the countryside.",
    "The rocket was successfully launched toward Mars.",
    "The laptop has a fast processor.",
    "PostgreSQL is the most advanced relational database for scalability.",
];

pub(crate) const SAMPLE_QUERIES: [&str; 3] = [
    "I need to buy new software or hardware for development.",
    "I need to make a smoothie.",
    "What is the most advanced relational database?",
];

#[derive(Debug, Default)]
pub(crate) struct DemoReport {
    pub(crate) inserted: usize,
    pub(crate) failed_inserts: usize,
    /// Subset of `failed_inserts` refused for bad input rather than a backend fault.
    pub(crate) rejected_inserts: usize,
    pub(crate) queries: Vec<QueryOutcome>,
}

#[derive(Debug)]
pub(crate) struct QueryOutcome {
    pub(crate) query: String,
    pub(crate) matches: Vec<NearestMatch>,
}

pub(crate) async fn run<S: VectorStore + ?Sized>(
    store: &S,
    embedder: &Arc<dyn EmbeddingProvider>,
    limit: usize,
) -> Result<DemoReport> {
    run_with(store, embedder, &SAMPLE_CORPUS, &SAMPLE_QUERIES, limit).await
}

pub(crate) async fn run_with<S: VectorStore + ?Sized>(
    store: &S,
    embedder: &Arc<dyn EmbeddingProvider>,
    corpus: &[&str],
    queries: &[&str],
    limit: usize,
) -> Result<DemoReport> {
    let mut report = DemoReport::default();

    if let Err(e) = store.ensure_extension().await {
        tracing::error!(error = %e, "vector extension setup failed, continuing");
    }
    if let Err(e) = store.reset_table().await {
        tracing::error!(error = %e, "table reset failed, continuing");
    }

    for text in corpus {
        match insert_text(store, embedder, text).await {
            Ok(()) => report.inserted += 1,
            Err(e) => {
                report.failed_inserts += 1;
                let invalid_input =
                    e.downcast_ref::<StorageError>().is_some_and(StorageError::is_invalid_input);
                if invalid_input {
                    report.rejected_inserts += 1;
                    tracing::warn!(error = %e, content = %preview(text), "row rejected, skipping");
                } else {
                    tracing::error!(error = %e, content = %preview(text), "insert failed, skipping");
                }
            },
        }
    }

    for query in queries {
        let started = Instant::now();
        let matches = match search_text(store, embedder, query, limit).await {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!(error = %e, query = %query, "similarity query failed");
                Vec::new()
            },
        };
        tracing::info!(
            query = %query,
            results = matches.len(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "similarity query finished"
        );
        print_matches(query, &matches);
        report.queries.push(QueryOutcome { query: (*query).to_owned(), matches });
    }

    tracing::info!(
        inserted = report.inserted,
        failed = report.failed_inserts,
        rejected = report.rejected_inserts,
        queries = report.queries.len(),
        "demo finished"
    );
    Ok(report)
}

async fn insert_text<S: VectorStore + ?Sized>(
    store: &S,
    embedder: &Arc<dyn EmbeddingProvider>,
    text: &str,
) -> Result<()> {
    let embedding = embed_text(embedder, text).await?;
    let id = store.insert(text, &embedding).await?;
    tracing::info!(%id, content = %preview(text), "inserted");
    Ok(())
}

async fn search_text<S: VectorStore + ?Sized>(
    store: &S,
    embedder: &Arc<dyn EmbeddingProvider>,
    query: &str,
    limit: usize,
) -> Result<Vec<NearestMatch>> {
    let query_vec = embed_text(embedder, query).await?;
    Ok(store.query_nearest(&query_vec, limit).await?)
}

fn print_matches(query: &str, matches: &[NearestMatch]) {
    println!("query: {query}");
    if matches.is_empty() {
        println!("  (no results)");
    }
    for (rank, m) in matches.iter().enumerate() {
        println!("  {}. [{:.6}] {}", rank + 1, m.distance, m.content);
    }
}

fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 40;
    if text.chars().count() <= MAX_CHARS {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(MAX_CHARS).collect();
    out.push_str("...");
    out
}

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vecstore_core::{env_parse_with_default, DbConfig, DEFAULT_QUERY_LIMIT};
use vecstore_embeddings::{EmbeddingProvider, EmbeddingService};
use vecstore_storage::{StorageBackend, VectorStore};

mod commands;

#[derive(Parser)]
#[command(name = "vecstore")]
#[command(version)]
#[command(about = "Store sentence embeddings in pgvector and search them by L2 distance", long_about = None)]
struct Cli {
    /// Use an in-process store instead of PostgreSQL (demo only; the store
    /// does not outlive the process)
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reset the table, insert the sample sentences and run the sample queries (default)
    Demo,
    /// Nearest stored sentences to QUERY, printed as JSON
    Search {
        query: String,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Embed TEXT and append it to the table
    Insert { text: String },
}

/// `search` and `insert` work on rows left by earlier runs, which an
/// in-process store never has.
fn check_store_mode(memory: bool, command: &Commands) -> Result<()> {
    match command {
        Commands::Search { .. } | Commands::Insert { .. } if memory => {
            anyhow::bail!("--memory only applies to `demo`; search and insert need PostgreSQL")
        },
        _ => Ok(()),
    }
}

/// A missing `.env` is fine. Variables already set in the process win.
fn report_dotenv(loaded: Result<PathBuf, dotenvy::Error>) {
    match loaded {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {},
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }
}

pub(crate) fn default_query_limit() -> usize {
    env_parse_with_default("VECSTORE_QUERY_LIMIT", DEFAULT_QUERY_LIMIT)
}

async fn load_embedder() -> Result<Arc<dyn EmbeddingProvider>> {
    let service = tokio::task::spawn_blocking(EmbeddingService::new).await??;
    Ok(Arc::new(service))
}

async fn open_store(memory: bool, dimension: usize) -> Result<StorageBackend> {
    if memory {
        tracing::info!("using in-memory store");
        return Ok(StorageBackend::new_memory(dimension));
    }
    let config = DbConfig::from_env();
    tracing::info!(target_db = %config.display_target(), "connecting to PostgreSQL");
    match StorageBackend::new_postgres(&config).await {
        Ok(store) => Ok(store),
        Err(e) => {
            tracing::error!(error = %e, target_db = %config.display_target(), "cannot connect to database, aborting");
            Err(e.into())
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Demo);
    check_store_mode(cli.memory, &command)?;

    report_dotenv(dotenvy::dotenv());

    let embedder = load_embedder().await?;
    let store = open_store(cli.memory, embedder.dimension()).await?;
    if store.dimension() != embedder.dimension() {
        store.close().await;
        anyhow::bail!("store dimension does not match embedding model dimension");
    }

    let result = match command {
        Commands::Demo => {
            commands::demo::run(&store, &embedder, default_query_limit()).await.map(|_| ())
        },
        Commands::Search { query, limit } => {
            let limit = limit.unwrap_or_else(default_query_limit);
            commands::search::run(&store, &embedder, &query, limit).await.map(|_| ())
        },
        Commands::Insert { text } => {
            commands::insert::run(&store, &embedder, &text).await.map(|_| ())
        },
    };

    // Released on every path, including a failed command.
    store.close().await;
    tracing::info!("connection closed");
    result
}

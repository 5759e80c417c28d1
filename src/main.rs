use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use otvet_hf::HfClient;
use otvet_rag::{FileVectorStore, HashEmbedder, index_corpus};
use otvet_web::{AppContext, QaEngine, router};

const DEFAULT_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_STORE: &str = "vector_store";

#[derive(Parser)]
#[command(name = "otvet")]
#[command(about = "Retrieval-augmented question answering over a local passage index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the web UI and the ask endpoint
    Serve {
        /// Address to bind
        #[arg(long, default_value = DEFAULT_ADDR)]
        addr: SocketAddr,

        /// Directory holding the persisted vector store
        #[arg(long, default_value = DEFAULT_STORE)]
        store: PathBuf,
    },
    /// Build the vector store from a directory of .txt corpus files
    Index {
        /// Directory with the corpus
        corpus: PathBuf,

        /// Directory to write the vector store into
        #[arg(long, default_value = DEFAULT_STORE)]
        store: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Index { corpus, store }) => {
            let total = index_corpus(&corpus, &store, HashEmbedder::new())
                .with_context(|| format!("failed to index {}", corpus.display()))?;
            info!(total, "indexing complete");
            Ok(())
        }
        Some(Command::Serve { addr, store }) => serve(addr, store).await,
        None => {
            let addr = DEFAULT_ADDR.parse().context("invalid default address")?;
            serve(addr, PathBuf::from(DEFAULT_STORE)).await
        }
    }
}

async fn serve(addr: SocketAddr, store_dir: PathBuf) -> Result<()> {
    // The store and the inference client are loaded once and shared
    // read-only for the process lifetime; a failure here aborts startup
    let store = FileVectorStore::load(&store_dir, HashEmbedder::new())
        .with_context(|| format!("failed to load vector store from {}", store_dir.display()))?;
    info!(chunks = store.len(), store = %store_dir.display(), "vector store loaded");

    let client = HfClient::from_env().context("failed to configure inference client")?;

    let engine = QaEngine::new(Arc::new(store), Arc::new(client));
    let context = Arc::new(AppContext { engine });

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, router(context)).await?;
    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

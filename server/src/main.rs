use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use todo_core::TodoStore;
use todo_server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default `info` level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();

    // A data file we cannot load is fatal: never start serving on top of it.
    let store = TodoStore::open(&config.data_file, config.write_mode())
        .with_context(|| format!("loading todos from {}", config.data_file.display()))?;

    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(
        %addr,
        data_file = %store.path().display(),
        todos = store.len().await,
        "listening"
    );

    todo_server::run(listener, Arc::new(store)).await?;
    Ok(())
}

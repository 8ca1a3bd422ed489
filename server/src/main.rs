use std::sync::Arc;

use anyhow::Context;
use blog_core::SqliteStore;
use blog_server::{AppState, Config};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    blog_server::telemetry::init();

    let config = Config::from_env()?;

    let state = match &config.database_url {
        Some(url) => {
            let store = SqliteStore::connect(url)
                .await
                .context("failed to open database")?;
            info!("using sqlite store");
            AppState::from_store(Arc::new(store))
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory store");
            AppState::in_memory()
        }
    };

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{}", listener.local_addr()?);

    blog_server::serve_with_shutdown(listener, state, shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

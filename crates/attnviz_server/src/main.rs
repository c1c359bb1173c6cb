//! `attnviz-server` entry point.

use anyhow::{anyhow, Context};
use attnviz_core::db::open_db;
use attnviz_core::init_logging;
use attnviz_server::{serve, AppState, ServerConfig};
use clap::Parser;
use log::{error, info};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    init_logging(config.effective_log_level(), config.log_dir.as_deref())
        .map_err(|err| anyhow!(err))
        .context("failed to initialize logging")?;

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    let state = Arc::new(AppState::new(conn));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(
        "event=server_start module=server status=ok bind={} db_path={}",
        config.bind,
        config.db_path.display()
    );

    serve(state, listener, shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=shutdown_signal module=server status=error error={err}");
    }
}

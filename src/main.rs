//! Energy optimizer entry point: CLI, logging, bind and serve.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use energy_optimizer::api::{self, AppState};
use energy_optimizer::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::from(config.logging.level))
        .init();

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            tracing::error!("{e}");
        }
        bail!("invalid configuration ({} error(s))", errors.len());
    }

    let ip: IpAddr = config
        .server
        .listen
        .parse()
        .with_context(|| format!("invalid listen address \"{}\"", config.server.listen))?;
    let addr = SocketAddr::new(ip, config.server.port);

    tracing::info!("energy-optimizer starting");
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from: {}", path.display());
    }
    tracing::info!(
        "Frontend: http://{addr}/frontend/index.html (from {})",
        config.server.frontend_dir.display()
    );

    let state = Arc::new(AppState::from_config(&config));
    api::serve(state, addr, shutdown_signal())
        .await
        .context("API server failed")?;

    tracing::info!("energy-optimizer shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C. If the signal handler cannot be installed the server
/// runs until killed.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received shutdown signal"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
    }
}

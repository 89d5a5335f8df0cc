// Crypto Tax Dashboard - API Server
// Serves the index and demo endpoints with CORS headers

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crypto_tax_dashboard::api;
use crypto_tax_dashboard::config::{init_logging, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    info!(
        "Starting tax-dashboard-server v{}",
        crypto_tax_dashboard::VERSION
    );

    let app = api::router();

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("  Index: http://{}/api", addr);
    info!("  Demo:  http://{}/api/demo", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

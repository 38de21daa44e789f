use anyhow::{Context, anyhow};
use clap::Parser;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;

use suggest_relay::api::create_router;
use suggest_relay::config::CONFIG;
use suggest_relay::logging::log_filter;

#[derive(Debug, Parser)]
#[command(about = "Relays search-suggestion lookups to the enterprise search backend")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5001)]
    port: u16,

    /// Log filter directives, e.g. `suggest_relay=debug`
    #[arg(long = "log", env = "RUST_LOG")]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok(); // Load .env file if present
    let args = Args::parse();

    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(args.log_filter.as_deref()))
        .with_target(true)
        .init();

    let config = CONFIG
        .as_ref()
        .map_err(|e| anyhow!("invalid configuration: {e:#}"))?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", args.host, args.port))?;

    let app = create_router(Arc::new(config.clone()));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, search_url = %config.search_url, "suggest relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {e}");
    }
    log::info!("shutting down");
}

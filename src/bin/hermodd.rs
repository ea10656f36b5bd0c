//! hermodd — hermod daemon.
//!
//! Serves the [`Gateway`](hermod::Gateway) over HTTP, fronting the generic
//! content API and the search API with the shared response cache.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use hermod::server::{self, Config};
use hermod::{CacheConfig, Hermod, HermodError};

/// Hermod request gateway daemon.
#[derive(Parser)]
#[command(name = "hermodd")]
#[command(version)]
#[command(about = "Hermod request gateway daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let gateway = Hermod::builder()
        .json_api_url(&config.upstream.json_api_url)
        .search_api_url(&config.upstream.search_api_url)
        .connect_timeout(Duration::from_millis(config.upstream.connect_timeout_ms))
        .timeout(Duration::from_millis(config.upstream.timeout_ms))
        .cache(
            CacheConfig::new()
                .ttl(Duration::from_secs(config.cache.ttl_secs))
                .max_entries(config.cache.max_entries),
        )
        .build()?;

    let addr: SocketAddr = config
        .server
        .address
        .parse()
        .map_err(|e| HermodError::Configuration(format!("invalid address: {e}")))?;

    info!(%addr, json_api = %config.upstream.json_api_url,
          search_api = %config.upstream.search_api_url, "hermodd starting");

    let app = server::app(Arc::new(gateway));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

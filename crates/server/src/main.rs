//! mcp-docqa server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use anyhow::Result;
use docqa_core::{AppConfig, CacheDb};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;

    tracing::info!("Starting mcp-docqa server on stdio transport, db at {}", config.db_path.display());

    let db = CacheDb::open(&config.db_path).await?;

    // startup housekeeping: drop answers past the configured age
    if config.cache_enabled {
        let removed = db.remove_expired_queries(config.max_cache_age_days).await?;
        if removed > 0 {
            tracing::info!("removed {} stale cache entries at startup", removed);
        }
    }

    let handler = handler::DocQaServer::new(config, db);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}

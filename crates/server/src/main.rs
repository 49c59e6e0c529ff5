//! followcount server entry point.
//!
//! Serves follower lookups either over HTTP or as MCP tools on stdio,
//! depending on `transport`. Logging goes to stderr so stdout stays free for
//! the JSON-RPC protocol.

use std::sync::Arc;

use anyhow::Result;
use followcount_core::{AppConfig, Transport};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod http;
mod lookup;
mod tools;

#[cfg(test)]
mod testing;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let service = Arc::new(lookup::LookupService::from_config(&config)?);

    match config.transport {
        Transport::Http => {
            tracing::info!(addr = %config.bind_addr(), "Starting followcount server on http transport");
            http::serve(&config.bind_addr(), service).await?;
        }
        Transport::Stdio => {
            tracing::info!("Starting followcount server on stdio transport");
            let handler = handler::FollowCountServer::new(service);
            let server = serve_server(handler, stdio()).await?;
            server.waiting().await?;
        }
    }

    Ok(())
}

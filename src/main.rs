use std::sync::Arc;

use openfeature_mcp::config::{ServerConfig, Transport};
use openfeature_mcp::context::ToolContext;
use openfeature_mcp::http;
use openfeature_mcp::server::McpServer;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    let ctx = match ToolContext::new(config.clone()) {
        Ok(ctx) => Arc::new(ctx),
        Err(e) => {
            error!("cannot build HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let outcome = match config.transport {
        Transport::Stdio => McpServer::new(ctx).run().await,
        Transport::Http(addr) => http::serve(addr, ctx).await,
    };

    if let Err(e) = outcome {
        error!("fatal error: {e}");
        std::process::exit(1);
    }
}

//! LDES Navigator MCP Server
//!
//! Stdio MCP front end for a running `ldes-navigator` API. Each tool is one
//! HTTP call against `NAVIGATOR_API_URL` (default `http://localhost:8080`),
//! so catalog state, selection and probe results live in the API process
//! and are shared with the browser UI.
//!
//! Logs go to stderr; `RUST_LOG` overrides the default `info` filter.

mod client;
mod server;

use anyhow::Result;
use rmcp::ServiceExt;
use server::NavigatorServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let server = NavigatorServer::from_env()?;
    tracing::info!(api = %server.api_url(), "Starting LDES Navigator MCP server");

    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
    service.waiting().await?;

    Ok(())
}

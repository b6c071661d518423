//! Navigator MCP Server implementation
//!
//! Thin tool layer over the navigator API. Every tool returns the API's
//! plain-text rendering; API failures become tool errors, not protocol errors.

use crate::client::NavigatorClient;
use anyhow::Result;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{
    handler::server::tool::ToolRouter,
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;

/// Navigator MCP Server
///
/// Lets agents browse the LDES catalog, select feeds and probe them.
#[derive(Clone)]
pub struct NavigatorServer {
    client: NavigatorClient,
    tool_router: ToolRouter<Self>,
}

impl NavigatorServer {
    pub fn from_env() -> Result<Self> {
        let client = NavigatorClient::from_env()?;
        Ok(Self::new(client))
    }

    pub fn new(client: NavigatorClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    pub fn api_url(&self) -> &str {
        self.client.base_url()
    }
}

fn text_result(result: Result<String>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(content) => Ok(CallToolResult::success(vec![Content::text(content)])),
        Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
    }
}

// --- Tool Parameter Types ---

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CatalogParams {
    /// Case-insensitive substring filter on feed URLs. Omit to keep the current
    /// filter, pass an empty string to clear it.
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct FeedUrlParams {
    /// Feed URL exactly as listed in the catalog
    pub url: String,
}

#[tool_router]
impl NavigatorServer {
    // === Catalog ===

    #[tool(
        description = "List the catalog of LDES feeds with loaded/idle status and the current selection. Call this first."
    )]
    async fn catalog(&self, params: Parameters<CatalogParams>) -> Result<CallToolResult, McpError> {
        text_result(self.client.catalog(params.0.query.as_deref()).await)
    }

    #[tool(
        description = "Reload the catalog from its remote source. Clears the selection. Falls back to the built-in list if the source is unavailable."
    )]
    async fn refresh_catalog(&self) -> Result<CallToolResult, McpError> {
        text_result(self.client.refresh().await)
    }

    // === Feeds ===

    #[tool(description = "List every loaded feed record with its probe status.")]
    async fn feeds(&self) -> Result<CallToolResult, McpError> {
        text_result(self.client.feeds().await)
    }

    #[tool(
        description = "Select a feed from the catalog. Returns its TTL link and the explorer link."
    )]
    async fn select_feed(
        &self,
        params: Parameters<FeedUrlParams>,
    ) -> Result<CallToolResult, McpError> {
        text_result(self.client.select(&params.0.url).await)
    }

    #[tool(description = "Show the currently selected feed, if any.")]
    async fn selected_feed(&self) -> Result<CallToolResult, McpError> {
        text_result(self.client.selected().await)
    }

    #[tool(
        description = "Check whether a catalog feed is reachable (HTTP HEAD). Records status, content type and size."
    )]
    async fn probe_feed(&self, params: Parameters<FeedUrlParams>) -> Result<CallToolResult, McpError> {
        text_result(self.client.probe(&params.0.url).await)
    }
}

#[tool_handler]
impl ServerHandler for NavigatorServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "ldes-navigator".into(),
                title: Some("LDES Navigator MCP Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                r#"LDES Navigator - browse a catalog of Linked Data Event Streams

WORKFLOW:
1. 'catalog' - See the feeds, optionally filtered by a query
2. 'select_feed' - Pick a feed by URL to get its explorer link
3. 'probe_feed' - Check that a feed is reachable
4. 'refresh_catalog' - Reload the catalog (clears the selection)

TIPS:
- URLs must match a catalog entry exactly
- 'feeds' shows probe results for every loaded feed"#
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_params_deserialize() {
        let json = r#"{"query": "nerc"}"#;
        let params: CatalogParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.query, Some("nerc".to_string()));
    }

    #[test]
    fn test_catalog_params_without_query() {
        let params: CatalogParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.query, None);
    }

    #[test]
    fn test_feed_url_params_deserialize() {
        let json = r#"{"url": "https://example.org/ldes/alpha.ttl"}"#;
        let params: FeedUrlParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.url, "https://example.org/ldes/alpha.ttl");
    }

    #[test]
    fn test_feed_url_params_requires_url() {
        assert!(serde_json::from_str::<FeedUrlParams>("{}").is_err());
    }

    #[test]
    fn test_text_result_maps_errors_to_tool_errors() {
        let ok = text_result(Ok("# Catalog".to_string())).unwrap();
        assert_eq!(ok.is_error, Some(false));

        let err = text_result(Err(anyhow::anyhow!("API error (404 Not Found)"))).unwrap();
        assert_eq!(err.is_error, Some(true));
    }

    #[test]
    fn test_server_info_enables_tools() {
        let client = NavigatorClient::new("http://localhost:8080").unwrap();
        let info = NavigatorServer::new(client).get_info();

        assert_eq!(info.server_info.name, "ldes-navigator");
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn test_server_reports_api_url() {
        let client = NavigatorClient::new("http://nav.test/").unwrap();
        let server = NavigatorServer::new(client);

        assert_eq!(server.api_url(), "http://nav.test");
    }
}

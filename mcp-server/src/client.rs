//! HTTP client for the navigator API
//!
//! Always asks for `text/plain` so tool results are the markdown renderings.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Serialize;

/// Default navigator API location
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// HTTP client for communicating with the navigator API
#[derive(Clone)]
pub struct NavigatorClient {
    client: reqwest::Client,
    base_url: String,
}

impl NavigatorClient {
    /// Create a new client from environment variables
    ///
    /// Optional env vars:
    /// - NAVIGATOR_API_URL: Base URL of the API (default http://localhost:8080)
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("NAVIGATOR_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&base_url)
    }

    /// Create a new client with explicit configuration
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the catalog, optionally replacing the stored search query
    pub async fn catalog(&self, query: Option<&str>) -> Result<String> {
        match query {
            Some(q) => self.get_text("/catalog", &[("q", q)]).await,
            None => self.get_text("/catalog", &[]).await,
        }
    }

    /// Get every loaded feed record
    pub async fn feeds(&self) -> Result<String> {
        self.get_text("/feeds", &[]).await
    }

    /// Get the selected feed with its explorer link
    pub async fn selected(&self) -> Result<String> {
        self.get_text("/selected", &[]).await
    }

    /// Select a catalog feed
    pub async fn select(&self, url: &str) -> Result<String> {
        self.post_text("/select", &FeedUrlRequest { url }).await
    }

    /// Reload the catalog
    pub async fn refresh(&self) -> Result<String> {
        self.post_text("/refresh", &serde_json::json!({})).await
    }

    /// Probe a catalog feed
    pub async fn probe(&self, url: &str) -> Result<String> {
        self.post_text("/feeds/probe", &FeedUrlRequest { url }).await
    }

    // --- Internal helpers ---

    async fn get_text(&self, path: &str, query: &[(&str, &str)]) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .header("Accept", "text/plain")
            .send()
            .await
            .with_context(|| format!("Failed to GET {}", path))?;

        handle_text_response(response).await
    }

    async fn post_text<T: Serialize>(&self, path: &str, body: &T) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .header("Accept", "text/plain")
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to POST {}", path))?;

        handle_text_response(response).await
    }
}

async fn handle_text_response(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    if !status.is_success() {
        anyhow::bail!("API error ({}): {}", status, body);
    }

    Ok(body)
}

// --- Request Types ---

#[derive(Debug, Serialize)]
struct FeedUrlRequest<'a> {
    url: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new() {
        let client = NavigatorClient::new("http://localhost:8080").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = NavigatorClient::new("https://navigator.example.com/").unwrap();
        assert_eq!(client.base_url(), "https://navigator.example.com");
    }

    #[test]
    fn test_feed_url_request_serialization() {
        let req = FeedUrlRequest {
            url: "https://example.org/ldes/alpha.ttl",
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"url":"https://example.org/ldes/alpha.ttl"}"#);
    }
}

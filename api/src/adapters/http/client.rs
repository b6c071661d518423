//! HTTP client for the remote catalog and feed resources

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};

use crate::domain::entities::ProbeResponse;
use crate::domain::ports::{CatalogSource, FeedProber};
use crate::error::FetchError;

/// Implementation of the upstream ports over plain HTTP
pub struct HttpFeedClient {
    http: Client,
    catalog_url: String,
}

impl HttpFeedClient {
    pub fn new(catalog_url: String, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ldes-navigator/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(http, catalog_url))
    }

    /// Wrap an already configured reqwest client
    pub fn with_client(http: Client, catalog_url: String) -> Self {
        Self {
            http,
            catalog_url: catalog_url.trim().to_string(),
        }
    }

    pub fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    async fn error_for_status(response: reqwest::Response) -> FetchError {
        let status = response.status();
        let message = response
            .text()
            .await
            .ok()
            .filter(|body| !body.trim().is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            });

        FetchError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl CatalogSource for HttpFeedClient {
    async fn fetch_catalog(&self) -> Result<serde_json::Value, FetchError> {
        tracing::debug!("Fetching catalog from {}", self.catalog_url);

        let response = self.http.get(&self.catalog_url).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Deserialization(e.to_string()))
    }
}

#[async_trait]
impl FeedProber for HttpFeedClient {
    async fn probe(&self, url: &str) -> Result<ProbeResponse, FetchError> {
        tracing::debug!("Probing feed {}", url);

        let response = self.http.head(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let content_length = response
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        Ok(ProbeResponse {
            status: status.as_u16(),
            content_type,
            content_length,
        })
    }
}

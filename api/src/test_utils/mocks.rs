//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They record calls so tests can verify behavior.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use tokio::sync::Notify;

use crate::domain::entities::ProbeResponse;
use crate::domain::ports::{CatalogSource, FeedProber};
use crate::error::FetchError;

// ============================================================================
// Catalog Source
// ============================================================================

/// What the mock catalog endpoint answers
#[derive(Debug, Clone)]
pub enum MockCatalogResponse {
    /// 2xx with this JSON body
    Json(serde_json::Value),
    /// Non-success status
    Status(u16),
    /// Body that is not JSON
    Malformed,
    /// Transport failure
    Offline,
}

pub struct MockCatalogSource {
    response: RwLock<MockCatalogResponse>,
    calls: AtomicUsize,
    gate: Option<Gate>,
}

struct Gate {
    entered: Notify,
    release: Notify,
}

impl MockCatalogSource {
    pub fn new(response: MockCatalogResponse) -> Self {
        Self {
            response: RwLock::new(response),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Block every fetch until `release` is called
    pub fn gated(mut self) -> Self {
        self.gate = Some(Gate {
            entered: Notify::new(),
            release: Notify::new(),
        });
        self
    }

    pub fn set_response(&self, response: MockCatalogResponse) {
        *self.response.write().unwrap() = response;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Wait until a fetch is parked on the gate
    pub async fn wait_until_entered(&self) {
        if let Some(gate) = &self.gate {
            gate.entered.notified().await;
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.release.notify_one();
        }
    }
}

#[async_trait]
impl CatalogSource for MockCatalogSource {
    async fn fetch_catalog(&self) -> Result<serde_json::Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        let response = self.response.read().unwrap().clone();
        match response {
            MockCatalogResponse::Json(value) => Ok(value),
            MockCatalogResponse::Status(status) => Err(FetchError::Status {
                status,
                message: "mock failure".to_string(),
            }),
            MockCatalogResponse::Malformed => Err(FetchError::Deserialization(
                "expected value at line 1 column 1".to_string(),
            )),
            MockCatalogResponse::Offline => {
                // An unparseable URL yields a genuine reqwest transport error
                let err = reqwest::Client::new()
                    .get("http://")
                    .send()
                    .await
                    .unwrap_err();
                Err(FetchError::Request(err))
            }
        }
    }
}

// ============================================================================
// Feed Prober
// ============================================================================

/// Answers 200 text/turtle for every URL except the ones marked failing
#[derive(Default)]
pub struct MockFeedProber {
    failing: HashSet<String>,
    calls: AtomicUsize,
}

impl MockFeedProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedProber for MockFeedProber {
    async fn probe(&self, url: &str) -> Result<ProbeResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing.contains(url) {
            return Err(FetchError::Status {
                status: 404,
                message: "Not Found".to_string(),
            });
        }

        Ok(ProbeResponse {
            status: 200,
            content_type: Some("text/turtle".to_string()),
            content_length: Some(1024),
        })
    }
}

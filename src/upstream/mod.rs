//! Transport for calls to the upstream events API
mod client;
mod retry;

pub use client::HttpTransport;
pub use retry::RetryPolicy;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;

/// Raw status and body of an upstream reply.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: String,
}

impl UpstreamResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Issues GET requests against the upstream API.
///
/// `path` is relative to the configured base URL and may carry a
/// query string. An `Err` means no status was received at all.
#[async_trait]
pub trait EventsTransport: Send + Sync {
    async fn get(&self, path: &str) -> Result<UpstreamResponse>;
}

pub type SharedTransport = std::sync::Arc<dyn EventsTransport + 'static>;

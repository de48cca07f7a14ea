use std::sync::Arc;

use anyhow::Result;

use crate::api::routes::events::EventFetcher;
use crate::core::AppConfig;
use crate::upstream::{HttpTransport, SharedTransport};

pub struct AppState {
    pub fetcher: EventFetcher,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(transport: SharedTransport, config: AppConfig) -> Self {
        Self {
            fetcher: EventFetcher::new(transport),
            config,
        }
    }

    /// Build state backed by a real HTTP transport for the configured
    /// upstream.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let transport = HttpTransport::new(
            &config.events_api_base_url,
            config.retry_policy.clone(),
            config.request_timeout,
        )?;
        Ok(Self::new(Arc::new(transport), config))
    }
}

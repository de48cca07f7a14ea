use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::upstream::RetryPolicy;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Base URL of the upstream events API, e.g. `https://events.example.com/v1`
    pub events_api_base_url: String,
    pub retry_policy: RetryPolicy,
    /// Per-request timeout for upstream calls. `None` leaves it to reqwest.
    pub request_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn new(events_api_base_url: &str) -> Self {
        Self {
            events_api_base_url: events_api_base_url.to_string(),
            retry_policy: RetryPolicy::default(),
            request_timeout: None,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let events_api_base_url = env::var("EVENTS_API_BASE_URL")
            .context("Missing env var EVENTS_API_BASE_URL")?;

        let default_policy = RetryPolicy::default();
        let retries = match env::var("EVENTS_API_RETRY_COUNT") {
            Ok(val) => val
                .parse::<u32>()
                .with_context(|| format!("Invalid EVENTS_API_RETRY_COUNT: {}", val))?,
            Err(_) => default_policy.retries,
        };
        let delay = match env::var("EVENTS_API_RETRY_DELAY_MS") {
            Ok(val) => Duration::from_millis(
                val.parse::<u64>()
                    .with_context(|| format!("Invalid EVENTS_API_RETRY_DELAY_MS: {}", val))?,
            ),
            Err(_) => default_policy.delay,
        };
        let request_timeout = match env::var("EVENTS_API_TIMEOUT_SECS") {
            Ok(val) => Some(Duration::from_secs(
                val.parse::<u64>()
                    .with_context(|| format!("Invalid EVENTS_API_TIMEOUT_SECS: {}", val))?,
            )),
            Err(_) => None,
        };

        Ok(Self {
            events_api_base_url,
            retry_policy: RetryPolicy::new(retries, delay),
            request_timeout,
        })
    }
}

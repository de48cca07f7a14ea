use std::time::Duration;

use reqwest::StatusCode;

/// Fixed-interval retry for transient upstream failures.
///
/// `retries` counts the extra attempts after the first one, so the
/// default makes at most four calls spaced 500ms apart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn new(retries: u32, delay: Duration) -> Self {
        Self { retries, delay }
    }

    /// A policy that never retries
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Server errors and request timeouts are transient, everything
    /// else is handed back as is.
    pub fn is_transient(status: StatusCode) -> bool {
        status.is_server_error() || status == StatusCode::REQUEST_TIMEOUT
    }

    /// Whether another attempt is allowed after `attempt` calls have
    /// already been made.
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt <= self.retries
    }
}

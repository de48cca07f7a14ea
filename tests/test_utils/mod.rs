//! Test utilities for integration tests
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, body::Body};

use busy_events::api::AppState;
use busy_events::api::app;
use busy_events::core::AppConfig;
use busy_events::upstream::RetryPolicy;

/// Creates a test application router whose upstream is `base_url`,
/// usually a `mockito::Server`.
///
/// Retries keep the default count but wait 1ms so tests that hit
/// transient statuses stay fast.
pub fn test_app(base_url: &str) -> Router {
    let mut config = AppConfig::new(base_url);
    config.retry_policy = RetryPolicy::new(3, Duration::from_millis(1));
    let app_state = AppState::from_config(config).expect("Failed to build app state");
    app(Arc::new(app_state))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not utf-8")
}

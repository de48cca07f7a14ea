use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, redirect};

use super::{EventsTransport, RetryPolicy, UpstreamResponse};

/// `EventsTransport` backed by a pooled reqwest client.
///
/// Redirects are never followed and no cookie store is attached, so a
/// 3xx reply is handed back to the caller like any other status.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    retry_policy: RetryPolicy,
}

impl HttpTransport {
    pub fn new(
        base_url: &str,
        retry_policy: RetryPolicy,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder().redirect(redirect::Policy::none());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_policy,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, url: &str) -> Result<UpstreamResponse> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        Ok(UpstreamResponse { status, body })
    }
}

#[async_trait]
impl EventsTransport for HttpTransport {
    async fn get(&self, path: &str) -> Result<UpstreamResponse> {
        let url = self.url(path);
        let mut attempt = 1;

        loop {
            let result = self.send(&url).await;
            let transient = match &result {
                Ok(resp) => RetryPolicy::is_transient(resp.status),
                Err(_) => true,
            };
            if !transient || !self.retry_policy.should_retry(attempt) {
                return result;
            }

            match &result {
                Ok(resp) => tracing::warn!(
                    attempt,
                    status = resp.status.as_u16(),
                    "Transient upstream response, retrying"
                ),
                Err(e) => tracing::warn!(attempt, "Upstream request failed, retrying: {}", e),
            }
            tokio::time::sleep(self.retry_policy.delay).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn fast_retries(retries: u32) -> RetryPolicy {
        RetryPolicy::new(retries, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_get_returns_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/events?email=a@b.com")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"events": []}"#)
            .expect(1)
            .create_async()
            .await;

        let transport = HttpTransport::new(&server.url(), fast_retries(3), None).unwrap();
        let resp = transport.get("events?email=a@b.com").await.unwrap();

        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.body, r#"{"events": []}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_joins_base_url_with_trailing_slash() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/events?email=a@b.com")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let base_url = format!("{}/v1/", server.url());
        let transport = HttpTransport::new(&base_url, RetryPolicy::none(), None).unwrap();
        let resp = transport.get("events?email=a@b.com").await.unwrap();

        assert_eq!(resp.status, StatusCode::OK);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_retries_server_errors_then_gives_up() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/events?email=a@b.com")
            .with_status(503)
            .with_body("unavailable")
            .expect(4)
            .create_async()
            .await;

        let transport = HttpTransport::new(&server.url(), fast_retries(3), None).unwrap();
        let resp = transport.get("events?email=a@b.com").await.unwrap();

        assert_eq!(resp.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(resp.body, "unavailable");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_does_not_retry_client_errors() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/events?email=a@b.com")
            .with_status(429)
            .with_body("slow down")
            .expect(1)
            .create_async()
            .await;

        let transport = HttpTransport::new(&server.url(), fast_retries(3), None).unwrap();
        let resp = transport.get("events?email=a@b.com").await.unwrap();

        assert_eq!(resp.status, StatusCode::TOO_MANY_REQUESTS);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_does_not_follow_redirects() {
        let mut server = mockito::Server::new_async().await;
        let redirect = server
            .mock("GET", "/events?email=a@b.com")
            .with_status(302)
            .with_header("location", "/elsewhere")
            .expect(1)
            .create_async()
            .await;
        let elsewhere = server
            .mock("GET", "/elsewhere")
            .with_status(200)
            .expect(0)
            .create_async()
            .await;

        let transport = HttpTransport::new(&server.url(), RetryPolicy::none(), None).unwrap();
        let resp = transport.get("events?email=a@b.com").await.unwrap();

        assert_eq!(resp.status, StatusCode::FOUND);
        redirect.assert_async().await;
        elsewhere.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_errors_when_connection_refused() {
        // Nothing listens on port 1
        let transport =
            HttpTransport::new("http://127.0.0.1:1", fast_retries(1), None).unwrap();
        let result = transport.get("events?email=a@b.com").await;
        assert!(result.is_err());
    }
}

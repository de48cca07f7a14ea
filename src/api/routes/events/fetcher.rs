//! Fetches events from the upstream API and keeps the ones that
//! block a person's time.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

use super::public::{ErrorMessage, Event, EventsApiResponse, UpstreamEventsResponse};
use crate::upstream::{SharedTransport, UpstreamResponse};

/// Statuses that mark an event as blocking time
const FUTURE_EVENT_STATUSES: [&str; 2] = ["Busy", "OutOfOffice"];

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Email parameter is required.")]
    MissingEmail,

    /// Upstream replied with one of the statuses it documents as
    /// errors. The body is forwarded as the message.
    #[error("Upstream error {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Unexpected upstream status {status}")]
    UnexpectedStatus { status: StatusCode },

    #[error("Error parsing API response: {0}")]
    Parse(#[from] serde_json::Error),

    /// No status was received from upstream
    #[error("Upstream request failed: {0:#}")]
    Transport(anyhow::Error),
}

impl FetchError {
    pub fn status(&self) -> StatusCode {
        match self {
            FetchError::MissingEmail => StatusCode::BAD_REQUEST,
            FetchError::Upstream { status, .. } => *status,
            FetchError::UnexpectedStatus { status } => *status,
            FetchError::Parse(_) | FetchError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the caller. Transport failures carry no body.
    pub fn message(&self) -> Option<String> {
        match self {
            FetchError::MissingEmail => Some(self.to_string()),
            FetchError::Upstream { message, .. } => Some(message.clone()),
            FetchError::UnexpectedStatus { .. } => Some(String::from("Unexpected error")),
            FetchError::Parse(_) => Some(String::from("Error parsing API response")),
            FetchError::Transport(_) => None,
        }
    }
}

impl IntoResponse for FetchError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.message() {
            Some(message) => (status, Json(ErrorMessage { message })).into_response(),
            None => status.into_response(),
        }
    }
}

/// How an upstream status is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Parse and filter the body
    Success,
    /// Forward the status and the upstream body as the message
    Passthrough,
    /// Forward the status with a generic message
    Unexpected,
}

impl StatusPolicy {
    pub fn for_status(status: StatusCode) -> Self {
        match status {
            StatusCode::OK => StatusPolicy::Success,
            StatusCode::BAD_REQUEST
            | StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::GATEWAY_TIMEOUT => StatusPolicy::Passthrough,
            _ => StatusPolicy::Unexpected,
        }
    }
}

pub fn is_future_event(event: &Event) -> bool {
    event
        .status
        .as_deref()
        .is_some_and(|status| FUTURE_EVENT_STATUSES.contains(&status))
}

/// Keep only busy and out of office events, preserving their order.
pub fn filter_future_events(events: Vec<Event>) -> Vec<Event> {
    events.into_iter().filter(is_future_event).collect()
}

#[derive(Clone)]
pub struct EventFetcher {
    transport: SharedTransport,
}

impl EventFetcher {
    pub fn new(transport: SharedTransport) -> Self {
        Self { transport }
    }

    pub async fn fetch_future_events(&self, email: &str) -> Result<EventsApiResponse, FetchError> {
        if email.is_empty() {
            return Err(FetchError::MissingEmail);
        }

        // The email is embedded as given
        let path = format!("events?email={}", email);
        let resp = match self.transport.get(&path).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(
                    status = StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    "API error - An error occurred: {:#}",
                    e
                );
                return Err(FetchError::Transport(e));
            }
        };

        let UpstreamResponse { status, body } = resp;
        match StatusPolicy::for_status(status) {
            StatusPolicy::Success => {
                let parsed: UpstreamEventsResponse = serde_json::from_str(&body).map_err(|e| {
                    tracing::error!("Error parsing JSON response: {}", e);
                    FetchError::Parse(e)
                })?;

                let events = filter_future_events(parsed.events);
                tracing::info!(email, number_of_events = events.len(), "API call is successful");

                Ok(EventsApiResponse {
                    email: email.to_string(),
                    number_of_events: events.len(),
                    events,
                })
            }
            StatusPolicy::Passthrough => {
                tracing::error!(status = status.as_u16(), message = %body, "API error");
                let message = if body.is_empty() {
                    String::from("Unknown error")
                } else {
                    body
                };
                Err(FetchError::Upstream { status, message })
            }
            StatusPolicy::Unexpected => {
                tracing::error!(
                    status = status.as_u16(),
                    message = "Unexpected API response",
                    "API error"
                );
                Err(FetchError::UnexpectedStatus { status })
            }
        }
    }
}

//! Public types for the events API
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Repeated `email` parameters are collected so the extractor never
/// rejects them. Only the first one is used.
#[derive(Deserialize)]
pub struct EventQuery {
    #[serde(default)]
    pub email: Vec<String>,
}

/// A single calendar entry. Only `status` is interpreted, every other
/// field is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Absent and `null` are both `None`
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Body returned by the upstream events API. Its `email` and
/// `number_of_events` are not used, the response echoes the query and
/// counts the filtered events instead.
#[derive(Debug, Deserialize)]
pub struct UpstreamEventsResponse {
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsApiResponse {
    pub email: String,
    pub number_of_events: usize,
    pub events: Vec<Event>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

//! Router for the events API

use std::sync::Arc;

use axum::{Router, extract::State, response::Json};
use axum_extra::extract::Query;

use super::FetchError;
use super::public;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

async fn events_handler(
    State(state): State<SharedState>,
    Query(params): Query<public::EventQuery>,
) -> Result<Json<public::EventsApiResponse>, FetchError> {
    let email = params.email.into_iter().next().unwrap_or_default();
    state.fetcher.fetch_future_events(&email).await.map(Json)
}

/// Create the events router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::get(events_handler))
}

mod fetcher;
pub mod public;
mod router;

pub use fetcher::{EventFetcher, FetchError, StatusPolicy, filter_future_events, is_future_event};
pub use router::router;

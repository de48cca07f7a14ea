//! Public API types

// Re-export public types from each route

pub mod events {
    pub use crate::api::routes::events::public::*;
    pub use crate::api::routes::events::{FetchError, StatusPolicy};
}

use anyhow::Result;
use serde_json::json;

use crate::api::AppState;
use crate::core::AppConfig;

/// Run a single lookup against the configured upstream and print the
/// outward response as JSON.
pub async fn run(email: String) -> Result<()> {
    let config = AppConfig::from_env()?;
    let state = AppState::from_config(config)?;

    match state.fetcher.fetch_future_events(&email).await {
        Ok(resp) => println!("{}", serde_json::to_string_pretty(&resp)?),
        Err(e) => println!(
            "{}",
            json!({
                "status": e.status().as_u16(),
                "message": e.message(),
            })
        ),
    }
    Ok(())
}

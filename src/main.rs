use anyhow::Result;
use busy_events::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}

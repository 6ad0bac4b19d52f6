//! Scrapes the configured trackers for the given info hashes.
//!
//! ```text
//! cargo run -- 9c38422213e30bff212b30c360d26f9a02136422
//! ```
use torrust_swarm_scraper::console::clients::scraper::app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}

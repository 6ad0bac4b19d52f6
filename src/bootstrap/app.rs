//! Builds what a scrape session needs from the configuration.
use std::sync::Arc;

use torrust_swarm_scraper_configuration::Configuration;

use crate::bootstrap;
use crate::core::scraper::Scraper;
use crate::shared::bit_torrent::tracker::{http, Client};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Initializes logging and returns the tracker client.
///
/// # Errors
///
/// Will return an error if the HTTP client can't be built.
pub fn setup(configuration: &Configuration) -> Result<Arc<dyn Scraper>, reqwest::Error> {
    initialize_logging(configuration);

    Ok(Arc::new(initialize_scraper()?))
}

pub fn initialize_logging(configuration: &Configuration) {
    bootstrap::logging::setup(&configuration.logging);
}

/// # Errors
///
/// Will return an error if the HTTP client can't be built.
pub fn initialize_scraper() -> Result<Client, reqwest::Error> {
    let reqwest = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

    Ok(Client::new(http::client::Client::new(reqwest)))
}

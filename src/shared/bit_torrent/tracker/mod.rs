//! Tracker protocol clients.
//!
//! [`Client`] is the [`Scraper`] used in production: it picks the protocol
//! from the tracker url scheme.
pub mod http;
pub mod udp;

use std::time::Duration;

use async_trait::async_trait;
use torrust_swarm_scraper_primitives::info_hash::InfoHash;
use url::Url;

use crate::core::scraper::{ScrapeError, ScrapeMap, Scraper};

#[derive(Debug, Clone, Default)]
pub struct Client {
    http: http::client::Client,
}

impl Client {
    #[must_use]
    pub fn new(http: http::client::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Scraper for Client {
    async fn scrape(&self, tracker: &Url, info_hashes: &[InfoHash], timeout: Duration) -> Result<ScrapeMap, ScrapeError> {
        match tracker.scheme() {
            "udp" => Ok(udp::client::scrape(tracker, info_hashes).await?),
            "http" | "https" => Ok(self.http.scrape(tracker, info_hashes, timeout).await?),
            scheme => Err(ScrapeError::UnsupportedScheme {
                scheme: scheme.to_owned(),
            }),
        }
    }
}

//! The seam between the scraping logic and the tracker protocols.
//!
//! [`BatchScraper`](crate::core::batch::BatchScraper) only knows how to split
//! work into requests. Sending one request to one tracker is the job of a
//! [`Scraper`]. The production implementation is the protocol-dispatching
//! [`Client`](crate::shared::bit_torrent::tracker::Client).
use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use torrust_swarm_scraper_primitives::info_hash::InfoHash;
use torrust_swarm_scraper_primitives::swarm_counters::SwarmCounters;
use url::Url;

use crate::shared::bit_torrent::tracker::{http, udp};

/// Counters per info hash, as returned by one scrape request.
///
/// Ordered by info hash so results are emitted in a deterministic order.
pub type ScrapeMap = BTreeMap<InfoHash, SwarmCounters>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Scraper: Sync + Send {
    /// Sends one scrape request for `info_hashes` to `tracker`.
    ///
    /// Info hashes the tracker does not know may be missing from the
    /// returned map.
    ///
    /// # Errors
    ///
    /// Will return an error if the request can't be sent, no valid answer
    /// arrives within `timeout`, or the tracker rejects the request.
    async fn scrape(&self, tracker: &Url, info_hashes: &[InfoHash], timeout: Duration) -> Result<ScrapeMap, ScrapeError>;
}

/// Why one scrape request failed.
#[derive(Error, Debug, Clone)]
pub enum ScrapeError {
    #[error("no response within {} ms", timeout.as_millis())]
    Timeout { timeout: Duration },

    #[error("unsupported tracker scheme `{scheme}`")]
    UnsupportedScheme { scheme: String },

    #[error("udp tracker error: {0}")]
    Udp(#[from] udp::Error),

    #[error("http tracker error: {0}")]
    Http(#[from] http::Error),
}

/// A scrape failure together with the tracker it happened on.
#[derive(Error, Debug, Clone)]
#[error("{source} at {tracker}")]
pub struct TrackerError {
    pub tracker: Url,
    pub source: ScrapeError,
}

impl TrackerError {
    #[must_use]
    pub fn new(tracker: Url, source: ScrapeError) -> Self {
        Self { tracker, source }
    }
}

//! The scraping logic.
//!
//! A scrape session asks every tracker in the catalog for the swarm counters
//! of a list of torrents and streams, per torrent, each report that beats the
//! best one seen so far.
//!
//! ```text
//!  tracker A ──> BatchScraper ──┐
//!  tracker B ──> BatchScraper ──┼──> fan_in ──> BestResultTracker ──> SeedInfoStream
//!  tracker C ──> BatchScraper ──┘
//! ```
//!
//! - [`batch`]: sequential, batched scraping of one tracker.
//! - [`combine`]: merges many streams into one, in completion order.
//! - [`best`]: keeps the best report per torrent.
//! - [`session`]: the entry point wiring everything together.
//! - [`scraper`]: the trait the protocol clients implement.
pub mod batch;
pub mod best;
pub mod combine;
pub mod scraper;
pub mod session;

#[cfg(test)]
pub(crate) mod fakes;

use serde::{Deserialize, Serialize};
use torrust_swarm_scraper_primitives::info_hash::InfoHash;
use torrust_swarm_scraper_primitives::swarm_counters::SwarmCounters;
pub use torrust_swarm_scraper_configuration::TrackerDescriptor;
use url::Url;

/// What one tracker reported about one torrent.
///
/// Serialized as:
///
/// ```json
/// {"seeders":12,"completed":340,"leechers":3,"infohash":"9c38422213e30bff212b30c360d26f9a02136422","trackerUrl":"udp://tracker.opentrackr.org:1337/announce"}
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScrapeResult {
    #[serde(flatten)]
    pub counters: SwarmCounters,
    #[serde(rename = "infohash")]
    pub info_hash: InfoHash,
    #[serde(rename = "trackerUrl")]
    pub tracker_url: Url,
}

impl ScrapeResult {
    #[must_use]
    pub fn new(info_hash: InfoHash, tracker_url: Url, counters: SwarmCounters) -> Self {
        Self {
            counters,
            info_hash,
            tracker_url,
        }
    }
}

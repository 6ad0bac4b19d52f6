//! Best known report per torrent.
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use torrust_swarm_scraper_primitives::info_hash::InfoHash;

use super::ScrapeResult;

/// Keeps, for every torrent, the healthiest report received so far.
///
/// A report replaces the current one only when its counters are strictly
/// better (see [`SwarmCounters::is_better_than`](torrust_swarm_scraper_primitives::swarm_counters::SwarmCounters::is_better_than)).
/// So the sequence of accepted reports for one torrent is strictly
/// increasing and ties keep the first report.
#[derive(Debug, Default)]
pub struct BestResultTracker {
    best: HashMap<InfoHash, ScrapeResult>,
}

impl BestResultTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a report. Returns it back when it became the new best one for
    /// its torrent, `None` when it was discarded.
    pub fn offer(&mut self, result: ScrapeResult) -> Option<ScrapeResult> {
        match self.best.entry(result.info_hash) {
            Entry::Vacant(entry) => Some(entry.insert(result).clone()),
            Entry::Occupied(mut entry) => {
                if result.counters.is_better_than(&entry.get().counters) {
                    entry.insert(result.clone());
                    Some(result)
                } else {
                    None
                }
            }
        }
    }

    #[must_use]
    pub fn best(&self, info_hash: &InfoHash) -> Option<&ScrapeResult> {
        self.best.get(info_hash)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.best.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// Consumes the tracker returning the best report per torrent.
    #[must_use]
    pub fn into_table(self) -> HashMap<InfoHash, ScrapeResult> {
        self.best
    }
}

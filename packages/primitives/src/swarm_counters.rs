use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Swarm health counters reported by one tracker for one torrent.
///
/// See [BEP 48: Tracker Protocol Extension: Scrape](https://www.bittorrent.org/beps/bep_0048.html)
/// and [BEP 15: UDP Tracker Protocol](https://www.bittorrent.org/beps/bep_0015.html).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Constructor)]
pub struct SwarmCounters {
    /// (i.e `complete`): The number of active peers that have completed downloading.
    pub seeders: u32,
    /// (i.e `downloaded`): The number of peers that have ever completed downloading.
    pub completed: u32,
    /// (i.e `incomplete`): The number of active peers that have not completed downloading.
    pub leechers: u32,
}

impl SwarmCounters {
    #[must_use]
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// The key used to rank two reports for the same torrent. Seeders weigh
    /// most, then completed downloads, then leechers.
    #[must_use]
    pub fn rank(&self) -> (u32, u32, u32) {
        (self.seeders, self.completed, self.leechers)
    }

    /// Whether these counters describe a strictly healthier swarm than `other`.
    ///
    /// Equal counters are never better than each other.
    #[must_use]
    pub fn is_better_than(&self, other: &SwarmCounters) -> bool {
        self.rank() > other.rank()
    }
}

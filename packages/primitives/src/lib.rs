//! Primitive types for the [Torrust Swarm Scraper](https://docs.rs/torrust-swarm-scraper).
//!
//! This module contains the basic data structures shared by the scraper
//! packages: the torrent identifier ([`InfoHash`](info_hash::InfoHash)) and
//! the swarm health counters a tracker reports for it
//! ([`SwarmCounters`](swarm_counters::SwarmCounters)).
pub mod info_hash;
pub mod swarm_counters;

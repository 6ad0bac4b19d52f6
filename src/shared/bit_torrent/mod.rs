//! `BitTorrent` protocol related code.
//!
//! - [`tracker`]: clients for the UDP and HTTP tracker scrape protocols.
pub mod tracker;

//! **Torrust Swarm Scraper** asks many `BitTorrent` trackers, concurrently,
//! how healthy the swarms of some torrents are, and streams the best answer
//! known so far for each torrent.
//!
//! # Table of contents
//!
//! - [Features](#features)
//! - [Usage](#usage)
//! - [Configuration](#configuration)
//! - [Components](#components)
//!
//! # Features
//!
//! - UDP ([BEP 15](https://www.bittorrent.org/beps/bep_0015.html)) and HTTP
//!   ([BEP 48](https://www.bittorrent.org/beps/bep_0048.html)) scrape.
//! - All trackers are scraped at the same time, each one sequentially and in
//!   batches of a configurable size.
//! - A result is only emitted when it improves, for its torrent, on every
//!   result emitted before: more seeders, then more completed downloads, then
//!   more leechers.
//! - A slow or failing tracker never holds back or breaks the others.
//! - Stopping the consumer cancels every request still in flight.
//!
//! # Usage
//!
//! ```text
//! cargo run -- 9c38422213e30bff212b30c360d26f9a02136422 a4b1e1e4c3a2e5f2d9a1b3c5d7e9f1a3b5c7d9e1
//! ```
//!
//! Results are written to `stdout`, one JSON object per line, and logs to
//! `stderr`. See [`console::clients::scraper`] for the output format.
//!
//! As a library:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use futures::StreamExt;
//! use torrust_swarm_scraper::bootstrap::app::initialize_scraper;
//! use torrust_swarm_scraper::core::session::{parse_info_hashes, scrape_seed_info};
//! use torrust_swarm_scraper_configuration::Configuration;
//!
//! # async fn scrape() -> anyhow::Result<()> {
//! let configuration = Configuration::load_from_file("./share/default/config/scraper.toml")?;
//! let info_hashes = parse_info_hashes(&["9c38422213e30bff212b30c360d26f9a02136422"])?;
//!
//! let mut session = scrape_seed_info(
//!     Arc::new(initialize_scraper()?),
//!     &configuration.tracker_descriptors()?,
//!     info_hashes,
//! )?;
//!
//! while let Some(result) = session.next().await {
//!     println!("{} has {} seeders at {}", result.info_hash, result.counters.seeders, result.tracker_url);
//! }
//!
//! session.outcome()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! The tracker catalog and the default batch size and timeout are read from
//! a TOML file, `./share/default/config/scraper.toml` by default. Refer to
//! the [configuration crate documentation](https://docs.rs/torrust-swarm-scraper-configuration).
//!
//! # Components
//!
//! - [`core`]: batching, fan-in and best-result tracking. Independent of the
//!   wire protocols.
//! - [`shared::bit_torrent::tracker`]: the UDP and HTTP scrape clients.
//! - [`bootstrap`]: logging and client setup.
//! - [`console`]: the command line client.
pub mod bootstrap;
pub mod console;
pub mod core;
pub mod shared;

//! Testing helpers for [Torrust Swarm Scraper](https://docs.rs/torrust-swarm-scraper).
//!
//! A collection of functions and types to help with testing the scraper packages.
pub mod configuration;
pub mod random;

//! Scraper bootstrap logic.
//!
//! Setup steps run before a scrape session:
//!
//! - [`logging`]: the `tracing` subscriber, writing to `stderr`.
//! - [`app`]: the tracker clients behind the [`Scraper`](crate::core::scraper::Scraper) trait.
pub mod app;
pub mod logging;

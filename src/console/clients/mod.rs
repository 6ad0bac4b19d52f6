//! Console clients.
pub mod scraper;

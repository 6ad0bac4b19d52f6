//! HTTP tracker scrape client.
//!
//! See [BEP 48: Tracker Protocol Extension: Scrape](https://www.bittorrent.org/beps/bep_0048.html).
pub mod client;
pub mod scrape;

use std::sync::Arc;

use percent_encoding::NON_ALPHANUMERIC;
use thiserror::Error;
use torrust_swarm_scraper_primitives::info_hash::ByteArray20;
use url::Url;

#[must_use]
pub fn percent_encode_byte_array(bytes: &ByteArray20) -> String {
    percent_encoding::percent_encode(bytes, NON_ALPHANUMERIC).to_string()
}

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Tracker `{url}` has no scrape convention url: the last path segment does not start with `announce`")]
    ScrapeNotSupported { url: Url },

    #[error("Failed to send the scrape request, with error: {err}")]
    UnableToSendRequest { err: Arc<reqwest::Error> },

    #[error("Failed to read the scrape response body, with error: {err}")]
    UnableToReadResponse { err: Arc<reqwest::Error> },

    #[error("Unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Invalid bencoded response, with error: {err}")]
    InvalidBencode { err: Arc<serde_bencode::Error> },

    #[error("Tracker returned failure: {reason}")]
    TrackerFailure { reason: String },

    #[error("Malformed scrape response: {reason}")]
    Malformed { reason: String },
}

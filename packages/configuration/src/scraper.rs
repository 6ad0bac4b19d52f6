use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_MAX_BATCH_SIZE, DEFAULT_REQUEST_TIMEOUT};

/// Defaults shared by every tracker in the catalog.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Scraper {
    /// Maximum time in milliseconds to wait for one scrape response.
    #[serde(default = "Scraper::default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Maximum number of info hashes sent in one scrape request.
    #[serde(default = "Scraper::default_max_batch_size")]
    pub max_batch_size: usize,
}

impl Default for Scraper {
    fn default() -> Self {
        Self {
            request_timeout_ms: Self::default_request_timeout_ms(),
            max_batch_size: Self::default_max_batch_size(),
        }
    }
}

impl Scraper {
    #[allow(clippy::cast_possible_truncation)]
    fn default_request_timeout_ms() -> u64 {
        DEFAULT_REQUEST_TIMEOUT.as_millis() as u64
    }

    fn default_max_batch_size() -> usize {
        DEFAULT_MAX_BATCH_SIZE
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

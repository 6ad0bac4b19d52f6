use std::num::NonZeroUsize;
use std::time::Duration;

use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Scraper};

/// One entry of the tracker catalog, as written in the configuration.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Tracker {
    /// The tracker URL. Supported schemes are `udp`, `http` and `https`.
    /// HTTP trackers can be given by their announce URL; the scrape URL is
    /// derived from it.
    pub url: Url,

    /// Overrides `scraper.max_batch_size` for this tracker.
    #[serde(default)]
    pub max_batch_size: Option<usize>,

    /// Overrides `scraper.request_timeout_ms` for this tracker.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

impl Tracker {
    /// Resolves this entry into a [`TrackerDescriptor`], taking missing
    /// values from `defaults`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the resolved batch size or timeout is zero, or
    /// if the URL scheme is not supported.
    pub fn descriptor(&self, defaults: &Scraper) -> Result<TrackerDescriptor, Error> {
        match self.url.scheme() {
            "udp" | "http" | "https" => {}
            _ => return Err(Error::UnsupportedScheme { url: self.url.clone() }),
        }

        let max_batch_size = NonZeroUsize::new(self.max_batch_size.unwrap_or(defaults.max_batch_size))
            .ok_or_else(|| Error::ZeroMaxBatchSize { url: self.url.clone() })?;

        let request_timeout = Duration::from_millis(self.request_timeout_ms.unwrap_or(defaults.request_timeout_ms));

        if request_timeout.is_zero() {
            return Err(Error::ZeroRequestTimeout { url: self.url.clone() });
        }

        Ok(TrackerDescriptor::new(self.url.clone(), max_batch_size, request_timeout))
    }
}

/// A validated tracker: where to send scrape requests, how many info hashes
/// fit in one request and how long to wait for each answer.
#[derive(PartialEq, Eq, Debug, Clone, Constructor)]
pub struct TrackerDescriptor {
    pub url: Url,
    pub max_batch_size: NonZeroUsize,
    pub request_timeout: Duration,
}

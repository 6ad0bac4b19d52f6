//! Configuration data structures for the [Torrust Swarm Scraper](https://docs.rs/torrust-swarm-scraper).
//!
//! The configuration is a TOML document:
//!
//! ```toml
//! [logging]
//! threshold = "info"
//! style = "compact"
//!
//! [scraper]
//! request_timeout_ms = 15000
//! max_batch_size = 50
//!
//! [[trackers]]
//! url = "udp://tracker.opentrackr.org:1337/announce"
//! max_batch_size = 75
//!
//! [[trackers]]
//! url = "http://nyaa.tracker.wf:7777/announce"
//! request_timeout_ms = 10000
//! ```
//!
//! Values in the `[scraper]` section are the defaults for trackers that do
//! not set their own `max_batch_size` or `request_timeout_ms`.
//!
//! Any scalar value can be overridden with an environment variable using the
//! `TORRUST_SCRAPER_CONFIG_OVERRIDE_` prefix and `__` as the section
//! separator, for example:
//!
//! ```text
//! TORRUST_SCRAPER_CONFIG_OVERRIDE_LOGGING__THRESHOLD=debug
//! TORRUST_SCRAPER_CONFIG_OVERRIDE_SCRAPER__REQUEST_TIMEOUT_MS=5000
//! ```
pub mod logging;
pub mod scraper;
pub mod tracker;

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use derive_more::Constructor;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Maximum time to wait for one tracker to answer one scrape request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Info hashes sent to one tracker in one scrape request when neither the
/// tracker nor the `[scraper]` section says otherwise.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 50;

/// Prefix for environment variables that override configuration values.
const CONFIG_OVERRIDE_PREFIX: &str = "TORRUST_SCRAPER_CONFIG_OVERRIDE_";

/// Path separator in the environment variable names that override
/// configuration values.
const CONFIG_OVERRIDE_SEPARATOR: &str = "__";

pub type Logging = logging::Logging;
pub type Threshold = logging::Threshold;
pub type LoggingStyle = logging::Style;
pub type Scraper = scraper::Scraper;
pub type Tracker = tracker::Tracker;
pub type TrackerDescriptor = tracker::TrackerDescriptor;

/// Information required for loading config.
///
/// The TOML content has priority over the file path.
#[derive(Debug, Default, Clone, Constructor)]
pub struct Info {
    config_toml: Option<String>,
    config_toml_path: String,
}

/// Errors that can occur when loading or validating the configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unable to load from Config File: `{path}` does not exist")]
    ConfigFileNotFound { path: String },

    #[error("Failed processing the configuration: {source}")]
    ConfigError { source: Box<figment::Error> },

    #[error("Invalid tracker `{url}`: the max batch size must be greater than zero")]
    ZeroMaxBatchSize { url: Url },

    #[error("Invalid tracker `{url}`: the request timeout must be greater than zero")]
    ZeroRequestTimeout { url: Url },

    #[error("Invalid tracker `{url}`: unsupported scheme, expected `udp`, `http` or `https`")]
    UnsupportedScheme { url: Url },
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigError { source: Box::new(err) }
    }
}

/// Core configuration for the scraper.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct Configuration {
    /// Logging configuration.
    #[serde(default)]
    pub logging: Logging,

    /// Defaults applied to every tracker.
    #[serde(default)]
    pub scraper: Scraper,

    /// The tracker catalog. Every tracker is scraped in each session.
    #[serde(default)]
    pub trackers: Vec<Tracker>,
}

impl Configuration {
    /// Loads the configuration from the [`Info`] struct, merging the
    /// environment variable overrides on top.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the configuration file does not exist, the
    /// content is not valid TOML for this configuration, or the tracker
    /// catalog does not pass validation.
    pub fn load(info: &Info) -> Result<Configuration, Error> {
        let figment = if let Some(config_toml) = &info.config_toml {
            Figment::from(Toml::string(config_toml))
        } else {
            if !Path::new(&info.config_toml_path).exists() {
                return Err(Error::ConfigFileNotFound {
                    path: info.config_toml_path.clone(),
                });
            }

            Figment::from(Toml::file(&info.config_toml_path))
        };

        let figment = figment.merge(Env::prefixed(CONFIG_OVERRIDE_PREFIX).split(CONFIG_OVERRIDE_SEPARATOR));

        let config: Configuration = figment.extract()?;

        config.tracker_descriptors()?;

        Ok(config)
    }

    /// Loads the configuration from the configuration file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `path` does not exist or has a bad configuration.
    pub fn load_from_file(path: &str) -> Result<Configuration, Error> {
        Self::load(&Info::new(None, path.to_owned()))
    }

    /// Resolves the tracker catalog into the descriptors the scraper works
    /// with. Missing per-tracker values fall back to the `[scraper]` section.
    ///
    /// A tracker URL listed more than once is only scraped once; the first
    /// entry wins.
    ///
    /// # Errors
    ///
    /// Will return `Err` if a tracker has a zero batch size or timeout, or an
    /// unsupported URL scheme.
    pub fn tracker_descriptors(&self) -> Result<Vec<TrackerDescriptor>, Error> {
        let mut seen = HashSet::new();
        let mut descriptors = Vec::with_capacity(self.trackers.len());

        for tracker in &self.trackers {
            let descriptor = tracker.descriptor(&self.scraper)?;

            if seen.insert(descriptor.url.clone()) {
                descriptors.push(descriptor);
            }
        }

        Ok(descriptors)
    }
}

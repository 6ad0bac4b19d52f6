use torrust_swarm_scraper_configuration::{Configuration, Threshold, Tracker};
use url::Url;

use crate::random;

/// This configuration is used for testing. Logging is off and the tracker
/// catalog is empty.
#[must_use]
pub fn ephemeral() -> Configuration {
    let mut config = Configuration::default();

    config.logging.threshold = Threshold::Off; // Change to `debug` for tests debugging

    config
}

/// Like [`ephemeral`], with one tracker per given URL using the default
/// batch size and timeout.
///
/// # Panics
///
/// Will panic if one of the URLs can't be parsed.
#[must_use]
pub fn ephemeral_with_trackers(urls: &[&str]) -> Configuration {
    let mut config = ephemeral();

    config.trackers = urls
        .iter()
        .map(|url| Tracker {
            url: Url::parse(url).expect("it should be a valid tracker URL"),
            max_batch_size: None,
            request_timeout_ms: None,
        })
        .collect();

    config
}

/// A tracker URL on a random path of the loopback interface that nothing
/// listens on.
#[must_use]
pub fn unreachable_http_tracker_url() -> String {
    format!("http://127.0.0.1:1/{}/announce", random::string(8))
}

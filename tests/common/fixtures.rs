use std::time::Duration;

use torrust_swarm_scraper::core::TrackerDescriptor;
use torrust_swarm_scraper_configuration::Tracker;
use torrust_swarm_scraper_test_helpers::configuration;
use url::Url;

#[allow(dead_code)]
pub fn invalid_info_hashes() -> Vec<String> {
    [
        "0".to_string(),
        "-1".to_string(),
        "1.1".to_string(),
        "INVALID INFOHASH".to_string(),
        "9c38422213e30bff212b30c360d26f9a0213642".to_string(), // 39-char length instead of 40
        "9c38422213e30bff212b30c360d26f9a0213642&".to_string(), // Invalid char
    ]
    .to_vec()
}

/// Descriptors for the given tracker urls, with the default batch size and
/// timeout.
pub fn trackers(urls: &[&Url]) -> Vec<TrackerDescriptor> {
    let urls: Vec<&str> = urls.iter().map(|url| url.as_str()).collect();

    configuration::ephemeral_with_trackers(&urls)
        .tracker_descriptors()
        .expect("it should be a valid tracker catalog")
}

/// A descriptor for one tracker with its own batch size and timeout.
pub fn tracker(url: &Url, max_batch_size: usize, request_timeout: Duration) -> TrackerDescriptor {
    let mut config = configuration::ephemeral();

    config.trackers = vec![Tracker {
        url: url.clone(),
        max_batch_size: Some(max_batch_size),
        request_timeout_ms: Some(u64::try_from(request_timeout.as_millis()).expect("it should fit in a u64")),
    }];

    config
        .tracker_descriptors()
        .expect("it should be a valid tracker catalog")
        .remove(0)
}

use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client as ReqwestClient;
use torrust_swarm_scraper_primitives::info_hash::InfoHash;
use tracing::debug;
use url::Url;

use super::{percent_encode_byte_array, scrape, Error};
use crate::core::scraper::ScrapeMap;

/// HTTP Tracker Client
#[derive(Debug, Clone, Default)]
pub struct Client {
    reqwest: ReqwestClient,
}

/// URL components in this context:
///
/// ```text
/// http://tracker.example.com:7777/announce?passkey=abc
/// \_____________________________/\_______/\__________/
///               |                    |          |
///           base url               path       query
/// ```
///
/// The scrape url keeps the base url and the query, and replaces the
/// `announce` prefix of the last path segment with `scrape`. The info hashes
/// are appended as repeated `info_hash` parameters.
impl Client {
    #[must_use]
    pub fn new(reqwest: ReqwestClient) -> Self {
        Self { reqwest }
    }

    /// Sends one scrape request to the HTTP tracker whose announce (or
    /// scrape) url is `tracker`.
    ///
    /// # Errors
    ///
    /// Will return an error if the tracker does not support scrape, the
    /// request fails, or the response is not a valid scrape response.
    pub async fn scrape(&self, tracker: &Url, info_hashes: &[InfoHash], timeout: Duration) -> Result<ScrapeMap, Error> {
        let url = build_scrape_url(tracker, info_hashes)?;

        debug!(target: "HTTP tracker client", "GET {url}");

        let response = self
            .reqwest
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| Error::UnableToSendRequest { err: Arc::new(err) })?;

        let status = response.status();

        if !status.is_success() {
            return Err(Error::UnexpectedStatus { status: status.as_u16() });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| Error::UnableToReadResponse { err: Arc::new(err) })?;

        scrape::parse(&bytes)
    }
}

/// Derives the scrape url from an announce url.
///
/// # Errors
///
/// Will return an error if the last path segment starts neither with
/// `announce` nor with `scrape`.
pub fn scrape_url(tracker: &Url) -> Result<Url, Error> {
    let not_supported = || Error::ScrapeNotSupported { url: tracker.clone() };

    let last_segment = tracker
        .path_segments()
        .and_then(Iterator::last)
        .ok_or_else(not_supported)?;

    if last_segment.starts_with("scrape") {
        return Ok(tracker.clone());
    }

    let suffix = last_segment.strip_prefix("announce").ok_or_else(not_supported)?;

    let mut url = tracker.clone();
    url.path_segments_mut()
        .map_err(|()| not_supported())?
        .pop()
        .push(&format!("scrape{suffix}"));

    Ok(url)
}

fn build_scrape_url(tracker: &Url, info_hashes: &[InfoHash]) -> Result<String, Error> {
    let url = scrape_url(tracker)?;

    let mut query = url.query().map(str::to_owned).unwrap_or_default();

    for info_hash in info_hashes {
        if !query.is_empty() {
            query.push('&');
        }
        let _ = write!(query, "info_hash={}", percent_encode_byte_array(&info_hash.bytes()));
    }

    let mut url = url;
    url.set_query(None);

    Ok(format!("{url}?{query}"))
}

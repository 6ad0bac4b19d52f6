//! Scraping one tracker.
//!
//! The info hashes are split in consecutive batches of at most
//! `max_batch_size` and requested one batch at a time: the next request is
//! only sent once the previous answer has been fully yielded. A tracker is
//! never asked more than one request at a time.
//!
//! The first failed request (including a timeout) is yielded as an error and
//! ends the stream, so remaining batches are not requested.
use std::sync::Arc;
use std::vec;

use futures::stream::{self, BoxStream};
use futures::StreamExt;
use torrust_swarm_scraper_primitives::info_hash::InfoHash;
use tracing::debug;

use super::scraper::{ScrapeError, Scraper, TrackerError};
use super::{ScrapeResult, TrackerDescriptor};

pub struct BatchScraper {
    scraper: Arc<dyn Scraper>,
    tracker: TrackerDescriptor,
    info_hashes: Arc<[InfoHash]>,
}

struct State {
    scraper: Arc<dyn Scraper>,
    tracker: TrackerDescriptor,
    info_hashes: Arc<[InfoHash]>,
    offset: usize,
    batch: usize,
    pending: vec::IntoIter<ScrapeResult>,
    failed: bool,
}

impl BatchScraper {
    #[must_use]
    pub fn new(scraper: Arc<dyn Scraper>, tracker: TrackerDescriptor, info_hashes: Arc<[InfoHash]>) -> Self {
        Self {
            scraper,
            tracker,
            info_hashes,
        }
    }

    /// Number of requests needed to cover every info hash.
    #[must_use]
    pub fn batches(&self) -> usize {
        self.info_hashes.len().div_ceil(self.tracker.max_batch_size.get())
    }

    /// One result per info hash the tracker reported, batch after batch.
    ///
    /// Within a batch results follow the order of the info hashes. Hashes
    /// the tracker did not report are skipped.
    #[must_use]
    pub fn into_stream(self) -> BoxStream<'static, Result<ScrapeResult, TrackerError>> {
        let state = State {
            scraper: self.scraper,
            tracker: self.tracker,
            info_hashes: self.info_hashes,
            offset: 0,
            batch: 0,
            pending: Vec::new().into_iter(),
            failed: false,
        };

        stream::unfold(state, |mut state| async move {
            loop {
                if let Some(result) = state.pending.next() {
                    return Some((Ok(result), state));
                }

                if state.failed || state.offset >= state.info_hashes.len() {
                    return None;
                }

                match state.next_batch().await {
                    Ok(results) => state.pending = results.into_iter(),
                    Err(err) => {
                        state.failed = true;
                        return Some((Err(err), state));
                    }
                }
            }
        })
        .boxed()
    }
}

impl State {
    async fn next_batch(&mut self) -> Result<Vec<ScrapeResult>, TrackerError> {
        let url = &self.tracker.url;
        let timeout = self.tracker.request_timeout;
        let end = self
            .info_hashes
            .len()
            .min(self.offset + self.tracker.max_batch_size.get());
        let batch = &self.info_hashes[self.offset..end];

        debug!(tracker = %url, batch = self.batch, size = batch.len(), "scraping batch");

        let scrape_map = match tokio::time::timeout(timeout, self.scraper.scrape(url, batch, timeout)).await {
            Ok(Ok(scrape_map)) => scrape_map,
            Ok(Err(err)) => return Err(TrackerError::new(url.clone(), err)),
            Err(_elapsed) => return Err(TrackerError::new(url.clone(), ScrapeError::Timeout { timeout })),
        };

        let results = batch
            .iter()
            .filter_map(|info_hash| {
                scrape_map
                    .get(info_hash)
                    .map(|counters| ScrapeResult::new(*info_hash, url.clone(), *counters))
            })
            .collect();

        self.offset = end;
        self.batch += 1;

        Ok(results)
    }
}

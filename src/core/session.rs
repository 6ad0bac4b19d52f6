//! Scrape session: every tracker, every info hash, best results only.
//!
//! [`scrape_seed_info`] starts one [`BatchScraper`] per tracker, merges them
//! with [`fan_in`] and yields, per info hash, only the reports that improve on
//! the best one seen so far. The session is lazy: nothing is sent until the
//! returned [`SeedInfoStream`] is polled, and dropping the stream cancels
//! every request still in flight.
//!
//! A tracker that fails stops being scraped, but does not affect the other
//! trackers. Failures are logged and collected in the [`SessionReport`];
//! whether the session as a whole failed is answered by
//! [`SeedInfoStream::outcome`] once the stream is exhausted.
use std::collections::HashSet;
use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::stream::{BoxStream, FusedStream};
use futures::{ready, Stream, StreamExt};
use thiserror::Error;
use torrust_swarm_scraper_primitives::info_hash::{InfoHash, ParseInfoHashError};
use tracing::{info, warn};

use super::batch::BatchScraper;
use super::best::BestResultTracker;
use super::combine::{fan_in, FanIn};
use super::scraper::{Scraper, TrackerError};
use super::{ScrapeResult, TrackerDescriptor};

/// What a tracker stream contributes to the session.
#[derive(Debug)]
pub enum Event {
    Scraped(ScrapeResult),
    TrackerFailed(TrackerError),
}

/// Errors of a scrape session.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no info hashes to scrape")]
    NoInfoHashes,

    #[error(transparent)]
    InvalidInfoHash(#[from] ParseInfoHashError),

    #[error("no trackers to scrape")]
    NoTrackers,

    #[error("all {} trackers failed", .failures.len())]
    AllTrackersFailed { failures: Vec<TrackerError> },

    #[error("all {} trackers failed after {improvements} results were emitted", .failures.len())]
    AllTrackersFailedAfterPartialOutput {
        failures: Vec<TrackerError>,
        improvements: usize,
    },
}

/// Counters of a scrape session.
#[derive(Debug, Default, Clone)]
pub struct SessionReport {
    /// Trackers taking part in the session.
    pub trackers: usize,
    /// Reports received from all trackers, improving or not.
    pub results_received: usize,
    /// Reports emitted because they improved on the best one.
    pub improvements: usize,
    /// One entry per tracker that failed.
    pub failures: Vec<TrackerError>,
}

impl SessionReport {
    #[must_use]
    pub fn all_trackers_failed(&self) -> bool {
        self.trackers > 0 && self.failures.len() >= self.trackers
    }
}

type TrackerEvents = BoxStream<'static, Result<Event, Infallible>>;

/// Stream of improving [`ScrapeResult`]s returned by [`scrape_seed_info`].
#[must_use = "streams do nothing unless polled"]
pub struct SeedInfoStream {
    events: FanIn<TrackerEvents>,
    best: BestResultTracker,
    report: SessionReport,
    finished: bool,
}

impl SeedInfoStream {
    #[must_use]
    pub fn report(&self) -> &SessionReport {
        &self.report
    }

    /// The best report per info hash emitted so far.
    #[must_use]
    pub fn best(&self) -> &BestResultTracker {
        &self.best
    }

    /// How the session went.
    ///
    /// Meant to be called once the stream is exhausted. When called after
    /// the consumer stopped early it describes the session up to that point;
    /// cancellation itself is not an error.
    ///
    /// # Errors
    ///
    /// Will return an error if every tracker failed. The error tells apart
    /// sessions that emitted nothing from those that failed after emitting
    /// some results.
    pub fn outcome(self) -> Result<SessionReport, Error> {
        if !self.report.all_trackers_failed() {
            return Ok(self.report);
        }

        let SessionReport {
            failures, improvements, ..
        } = self.report;

        if improvements == 0 {
            Err(Error::AllTrackersFailed { failures })
        } else {
            Err(Error::AllTrackersFailedAfterPartialOutput { failures, improvements })
        }
    }

    fn finish(&mut self) {
        self.finished = true;

        info!(
            trackers = self.report.trackers,
            failed = self.report.failures.len(),
            results_received = self.report.results_received,
            improvements = self.report.improvements,
            "scrape session finished"
        );
    }
}

impl Stream for SeedInfoStream {
    type Item = ScrapeResult;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.finished {
            return Poll::Ready(None);
        }

        loop {
            match ready!(this.events.poll_next_unpin(cx)) {
                Some(Ok(Event::Scraped(result))) => {
                    this.report.results_received += 1;

                    if let Some(improvement) = this.best.offer(result) {
                        this.report.improvements += 1;
                        return Poll::Ready(Some(improvement));
                    }
                }
                Some(Ok(Event::TrackerFailed(err))) => {
                    warn!(tracker = %err.tracker, error = %err.source, "tracker failed");
                    this.report.failures.push(err);
                }
                Some(Err(never)) => match never {},
                None => {
                    this.finish();
                    return Poll::Ready(None);
                }
            }
        }
    }
}

impl FusedStream for SeedInfoStream {
    fn is_terminated(&self) -> bool {
        self.finished
    }
}

/// Starts a scrape session for `info_hashes` over every tracker.
///
/// Repeated info hashes are scraped once, keeping the first occurrence
/// order.
///
/// # Errors
///
/// Will return an error, before sending anything, if there are no info
/// hashes or no trackers.
pub fn scrape_seed_info(
    scraper: Arc<dyn Scraper>,
    trackers: &[TrackerDescriptor],
    info_hashes: Vec<InfoHash>,
) -> Result<SeedInfoStream, Error> {
    if info_hashes.is_empty() {
        return Err(Error::NoInfoHashes);
    }

    if trackers.is_empty() {
        return Err(Error::NoTrackers);
    }

    let mut seen = HashSet::with_capacity(info_hashes.len());
    let info_hashes: Arc<[InfoHash]> = info_hashes.into_iter().filter(|info_hash| seen.insert(*info_hash)).collect();

    info!(
        trackers = trackers.len(),
        info_hashes = info_hashes.len(),
        "starting scrape session"
    );

    let sources = trackers.iter().map(|tracker| {
        BatchScraper::new(scraper.clone(), tracker.clone(), info_hashes.clone())
            .into_stream()
            .map(|item| {
                Ok::<_, Infallible>(match item {
                    Ok(result) => Event::Scraped(result),
                    Err(err) => Event::TrackerFailed(err),
                })
            })
            .boxed()
    });

    Ok(SeedInfoStream {
        events: fan_in(sources),
        best: BestResultTracker::new(),
        report: SessionReport {
            trackers: trackers.len(),
            ..SessionReport::default()
        },
        finished: false,
    })
}

/// Parses info hashes given as 40 character hex strings.
///
/// # Errors
///
/// Will return an error if the list is empty or any entry is not a valid
/// info hash.
pub fn parse_info_hashes<S: AsRef<str>>(values: &[S]) -> Result<Vec<InfoHash>, Error> {
    if values.is_empty() {
        return Err(Error::NoInfoHashes);
    }

    values
        .iter()
        .map(|value| value.as_ref().trim().parse::<InfoHash>().map_err(Error::from))
        .collect()
}

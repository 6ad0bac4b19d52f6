//! A scripted [`Scraper`] for session tests.
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use torrust_swarm_scraper_primitives::info_hash::InfoHash;
use torrust_swarm_scraper_primitives::swarm_counters::SwarmCounters;
use url::Url;

use super::scraper::{ScrapeError, ScrapeMap, Scraper};

#[derive(Clone, Debug)]
pub(crate) enum Reply {
    /// Reports every requested info hash with the same counters.
    Report(SwarmCounters),
    /// Reports exactly this map, whatever was requested.
    Map(ScrapeMap),
    Fail(ScrapeError),
    /// Never answers.
    Hang,
    /// Waits before giving the inner reply.
    After(Duration, Box<Reply>),
}

impl Reply {
    pub(crate) fn after(millis: u64, reply: Reply) -> Self {
        Self::After(Duration::from_millis(millis), Box::new(reply))
    }
}

/// Answers each tracker with its scripted replies, in order, then with the
/// default reply.
pub(crate) struct FakeScraper {
    default: Reply,
    scripts: Mutex<HashMap<Url, VecDeque<Reply>>>,
    calls: AtomicUsize,
    cancelled: AtomicUsize,
}

impl FakeScraper {
    pub(crate) fn new() -> Self {
        Self {
            default: Reply::Report(SwarmCounters::zeroed()),
            scripts: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            cancelled: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_reply(mut self, reply: Reply) -> Self {
        self.default = reply;
        self
    }

    pub(crate) fn with_script(self, tracker: &Url, replies: Vec<Reply>) -> Self {
        self.scripts.lock().unwrap().insert(tracker.clone(), replies.into());
        self
    }

    /// Requests received so far.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests dropped before they were answered.
    pub(crate) fn cancelled(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn next_reply(&self, tracker: &Url) -> Reply {
        let scripted = self.scripts.lock().unwrap().get_mut(tracker).and_then(VecDeque::pop_front);
        scripted.unwrap_or_else(|| self.default.clone())
    }
}

struct InFlight<'a> {
    cancelled: &'a AtomicUsize,
    answered: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.answered {
            self.cancelled.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl Scraper for FakeScraper {
    async fn scrape(&self, tracker: &Url, info_hashes: &[InfoHash], _timeout: Duration) -> Result<ScrapeMap, ScrapeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut reply = self.next_reply(tracker);
        let mut in_flight = InFlight {
            cancelled: &self.cancelled,
            answered: false,
        };

        let result = loop {
            match reply {
                Reply::After(delay, next) => {
                    tokio::time::sleep(delay).await;
                    reply = *next;
                }
                Reply::Report(counters) => break Ok(info_hashes.iter().map(|info_hash| (*info_hash, counters)).collect()),
                Reply::Map(scrape_map) => break Ok(scrape_map),
                Reply::Fail(err) => break Err(err),
                Reply::Hang => std::future::pending::<()>().await,
            }
        };

        in_flight.answered = true;

        result
    }
}

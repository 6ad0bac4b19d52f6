use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use torrust_swarm_scraper::bootstrap::app::initialize_scraper;
use torrust_swarm_scraper::core::scraper::Scraper;
use torrust_swarm_scraper::core::session::{parse_info_hashes, scrape_seed_info, Error, SeedInfoStream};
use torrust_swarm_scraper::core::ScrapeResult;
use torrust_swarm_scraper_primitives::info_hash::InfoHash;
use torrust_swarm_scraper_primitives::swarm_counters::SwarmCounters;
use torrust_swarm_scraper_test_helpers::{configuration, random};
use url::Url;

use crate::common::fixtures::{invalid_info_hashes, tracker, trackers};
use crate::common::http::FakeHttpTracker;
use crate::common::logging;
use crate::common::udp::{Behaviour, FakeUdpTracker};

fn scraper() -> Arc<dyn Scraper> {
    Arc::new(initialize_scraper().expect("it should build the tracker client"))
}

async fn collect(session: &mut SeedInfoStream) -> Vec<ScrapeResult> {
    let mut results = Vec::new();

    while let Some(result) = session.next().await {
        results.push(result);
    }

    results
}

#[tokio::test]
async fn it_should_stream_the_counters_reported_by_a_udp_tracker() {
    logging::init();

    let info_hash = random::info_hash();
    let swarms = HashMap::from([(info_hash, SwarmCounters::new(12, 340, 3))]);
    let udp_tracker = FakeUdpTracker::start(swarms, Behaviour::Answer).await;

    let mut session = scrape_seed_info(scraper(), &trackers(&[&udp_tracker.url]), vec![info_hash]).unwrap();

    let results = collect(&mut session).await;

    assert_eq!(
        results,
        vec![ScrapeResult::new(
            info_hash,
            udp_tracker.url.clone(),
            SwarmCounters::new(12, 340, 3)
        )]
    );
    assert!(session.outcome().is_ok());
}

#[tokio::test]
async fn it_should_stream_the_counters_reported_by_an_http_tracker() {
    let info_hash = random::info_hash();
    let unknown = random::info_hash();
    let swarms = HashMap::from([(info_hash, SwarmCounters::new(7, 21, 1))]);
    let http_tracker = FakeHttpTracker::start(swarms).await;

    let mut session = scrape_seed_info(scraper(), &trackers(&[&http_tracker.url]), vec![info_hash, unknown]).unwrap();

    let results = collect(&mut session).await;

    assert_eq!(
        results,
        vec![ScrapeResult::new(
            info_hash,
            http_tracker.url.clone(),
            SwarmCounters::new(7, 21, 1)
        )]
    );

    let report = session.outcome().unwrap();

    assert_eq!(report.results_received, 1);
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn it_should_keep_the_best_counters_across_udp_and_http_trackers() {
    let info_hash = random::info_hash();

    let udp_tracker = FakeUdpTracker::start(
        HashMap::from([(info_hash, SwarmCounters::new(10, 100, 5))]),
        Behaviour::Answer,
    )
    .await;
    let http_tracker = FakeHttpTracker::start(HashMap::from([(info_hash, SwarmCounters::new(20, 50, 1))])).await;

    let mut session = scrape_seed_info(
        scraper(),
        &trackers(&[&udp_tracker.url, &http_tracker.url]),
        vec![info_hash],
    )
    .unwrap();

    let results = collect(&mut session).await;

    let last = results.last().expect("at least one result should be emitted");

    assert_eq!(last.tracker_url, http_tracker.url);
    assert_eq!(last.counters, SwarmCounters::new(20, 50, 1));
    assert_eq!(session.best().best(&info_hash), Some(last));
    assert_eq!(session.report().results_received, 2);
}

#[tokio::test]
async fn it_should_split_the_info_hashes_in_batches_of_the_tracker_max_batch_size() {
    let info_hashes = random::info_hashes(200);
    let swarms = info_hashes
        .iter()
        .map(|info_hash| (*info_hash, SwarmCounters::new(1, 0, 0)))
        .collect();
    let udp_tracker = FakeUdpTracker::start(swarms, Behaviour::Answer).await;

    let descriptor = tracker(&udp_tracker.url, 75, Duration::from_secs(5));

    let mut session = scrape_seed_info(scraper(), &[descriptor], info_hashes.clone()).unwrap();

    let results = collect(&mut session).await;

    assert_eq!(udp_tracker.batches(), vec![75, 75, 50]);
    assert_eq!(
        results.iter().map(|result| result.info_hash).collect::<Vec<InfoHash>>(),
        info_hashes
    );
}

#[tokio::test]
async fn a_tracker_rejecting_the_scrape_should_not_affect_the_other_trackers() {
    logging::init();

    let info_hash = random::info_hash();
    let swarms = HashMap::from([(info_hash, SwarmCounters::new(3, 3, 3))]);

    let rejecting = FakeUdpTracker::start(swarms.clone(), Behaviour::Reject).await;
    let answering = FakeUdpTracker::start(swarms, Behaviour::Answer).await;

    let mut session = scrape_seed_info(
        scraper(),
        &trackers(&[&rejecting.url, &answering.url]),
        vec![info_hash],
    )
    .unwrap();

    let results = collect(&mut session).await;

    assert_eq!(
        results,
        vec![ScrapeResult::new(info_hash, answering.url.clone(), SwarmCounters::new(3, 3, 3))]
    );

    let report = session.outcome().unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].tracker, rejecting.url);
    assert!(report.failures[0].to_string().contains("banned"));
}

#[tokio::test]
async fn the_session_should_fail_when_no_tracker_can_be_reached() {
    logging::init();

    let unreachable = Url::parse(&configuration::unreachable_http_tracker_url()).unwrap();

    let mut session = scrape_seed_info(scraper(), &trackers(&[&unreachable]), random::info_hashes(3)).unwrap();

    let results = collect(&mut session).await;

    assert!(results.is_empty());
    assert!(matches!(
        session.outcome(),
        Err(Error::AllTrackersFailed { failures }) if failures.len() == 1
    ));
}

#[tokio::test]
async fn a_tracker_that_does_not_answer_should_fail_after_its_request_timeout() {
    logging::init();

    let info_hash = random::info_hash();
    let silent = FakeUdpTracker::start(HashMap::new(), Behaviour::Silent).await;
    let answering = FakeHttpTracker::start(HashMap::from([(info_hash, SwarmCounters::new(1, 1, 1))])).await;

    let trackers = vec![
        tracker(&silent.url, 50, Duration::from_millis(200)),
        tracker(&answering.url, 50, Duration::from_secs(5)),
    ];

    let mut session = scrape_seed_info(scraper(), &trackers, vec![info_hash]).unwrap();

    let results = tokio::time::timeout(Duration::from_secs(5), collect(&mut session))
        .await
        .expect("the session should end once the silent tracker times out");

    assert_eq!(results.len(), 1);

    let report = session.outcome().unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].tracker, silent.url);
    assert!(report.failures[0].to_string().contains("no response within 200 ms"));
}

#[test]
fn invalid_info_hashes_should_be_rejected_before_scraping() {
    for invalid in invalid_info_hashes() {
        assert!(
            matches!(parse_info_hashes(&[invalid.as_str()]), Err(Error::InvalidInfoHash(_))),
            "`{invalid}` should be rejected"
        );
    }
}

//! An in-process HTTP tracker answering scrape requests from a fixed table.
use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::routing::get;
use axum::Router;
use percent_encoding::percent_decode_str;
use serde_bencode::value::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use torrust_swarm_scraper_primitives::info_hash::InfoHash;
use torrust_swarm_scraper_primitives::swarm_counters::SwarmCounters;
use url::Url;

pub struct FakeHttpTracker {
    /// The announce url. Scrape requests go to `/scrape`.
    pub url: Url,
    handle: JoinHandle<()>,
}

impl FakeHttpTracker {
    pub async fn start(swarms: HashMap<InfoHash, SwarmCounters>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("it should bind an ephemeral port");
        let addr = listener.local_addr().expect("it should have a local address");

        let app = Router::new().route("/scrape", get(scrape)).with_state(Arc::new(swarms));

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("the fake tracker should keep serving");
        });

        Self {
            url: Url::parse(&format!("http://{addr}/announce")).expect("it should be a valid url"),
            handle,
        }
    }
}

impl Drop for FakeHttpTracker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Reports the known torrents among the requested ones, like real trackers
/// that leave unknown torrents out of the `files` dictionary.
async fn scrape(State(swarms): State<Arc<HashMap<InfoHash, SwarmCounters>>>, RawQuery(query): RawQuery) -> Vec<u8> {
    let mut files = HashMap::new();

    for value in query.unwrap_or_default().split('&').filter_map(|pair| pair.strip_prefix("info_hash=")) {
        let bytes: Vec<u8> = percent_decode_str(value).collect();

        let Ok(info_hash) = InfoHash::try_from(bytes.as_slice()) else {
            continue;
        };

        if let Some(counters) = swarms.get(&info_hash) {
            files.insert(bytes, file(*counters));
        }
    }

    serde_bencode::to_bytes(&Value::Dict(HashMap::from([(b"files".to_vec(), Value::Dict(files))])))
        .expect("it should encode the response")
}

fn file(counters: SwarmCounters) -> Value {
    Value::Dict(HashMap::from([
        (b"complete".to_vec(), Value::Int(i64::from(counters.seeders))),
        (b"downloaded".to_vec(), Value::Int(i64::from(counters.completed))),
        (b"incomplete".to_vec(), Value::Int(i64::from(counters.leechers))),
    ]))
}

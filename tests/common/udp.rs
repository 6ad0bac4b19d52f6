//! An in-process UDP tracker answering scrape requests from a fixed table.
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use aquatic_udp_protocol::{
    ConnectResponse, ConnectionId, ErrorResponse, NumberOfDownloads, NumberOfPeers, Request, Response, ScrapeResponse,
    TorrentScrapeStatistics,
};
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;
use torrust_swarm_scraper_primitives::info_hash::InfoHash;
use torrust_swarm_scraper_primitives::swarm_counters::SwarmCounters;
use url::Url;

#[derive(Clone, Copy)]
pub enum Behaviour {
    /// Answers with the counters of the known torrents, zero for the others.
    Answer,
    /// Answers scrape requests with an error response.
    Reject,
    /// Reads requests and never answers.
    Silent,
}

pub struct FakeUdpTracker {
    pub url: Url,
    batches: Arc<Mutex<Vec<usize>>>,
    handle: JoinHandle<()>,
}

impl FakeUdpTracker {
    pub async fn start(swarms: HashMap<InfoHash, SwarmCounters>, behaviour: Behaviour) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.expect("it should bind an ephemeral port");
        let addr = socket.local_addr().expect("it should have a local address");
        let batches = Arc::new(Mutex::new(Vec::new()));

        let handle = tokio::spawn(serve(socket, swarms, behaviour, batches.clone()));

        Self {
            url: Url::parse(&format!("udp://{addr}/announce")).expect("it should be a valid url"),
            batches,
            handle,
        }
    }

    /// The number of info hashes in each scrape request received so far.
    pub fn batches(&self) -> Vec<usize> {
        self.batches.lock().unwrap().clone()
    }
}

impl Drop for FakeUdpTracker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(
    socket: UdpSocket,
    swarms: HashMap<InfoHash, SwarmCounters>,
    behaviour: Behaviour,
    batches: Arc<Mutex<Vec<usize>>>,
) {
    let mut buffer = vec![0u8; 8192];

    loop {
        let Ok((len, from)) = socket.recv_from(&mut buffer).await else {
            return;
        };

        let Ok(request) = Request::parse_bytes(&buffer[..len], 255) else {
            continue;
        };

        if matches!(behaviour, Behaviour::Silent) {
            continue;
        }

        let response: Response = match request {
            Request::Connect(connect) => ConnectResponse {
                connection_id: ConnectionId::new(42),
                transaction_id: connect.transaction_id,
            }
            .into(),
            Request::Scrape(scrape) => {
                batches.lock().unwrap().push(scrape.info_hashes.len());

                if matches!(behaviour, Behaviour::Reject) {
                    ErrorResponse {
                        transaction_id: scrape.transaction_id,
                        message: "banned".into(),
                    }
                    .into()
                } else {
                    ScrapeResponse {
                        transaction_id: scrape.transaction_id,
                        torrent_stats: scrape
                            .info_hashes
                            .iter()
                            .map(|info_hash| statistics(swarms.get(&InfoHash(info_hash.0)).copied().unwrap_or_default()))
                            .collect(),
                    }
                    .into()
                }
            }
            Request::Announce(_) => continue,
        };

        let mut bytes = Cursor::new(Vec::new());
        response.write_bytes(&mut bytes).expect("it should encode the response");

        let _ = socket.send_to(bytes.get_ref(), from).await;
    }
}

fn statistics(counters: SwarmCounters) -> TorrentScrapeStatistics {
    let value = |counter: u32| i32::try_from(counter).expect("it should fit in an i32");

    TorrentScrapeStatistics {
        seeders: NumberOfPeers::new(value(counters.seeders)),
        completed: NumberOfDownloads::new(value(counters.completed)),
        leechers: NumberOfPeers::new(value(counters.leechers)),
    }
}

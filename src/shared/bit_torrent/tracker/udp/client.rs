use std::io::Cursor;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;

use aquatic_udp_protocol::{
    ConnectRequest, ConnectionId, InfoHash as AquaticInfoHash, Request, Response, ScrapeRequest, TorrentScrapeStatistics,
    TransactionId,
};
use tokio::net::{lookup_host, UdpSocket};
use torrust_swarm_scraper_primitives::info_hash::InfoHash;
use torrust_swarm_scraper_primitives::swarm_counters::SwarmCounters;
use tracing::debug;
use url::{Host, Url};

use super::{Error, MAX_PACKET_SIZE};
use crate::core::scraper::ScrapeMap;

/// A UDP socket connected to one remote address.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct UdpClient {
    socket: UdpSocket,
}

impl UdpClient {
    /// Binds an ephemeral local port on the same address family as
    /// `remote_addr` and connects it.
    ///
    /// # Errors
    ///
    /// Will return error if the local address can't be bound or the socket
    /// can't be connected.
    pub async fn connected(remote_addr: SocketAddr) -> Result<Self, Error> {
        let local_addr = match remote_addr {
            SocketAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
            SocketAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
        };

        let socket = UdpSocket::bind(local_addr).await.map_err(|e| Error::UnableToBindToSocket {
            err: Arc::new(e),
            addr: local_addr,
        })?;

        socket
            .connect(remote_addr)
            .await
            .map_err(|e| Error::UnableToConnectToRemote {
                err: Arc::new(e),
                remote_addr,
            })?;

        debug!(target: "UDP client", "connected to {remote_addr}");

        Ok(Self { socket })
    }

    /// # Errors
    ///
    /// Will return error if the data can't be sent.
    pub async fn send(&self, bytes: &[u8]) -> Result<usize, Error> {
        debug!(target: "UDP client", "sending {} bytes ...", bytes.len());

        self.socket
            .send(bytes)
            .await
            .map_err(|e| Error::UnableToSendData { err: Arc::new(e) })
    }

    /// # Errors
    ///
    /// Will return error if nothing can be read from the socket.
    pub async fn receive(&self, bytes: &mut [u8]) -> Result<usize, Error> {
        let size = self
            .socket
            .recv(bytes)
            .await
            .map_err(|e| Error::UnableToReceiveData { err: Arc::new(e) })?;

        debug!(target: "UDP client", "{size} bytes received");

        Ok(size)
    }
}

/// Speaks the UDP tracker protocol over a [`UdpClient`].
///
/// No deadline is applied here: callers bound the whole exchange.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct UdpTrackerClient {
    pub udp_client: UdpClient,
}

impl UdpTrackerClient {
    /// # Errors
    ///
    /// Will return error if the tracker address can't be resolved or the
    /// socket can't be set up.
    pub async fn connected(tracker: &Url) -> Result<Self, Error> {
        let remote_addr = resolve(tracker).await?;

        Ok(Self {
            udp_client: UdpClient::connected(remote_addr).await?,
        })
    }

    /// # Errors
    ///
    /// Will return error if can't write request to bytes or send them.
    pub async fn send(&self, request: Request) -> Result<usize, Error> {
        debug!(target: "UDP tracker client", "send request {request:?}");

        let mut cursor = Cursor::new(Vec::new());

        request
            .write_bytes(&mut cursor)
            .map_err(|e| Error::UnableToWriteDataFromRequest { err: Arc::new(e) })?;

        self.udp_client.send(cursor.get_ref()).await
    }

    /// # Errors
    ///
    /// Will return error if can't create response from the received payload (bytes buffer).
    pub async fn receive(&self) -> Result<Response, Error> {
        let mut response_buffer = vec![0u8; MAX_PACKET_SIZE];

        let payload_size = self.udp_client.receive(&mut response_buffer).await?;

        Response::parse_bytes(&response_buffer[..payload_size], true).map_err(|e| Error::UnableToParseResponse {
            err: Arc::new(e),
            len: payload_size,
        })
    }

    /// Obtains a connection id from the tracker.
    ///
    /// # Errors
    ///
    /// Will return error if the exchange fails or the tracker answers with
    /// anything other than a matching connect response.
    pub async fn send_connection_request(&self) -> Result<ConnectionId, Error> {
        let transaction_id = random_transaction_id();

        self.send(ConnectRequest { transaction_id }.into()).await?;

        match self.receive().await? {
            Response::Connect(response) => {
                check_transaction_id(transaction_id, response.transaction_id)?;
                Ok(response.connection_id)
            }
            Response::Error(response) => Err(Error::TrackerRejected {
                message: response.message.to_string(),
            }),
            _ => Err(Error::UnexpectedResponse { expected: "connect" }),
        }
    }

    /// Sends one scrape request over an established connection.
    ///
    /// # Errors
    ///
    /// Will return error if the exchange fails or the tracker answers with
    /// anything other than a matching scrape response.
    pub async fn send_scrape_request(
        &self,
        connection_id: ConnectionId,
        info_hashes: &[InfoHash],
    ) -> Result<ScrapeMap, Error> {
        let transaction_id = random_transaction_id();

        let request = ScrapeRequest {
            connection_id,
            transaction_id,
            info_hashes: info_hashes.iter().map(|info_hash| AquaticInfoHash(info_hash.bytes())).collect(),
        };

        self.send(request.into()).await?;

        match self.receive().await? {
            Response::Scrape(response) => {
                check_transaction_id(transaction_id, response.transaction_id)?;

                // Statistics come back in request order; missing trailing
                // entries mean the tracker did not report those torrents.
                Ok(info_hashes
                    .iter()
                    .zip(response.torrent_stats.iter())
                    .map(|(info_hash, stats)| (*info_hash, into_swarm_counters(stats)))
                    .collect())
            }
            Response::Error(response) => Err(Error::TrackerRejected {
                message: response.message.to_string(),
            }),
            _ => Err(Error::UnexpectedResponse { expected: "scrape" }),
        }
    }
}

/// Scrapes `info_hashes` from the UDP tracker at `tracker`: connect
/// handshake followed by one scrape request.
///
/// # Errors
///
/// Will return error if any step of the exchange fails.
pub async fn scrape(tracker: &Url, info_hashes: &[InfoHash]) -> Result<ScrapeMap, Error> {
    let client = UdpTrackerClient::connected(tracker).await?;

    let connection_id = client.send_connection_request().await?;

    client.send_scrape_request(connection_id, info_hashes).await
}

/// Resolves the socket address of a `udp://host:port` URL.
///
/// # Errors
///
/// Will return error if the URL has no host or port, or the host name
/// does not resolve.
pub async fn resolve(tracker: &Url) -> Result<SocketAddr, Error> {
    let port = tracker.port().ok_or_else(|| Error::InvalidUrl {
        url: tracker.clone(),
        reason: "missing port".to_owned(),
    })?;

    match tracker.host() {
        Some(Host::Ipv4(ip)) => Ok(SocketAddr::new(IpAddr::V4(ip), port)),
        Some(Host::Ipv6(ip)) => Ok(SocketAddr::new(IpAddr::V6(ip), port)),
        Some(Host::Domain(domain)) => lookup_host((domain, port))
            .await
            .map_err(|e| Error::UnableToResolve {
                host: domain.to_owned(),
                err: Arc::new(e),
            })?
            .next()
            .ok_or_else(|| Error::NoAddressFound { host: domain.to_owned() }),
        None => Err(Error::InvalidUrl {
            url: tracker.clone(),
            reason: "missing host".to_owned(),
        }),
    }
}

fn random_transaction_id() -> TransactionId {
    TransactionId::new(rand::random::<i32>())
}

fn check_transaction_id(sent: TransactionId, received: TransactionId) -> Result<(), Error> {
    if sent == received {
        Ok(())
    } else {
        Err(Error::TransactionIdMismatch {
            sent: sent.0.get(),
            received: received.0.get(),
        })
    }
}

/// Negative counters are reported as zero.
fn into_swarm_counters(stats: &TorrentScrapeStatistics) -> SwarmCounters {
    SwarmCounters {
        seeders: u32::try_from(stats.seeders.0.get()).unwrap_or_default(),
        completed: u32::try_from(stats.completed.0.get()).unwrap_or_default(),
        leechers: u32::try_from(stats.leechers.0.get()).unwrap_or_default(),
    }
}

//! UDP tracker client.
//!
//! See [BEP 15: UDP Tracker Protocol](https://www.bittorrent.org/beps/bep_0015.html).
//! Packets are encoded and decoded with [`aquatic_udp_protocol`].
use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use url::Url;

pub mod client;

/// The maximum number of bytes read from one UDP response.
pub const MAX_PACKET_SIZE: usize = 8192;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Invalid UDP tracker url `{url}`: {reason}")]
    InvalidUrl { url: Url, reason: String },

    #[error("Failed to resolve `{host}`, with error: {err}")]
    UnableToResolve { host: String, err: Arc<std::io::Error> },

    #[error("No address found for `{host}`")]
    NoAddressFound { host: String },

    #[error("Failed to bind to socket: {addr}, with error: {err}")]
    UnableToBindToSocket { err: Arc<std::io::Error>, addr: SocketAddr },

    #[error("Failed to connect to remote: {remote_addr}, with error: {err}")]
    UnableToConnectToRemote {
        err: Arc<std::io::Error>,
        remote_addr: SocketAddr,
    },

    #[error("Failed to send data, with error: {err}")]
    UnableToSendData { err: Arc<std::io::Error> },

    #[error("Failed to receive data, with error: {err}")]
    UnableToReceiveData { err: Arc<std::io::Error> },

    #[error("Failed to write request into bytes, with error: {err}")]
    UnableToWriteDataFromRequest { err: Arc<std::io::Error> },

    #[error("Failed to parse a {len} bytes response, with error: {err}")]
    UnableToParseResponse { err: Arc<std::io::Error>, len: usize },

    #[error("Tracker rejected the request: {message}")]
    TrackerRejected { message: String },

    #[error("Unexpected response, expected a {expected} response")]
    UnexpectedResponse { expected: &'static str },

    #[error("Transaction id mismatch: sent {sent}, received {received}")]
    TransactionIdMismatch { sent: i32, received: i32 },
}

//! Modules with generic logic used by several modules.
//!
//! - [`bit_torrent`]: `BitTorrent` tracker protocol clients.
//! - [`signals`]: process shutdown signals.
pub mod bit_torrent;
pub mod signals;

//! `BitTorrent` v1 info hash.
//!
//! Trackers identify torrents by the 20-byte SHA-1 hash of the `info`
//! dictionary. The textual form used in configuration, command line
//! arguments and output records is the 40 character hexadecimal string.
//! Parsing is case-insensitive; formatting is always lowercase.
use std::panic::Location;

use thiserror::Error;

/// A 20-byte array, the binary form of an info hash.
pub type ByteArray20 = [u8; 20];

pub const INFO_HASH_BYTES_LEN: usize = 20;

/// `BitTorrent` Info Hash v1
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, PartialOrd, Ord)]
pub struct InfoHash(pub ByteArray20);

impl InfoHash {
    /// Returns the `InfoHash` internal byte array.
    #[must_use]
    pub fn bytes(&self) -> ByteArray20 {
        self.0
    }
}

impl std::fmt::Display for InfoHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut chars = [0u8; 2 * INFO_HASH_BYTES_LEN];
        let hex = binascii::bin2hex(&self.0, &mut chars).map_err(|_| std::fmt::Error)?;
        f.write_str(std::str::from_utf8(hex).map_err(|_| std::fmt::Error)?)
    }
}

/// Errors that can occur when parsing the text form of an `InfoHash`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseInfoHashError {
    #[error("invalid info hash `{value}`: expected 40 hex characters, got {len}")]
    InvalidLength { value: String, len: usize },

    #[error("invalid info hash `{value}`: not a hexadecimal string")]
    NotHexadecimal { value: String },
}

impl std::str::FromStr for InfoHash {
    type Err = ParseInfoHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 2 * INFO_HASH_BYTES_LEN {
            return Err(ParseInfoHashError::InvalidLength {
                value: s.to_owned(),
                len: s.len(),
            });
        }

        let lowercase = s.to_ascii_lowercase();
        let mut info_hash = Self::default();

        binascii::hex2bin(lowercase.as_bytes(), &mut info_hash.0)
            .map_err(|_| ParseInfoHashError::NotHexadecimal { value: s.to_owned() })?;

        Ok(info_hash)
    }
}

impl From<ByteArray20> for InfoHash {
    fn from(bytes: ByteArray20) -> Self {
        InfoHash(bytes)
    }
}

/// Errors that can occur when converting raw bytes into an `InfoHash`.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// An infohash is 20 bytes.
    #[error("wrong number of bytes for info hash: got {len}, expected 20 {location}")]
    WrongLength {
        location: &'static Location<'static>,
        len: usize,
    },
}

impl TryFrom<&[u8]> for InfoHash {
    type Error = ConversionError;

    #[track_caller]
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let location = Location::caller();

        let bytes = ByteArray20::try_from(bytes).map_err(|_| ConversionError::WrongLength {
            location,
            len: bytes.len(),
        })?;

        Ok(Self(bytes))
    }
}

impl serde::ser::Serialize for InfoHash {
    fn serialize<S: serde::ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::de::Deserialize<'de> for InfoHash {
    fn deserialize<D: serde::de::Deserializer<'de>>(des: D) -> Result<Self, D::Error> {
        let text = String::deserialize(des)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

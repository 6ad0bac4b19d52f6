//! Command line scraper.
//!
//! Scrapes every tracker in the catalog for the given info hashes and writes
//! each improving result to `stdout` as one JSON object per line, followed by
//! a terminal marker:
//!
//! ```text
//! {"seeders":3,"completed":10,"leechers":2,"infohash":"aaaa...","trackerUrl":"udp://b.example.com:6969/announce"}
//! {"seeders":1,"completed":0,"leechers":0,"infohash":"bbbb...","trackerUrl":"udp://b.example.com:6969/announce"}
//! {"seeders":5,"completed":10,"leechers":2,"infohash":"aaaa...","trackerUrl":"udp://a.example.com:6969/announce"}
//! {"done":true}
//! ```
//!
//! When every tracker fails the marker carries the error:
//! `{"done":true,"error":"all 2 trackers failed"}`.
pub mod app;
pub mod console;
pub mod logger;
pub mod printer;
pub mod stream;

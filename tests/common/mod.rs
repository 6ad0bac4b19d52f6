pub mod fixtures;
pub mod http;
pub mod udp;

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use torrust_swarm_scraper_primitives::info_hash::InfoHash;

/// Returns a random alphanumeric string of a certain size.
pub fn string(size: usize) -> String {
    thread_rng().sample_iter(&Alphanumeric).take(size).map(char::from).collect()
}

/// Returns a random info hash.
#[must_use]
pub fn info_hash() -> InfoHash {
    InfoHash(thread_rng().gen())
}

/// Returns `count` distinct random info hashes.
#[must_use]
pub fn info_hashes(count: usize) -> Vec<InfoHash> {
    let mut info_hashes: Vec<InfoHash> = Vec::with_capacity(count);

    while info_hashes.len() < count {
        let info_hash = info_hash();
        if !info_hashes.contains(&info_hash) {
            info_hashes.push(info_hash);
        }
    }

    info_hashes
}

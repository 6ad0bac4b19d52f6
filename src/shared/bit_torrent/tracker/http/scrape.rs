use std::collections::HashMap;
use std::sync::Arc;

use serde_bencode::value::Value;
use torrust_swarm_scraper_primitives::info_hash::InfoHash;
use torrust_swarm_scraper_primitives::swarm_counters::SwarmCounters;

use super::Error;
use crate::core::scraper::ScrapeMap;

/// It parses a bencoded scrape response.
///
/// For example:
///
/// ```text
/// d5:filesd20:xxxxxxxxxxxxxxxxxxxxd8:completei11e10:downloadedi13772e10:incompletei19ee
/// 20:yyyyyyyyyyyyyyyyyyyyd8:completei21e10:downloadedi206e10:incompletei20eeee
/// ```
///
/// Response (JSON encoded for readability):
///
/// ```text
/// {
///   'files': {
///     'xxxxxxxxxxxxxxxxxxxx': {'complete': 11, 'downloaded': 13772, 'incomplete': 19},
///     'yyyyyyyyyyyyyyyyyyyy': {'complete': 21, 'downloaded': 206, 'incomplete': 20}
///   }
/// }
/// ```
///
/// `complete` maps to seeders, `downloaded` to completed and `incomplete` to
/// leechers. Missing counters are zero and unknown fields are ignored.
///
/// # Errors
///
/// Will return an error if the bytes are not bencoded, the tracker sent a
/// `failure reason`, or the `files` dictionary is malformed.
pub fn parse(bytes: &[u8]) -> Result<ScrapeMap, Error> {
    let value: Value = serde_bencode::from_bytes(bytes).map_err(|err| Error::InvalidBencode { err: Arc::new(err) })?;

    let Value::Dict(response) = value else {
        return Err(malformed("the response is not a dictionary"));
    };

    if let Some(reason) = response.get(b"failure reason".as_slice()) {
        return Err(Error::TrackerFailure {
            reason: match reason {
                Value::Bytes(reason) => String::from_utf8_lossy(reason).into_owned(),
                other => format!("{other:?}"),
            },
        });
    }

    let files = match response.get(b"files".as_slice()) {
        Some(Value::Dict(files)) => files,
        Some(_) => return Err(malformed("`files` is not a dictionary")),
        None => return Err(malformed("missing `files` dictionary")),
    };

    let mut scrape_map = ScrapeMap::new();

    for (key, file) in files {
        let info_hash = InfoHash::try_from(key.as_slice()).map_err(|_| malformed("a `files` key is not a 20-byte info hash"))?;

        let Value::Dict(file) = file else {
            return Err(malformed("a `files` entry is not a dictionary"));
        };

        scrape_map.insert(
            info_hash,
            SwarmCounters {
                seeders: counter(file, "complete")?,
                completed: counter(file, "downloaded")?,
                leechers: counter(file, "incomplete")?,
            },
        );
    }

    Ok(scrape_map)
}

fn counter(file: &HashMap<Vec<u8>, Value>, field: &str) -> Result<u32, Error> {
    match file.get(field.as_bytes()) {
        None => Ok(0),
        Some(Value::Int(number)) => Ok(u32::try_from((*number).max(0)).unwrap_or(u32::MAX)),
        Some(_) => Err(malformed(&format!("`{field}` is not an integer"))),
    }
}

fn malformed(reason: &str) -> Error {
    Error::Malformed {
        reason: reason.to_owned(),
    }
}

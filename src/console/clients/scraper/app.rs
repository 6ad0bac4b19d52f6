//! Program to scrape trackers for the swarm counters of some torrents.
//!
//! Run providing a config file path:
//!
//! ```text
//! cargo run -- --config-path "./share/default/config/scraper.toml" 9c38422213e30bff212b30c360d26f9a02136422
//! TORRUST_SCRAPER_CONFIG_TOML_PATH="./share/default/config/scraper.toml" cargo run -- 9c38422213e30bff212b30c360d26f9a02136422
//! ```
//!
//! Run providing the configuration:
//!
//! ```text
//! TORRUST_SCRAPER_CONFIG_TOML=$(cat "./share/default/config/scraper.toml") cargo run -- 9c38422213e30bff212b30c360d26f9a02136422
//! ```
//!
//! Scrape only some trackers:
//!
//! ```text
//! cargo run -- -t udp://tracker.opentrackr.org:1337/announce -t http://nyaa.tracker.wf:7777/announce 9c38422213e30bff212b30c360d26f9a02136422
//! ```
use anyhow::{Context, Result};
use clap::Parser;
use torrust_swarm_scraper_configuration::{Configuration, Info, Tracker};
use url::Url;

use super::console::Console;
use super::stream::stream_ndjson;
use crate::bootstrap;
use crate::core::session::{parse_info_hashes, scrape_seed_info};
use crate::shared::signals::global_shutdown_signal;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Info hashes to scrape, as 40 character hexadecimal strings.
    #[clap(required = true)]
    info_hashes: Vec<String>,

    /// Path to the TOML configuration file.
    #[clap(
        short,
        long,
        env = "TORRUST_SCRAPER_CONFIG_TOML_PATH",
        default_value = "./share/default/config/scraper.toml"
    )]
    config_path: String,

    /// Direct configuration content in TOML.
    #[clap(long, env = "TORRUST_SCRAPER_CONFIG_TOML", hide_env_values = true)]
    config_toml: Option<String>,

    /// Scrape these trackers instead of the configured catalog.
    #[clap(short = 't', long = "tracker")]
    trackers: Vec<Url>,
}

/// # Errors
///
/// Will return an error if the configuration or the info hashes are not
/// valid, or every tracker failed.
pub async fn run() -> Result<()> {
    let args = Args::parse();

    let configuration = setup_config(&args)?;

    let scraper = bootstrap::app::setup(&configuration).context("can't build the tracker client")?;

    let trackers = configuration.tracker_descriptors().context("invalid tracker catalog")?;

    let info_hashes = parse_info_hashes(&args.info_hashes)?;

    let session = scrape_seed_info(scraper, &trackers, info_hashes)?;

    stream_ndjson(&Console::new(), session, global_shutdown_signal()).await?;

    Ok(())
}

fn setup_config(args: &Args) -> Result<Configuration> {
    let info = Info::new(args.config_toml.clone(), args.config_path.clone());

    let mut configuration = Configuration::load(&info).context("invalid configuration")?;

    if !args.trackers.is_empty() {
        configuration.trackers = args
            .trackers
            .iter()
            .map(|url| Tracker {
                url: url.clone(),
                max_batch_size: None,
                request_timeout_ms: None,
            })
            .collect();
    }

    Ok(configuration)
}

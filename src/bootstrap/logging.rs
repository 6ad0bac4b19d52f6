//! Setup for the application logging.
//!
//! It redirects the log info to the standard error output with the log level
//! defined in the configuration. The standard output is kept for the scrape
//! results.
//!
//! - `Off`
//! - `Error`
//! - `Warn`
//! - `Info`
//! - `Debug`
//! - `Trace`
//!
//! Refer to the [configuration crate documentation](https://docs.rs/torrust-swarm-scraper-configuration) to know how to change log settings.
use std::sync::Once;

use torrust_swarm_scraper_configuration::{Logging, LoggingStyle, Threshold};
use tracing::debug;
use tracing::level_filters::LevelFilter;

static INIT: Once = Once::new();

/// It redirects the log info to the standard error output with the log level
/// defined in the configuration.
pub fn setup(cfg: &Logging) {
    let tracing_level = map_to_tracing_level_filter(cfg.threshold);

    if tracing_level == LevelFilter::OFF {
        return;
    }

    INIT.call_once(|| {
        tracing_stderr_init(tracing_level, &TraceStyle::from(cfg.style));
    });
}

fn map_to_tracing_level_filter(threshold: Threshold) -> LevelFilter {
    match threshold {
        Threshold::Off => LevelFilter::OFF,
        Threshold::Error => LevelFilter::ERROR,
        Threshold::Warn => LevelFilter::WARN,
        Threshold::Info => LevelFilter::INFO,
        Threshold::Debug => LevelFilter::DEBUG,
        Threshold::Trace => LevelFilter::TRACE,
    }
}

fn tracing_stderr_init(filter: LevelFilter, style: &TraceStyle) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_writer(std::io::stderr)
        .with_ansi(true);

    let () = match style {
        TraceStyle::Default => builder.init(),
        TraceStyle::Pretty(display_filename) => builder.pretty().with_file(*display_filename).init(),
        TraceStyle::Compact => builder.compact().init(),
        TraceStyle::Json => builder.json().init(),
    };

    debug!("Logging initialized with {style}");
}

#[derive(Debug)]
pub enum TraceStyle {
    Default,
    Pretty(bool),
    Compact,
    Json,
}

impl From<LoggingStyle> for TraceStyle {
    fn from(style: LoggingStyle) -> Self {
        match style {
            LoggingStyle::Default => TraceStyle::Default,
            LoggingStyle::Pretty => TraceStyle::Pretty(true),
            LoggingStyle::Compact => TraceStyle::Compact,
            LoggingStyle::Json => TraceStyle::Json,
        }
    }
}

impl std::fmt::Display for TraceStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let style = match self {
            TraceStyle::Default => "Default Style",
            TraceStyle::Pretty(path) => match path {
                true => "Pretty Style with File Paths",
                false => "Pretty Style without File Paths",
            },
            TraceStyle::Compact => "Compact Style",
            TraceStyle::Json => "Json Format",
        };

        f.write_str(style)
    }
}

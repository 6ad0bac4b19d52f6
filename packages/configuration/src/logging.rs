use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Logging {
    /// Logging level. Possible values are: `off`, `error`, `warn`, `info`,
    /// `debug` and `trace`. Default is `info`.
    #[serde(default = "Logging::default_threshold")]
    pub threshold: Threshold,

    /// Output format. Possible values are: `default`, `pretty`, `compact`
    /// and `json`. Default is `default`.
    #[serde(default)]
    pub style: Style,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
            style: Style::default(),
        }
    }
}

impl Logging {
    fn default_threshold() -> Threshold {
        Threshold::Info
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Threshold {
    /// A threshold lower than all security levels.
    Off,
    /// Corresponds to the `Error` security level.
    Error,
    /// Corresponds to the `Warn` security level.
    Warn,
    /// Corresponds to the `Info` security level.
    Info,
    /// Corresponds to the `Debug` security level.
    Debug,
    /// Corresponds to the `Trace` security level.
    Trace,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Hash, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Default,
    /// Multi-line events with source file locations.
    Pretty,
    Compact,
    /// One JSON object per event.
    Json,
}

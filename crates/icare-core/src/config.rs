use crate::event::TransitionPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output format of the log subscriber.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Application configuration, loaded from `care.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CareConfig {
    /// Directory holding the record files. Platform data dir when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default)]
    pub event_transitions: TransitionPolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CareConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            event_transitions: TransitionPolicy::default(),
        }
    }
}

use std::env;
use std::path::PathBuf;

/// Where stored responses live unless overridden.
pub const DEFAULT_RESPONSES_FOLDER: &str = "responses";

/// Process configuration read from the environment.
///
/// * `RESPONSES_FOLDER` – directory of stored registry responses
/// * `LOG_LEVEL`        – default log filter (`RUST_LOG` still wins)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub responses_folder: PathBuf,
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            responses_folder: PathBuf::from(DEFAULT_RESPONSES_FOLDER),
            log_level: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            responses_folder: non_empty("RESPONSES_FOLDER")
                .map(PathBuf::from)
                .unwrap_or(defaults.responses_folder),
            log_level: non_empty("LOG_LEVEL").map(|v| v.trim().to_ascii_lowercase()),
        }
    }
}

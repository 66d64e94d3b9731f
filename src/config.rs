//! View configuration.
//!
//! Loaded from an optional TOML file with a `LOTTREE_*` environment overlay
//! (`__` separates nested keys, e.g. `LOTTREE_LOGGING__LEVEL=debug`).

use crate::logging::LoggingConfig;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

fn default_fetch_timeout_ms() -> u64 {
    10_000
}

/// Configuration for one lot view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Upper bound on a single listing fetch, in milliseconds. Expiry marks
    /// the cache slot `Failed` instead of leaving it stuck in `Loading`.
    /// Zero disables the bound.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: default_fetch_timeout_ms(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ViewConfig {
    /// Load configuration from an optional file plus environment overlay.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(
            Environment::with_prefix("LOTTREE")
                .separator("__")
                .try_parsing(true),
        );
        builder.build()?.try_deserialize()
    }

    /// Fetch timeout as a duration; `None` when disabled.
    pub fn fetch_timeout(&self) -> Option<Duration> {
        if self.fetch_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.fetch_timeout_ms))
        }
    }
}

//! Logging System
//!
//! Structured logging via the `tracing` crate: configurable level, text or
//! json format, optional color, and per-module level overrides. Output goes
//! to stderr so adapters keep stdout to themselves.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: default_format(),
            color: true,
            modules: HashMap::new(),
        }
    }
}

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

fn validate_level(level: &str) -> Result<String, String> {
    let normalized = level.to_ascii_lowercase();
    if LEVELS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(format!("Unknown log level: {}", level))
    }
}

/// Build the env filter from the configured base level plus module overrides.
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, String> {
    let mut directives = vec![validate_level(&config.level)?];
    for (module, level) in &config.modules {
        directives.push(format!("{}={}", module, validate_level(level)?));
    }
    EnvFilter::try_new(directives.join(","))
        .map_err(|e| format!("Invalid log level configuration: {}", e))
}

/// Initialize the global tracing subscriber from configuration.
///
/// Fails if a subscriber is already installed or the configuration is
/// invalid; a disabled config is a no-op.
pub fn init_logging(config: &LoggingConfig) -> Result<(), String> {
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let timer = ChronoUtc::rfc_3339();

    match config.format.as_str() {
        "json" => Registry::default()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_timer(timer)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        "text" => Registry::default()
            .with(filter)
            .with(
                fmt::layer()
                    .with_timer(timer)
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        other => return Err(format!("Unknown log format: {}", other)),
    }
    .map_err(|e| format!("Failed to initialize logging: {}", e))
}

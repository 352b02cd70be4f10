//! Torfetch: a bounded-concurrency page fetcher routed through a SOCKS proxy
//!
//! This crate fetches a list of web targets through an anonymizing proxy with
//! a fixed concurrency ceiling, saves successful response bodies to disk, and
//! reports aggregate outcome statistics.
//!
//! Errors split into two families: fatal setup errors ([`TorFetchError`])
//! abort the run before any fetching starts, while per-target failures are
//! classified into [`fetch::FetchOutcome`] inside the worker and never abort
//! the run.

pub mod config;
pub mod fetch;
pub mod output;
pub mod stats;
pub mod targets;

use thiserror::Error;

/// Fatal setup errors. Any of these aborts the run before scheduling begins.
#[derive(Debug, Error)]
pub enum TorFetchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Target list error: {0}")]
    Targets(#[from] TargetError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid header value for {0}")]
    InvalidHeader(String),
}

/// Target-list errors. Failing to read the list is fatal for the whole run.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("Failed to read target file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for torfetch operations
pub type Result<T> = std::result::Result<T, TorFetchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use fetch::{FetchFailure, FetchOutcome};
pub use stats::{RunStats, StatsSnapshot};

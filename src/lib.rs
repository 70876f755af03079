//! Sitecomb: a same-site contact harvester
//!
//! This crate crawls a single website breadth-first from a seed URL and
//! extracts Chinese mobile numbers and named contacts from rendered page
//! text, guaranteeing each distinct fact is reported at most once per
//! session.

pub mod config;
pub mod crawler;
pub mod events;
pub mod extract;
pub mod url;

use thiserror::Error;

/// Main error type for Sitecomb operations
#[derive(Debug, Error)]
pub enum SitecombError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Malformed seed URL '{url}': {reason}")]
    MalformedSeed { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

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
}

/// Result type alias for Sitecomb operations
pub type Result<T> = std::result::Result<T, SitecombError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CancelToken, CrawlSession, Crawler, PageResult};
pub use events::{ProgressEvent, ProgressSink};

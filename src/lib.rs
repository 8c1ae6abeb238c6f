//! Word-Ripple: a parallel word-frequency web crawler
//!
//! This crate explores a web graph from a set of seed URLs, following links up
//! to a bounded depth within a wall-clock budget, and aggregates word counts
//! across every distinct page it visits.

pub mod clock;
pub mod config;
pub mod crawler;
pub mod output;
pub mod profiler;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for a crawl
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Errors raised by a page parser while retrieving or parsing a URL
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Failed to read {url}: {source}")]
    Io { url: String, source: std::io::Error },

    #[error("Page unavailable {url}: {reason}")]
    Unavailable { url: String, reason: String },
}

impl FetchError {
    /// The URL whose retrieval failed
    pub fn url(&self) -> &str {
        match self {
            Self::Request { url, .. }
            | Self::Status { url, .. }
            | Self::InvalidUrl { url, .. }
            | Self::Io { url, .. }
            | Self::Unavailable { url, .. } => url,
        }
    }
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for page parsing
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{Config, CrawlSettings, FailurePolicy};
pub use crawler::{PageContent, PageParser, ParallelWebCrawler, WebCrawler};
pub use output::CrawlResult;
pub use profiler::{Profiled, Profiler};
pub use state::SharedCrawlState;

//! Configuration module for Word-Ripple
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and turning them into the validated [`CrawlSettings`] a crawler runs with.
//!
//! # Example
//!
//! ```no_run
//! use word_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod settings;
mod types;
mod validation;

// Re-export types
pub use settings::CrawlSettings;
pub use types::{Config, CrawlerConfig, FailurePolicy, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

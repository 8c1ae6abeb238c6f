use crate::config::types::{CrawlerConfig, FailurePolicy};
use crate::config::validation::{validate_crawler_config, validate_parallelism};
use crate::url::PatternSet;
use crate::ConfigError;
use std::time::Duration;

/// Validated crawl parameters, ready to hand to a crawler
///
/// Built either from a loaded [`CrawlerConfig`] or directly in code:
///
/// ```
/// use std::time::Duration;
/// use word_ripple::config::{CrawlSettings, FailurePolicy};
///
/// let settings = CrawlSettings::new(2, Duration::from_secs(10), 5, 4)
///     .unwrap()
///     .with_ignored_urls(&[r".*\.pdf".to_string()])
///     .unwrap()
///     .with_failure_policy(FailurePolicy::Skip);
/// assert_eq!(settings.max_depth, 2);
/// ```
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Link hops allowed from a seed; 0 visits nothing
    pub max_depth: u32,

    /// Wall-clock budget; zero visits nothing
    pub timeout: Duration,

    /// Number of top words reported
    pub popular_word_count: usize,

    /// Requested worker threads, before clamping to hardware parallelism
    pub parallelism: usize,

    /// URLs that are never visited
    pub ignored_urls: PatternSet,

    /// Whether a fetch failure aborts the crawl or only its branch
    pub failure_policy: FailurePolicy,
}

impl CrawlSettings {
    /// Creates settings with no ignored URLs and the abort failure policy
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSettings)` - Parameters are valid
    /// * `Err(ConfigError::Validation)` - `parallelism` is zero
    pub fn new(
        max_depth: u32,
        timeout: Duration,
        popular_word_count: usize,
        parallelism: usize,
    ) -> Result<Self, ConfigError> {
        validate_parallelism(parallelism)?;

        Ok(Self {
            max_depth,
            timeout,
            popular_word_count,
            parallelism,
            ignored_urls: PatternSet::default(),
            failure_policy: FailurePolicy::default(),
        })
    }

    /// Re-checks the parameters, which are public and may have been edited
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_parallelism(self.parallelism)
    }

    /// Replaces the ignored URL patterns
    pub fn with_ignored_urls(mut self, patterns: &[String]) -> Result<Self, ConfigError> {
        self.ignored_urls = PatternSet::compile(patterns)?;
        Ok(self)
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Builds settings from the `[crawler]` section of a configuration file
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, ConfigError> {
        validate_crawler_config(config)?;

        Ok(Self::new(
            config.max_depth,
            Duration::from_secs(config.timeout_seconds),
            config.popular_word_count,
            config.parallelism,
        )?
        .with_ignored_urls(&config.ignored_urls)?
        .with_failure_policy(config.fetch_failure))
    }
}

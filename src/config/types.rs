use serde::Deserialize;

/// Main configuration structure for Word-Ripple
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Seed URLs the crawl starts from
    #[serde(rename = "start-pages", default)]
    pub start_pages: Vec<String>,

    /// Regular expressions; a URL matching any of them in full is never visited
    #[serde(rename = "ignored-urls", default)]
    pub ignored_urls: Vec<String>,

    /// Regular expressions; a word matching any of them in full is not counted
    #[serde(rename = "ignored-words", default)]
    pub ignored_words: Vec<String>,

    /// Requested number of worker threads
    pub parallelism: usize,

    /// Maximum number of link hops from a seed (0 visits nothing)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Wall-clock budget for the crawl in seconds (0 visits nothing)
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Number of most frequent words to report
    #[serde(rename = "popular-word-count")]
    pub popular_word_count: usize,

    /// What a page fetch failure does to the rest of the crawl
    #[serde(rename = "fetch-failure", default)]
    pub fetch_failure: FailurePolicy,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON result file (stdout when empty)
    #[serde(rename = "result-path", default)]
    pub result_path: String,

    /// Path of the profiling report (stdout when empty)
    #[serde(rename = "profile-output-path", default)]
    pub profile_output_path: String,
}

/// Handling of a page that could not be fetched or parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the whole crawl and report the failure
    #[default]
    Abort,

    /// Log the failure and drop only the failing branch
    Skip,
}

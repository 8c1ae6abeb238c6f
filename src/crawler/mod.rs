//! Crawler module for parallel page crawling
//!
//! This module contains the core crawling logic, including:
//! - The recursive, depth- and deadline-bounded crawl task
//! - The work-stealing worker pool tasks run on
//! - Overall crawl orchestration and result assembly
//! - The HTTP/HTML page parser used outside of tests

mod fetcher;
mod orchestrator;
mod page;
mod parser;
mod pool;
mod task;

pub use fetcher::{build_http_client, fetch_url, read_file, FetchedBody};
pub use orchestrator::ParallelWebCrawler;
pub use page::{PageContent, PageParser};
pub use parser::{parse_html, HtmlPageParser};
pub use pool::{effective_parallelism, hardware_parallelism, TaskScope, WorkerPool};

use crate::clock::Clock;
use crate::config::CrawlSettings;
use crate::output::CrawlResult;
use crate::CrawlError;
use std::sync::Arc;

/// A component that crawls from seed URLs and reports popular words
pub trait WebCrawler: Send + Sync {
    /// Crawls starting from `starting_urls`
    fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult, CrawlError>;

    /// Maximum number of threads this crawler could use
    fn max_parallelism(&self) -> usize;
}

impl<C: WebCrawler + ?Sized> WebCrawler for Arc<C> {
    fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult, CrawlError> {
        (**self).crawl(starting_urls)
    }

    fn max_parallelism(&self) -> usize {
        (**self).max_parallelism()
    }
}

/// Runs a complete crawl operation
///
/// This is a one-shot entry point: it validates `settings`, starts a worker
/// pool, crawls from `seed_urls` and tears the pool down again.
///
/// # Arguments
///
/// * `seed_urls` - URLs the crawl starts from
/// * `settings` - Depth, timeout, ignored URLs, top-N size and parallelism
/// * `parser` - Collaborator that fetches and parses pages
/// * `clock` - Time source for the deadline
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Crawl completed
/// * `Err(CrawlError)` - Invalid settings, or an unrecovered fetch failure
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use word_ripple::config::CrawlSettings;
/// use word_ripple::crawler::{crawl, HtmlPageParser};
/// use word_ripple::url::PatternSet;
/// use word_ripple::SystemClock;
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let parser = HtmlPageParser::new(runtime.handle().clone(), PatternSet::default()).unwrap();
/// let settings = CrawlSettings::new(2, Duration::from_secs(10), 5, 4).unwrap();
/// let result = crawl(
///     &["https://example.com/".to_string()],
///     settings,
///     Arc::new(parser),
///     Arc::new(SystemClock),
/// )
/// .unwrap();
/// println!("{} pages visited", result.urls_visited());
/// ```
pub fn crawl(
    seed_urls: &[String],
    settings: CrawlSettings,
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
) -> Result<CrawlResult, CrawlError> {
    ParallelWebCrawler::new(settings, parser, clock)?.crawl(seed_urls)
}

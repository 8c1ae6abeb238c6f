//! Crawl orchestrator - entry point of a parallel crawl
//!
//! This module ties the crawl together:
//! - Computing the deadline from the injected clock
//! - Allocating fresh shared state for the crawl
//! - Submitting one task per seed URL to the worker pool
//! - Waiting for every task subtree to finish
//! - Ranking the aggregated word counts into the final result

use crate::clock::Clock;
use crate::config::CrawlSettings;
use crate::crawler::page::PageParser;
use crate::crawler::pool::{hardware_parallelism, WorkerPool};
use crate::crawler::task::{CrawlContext, CrawlTask};
use crate::crawler::WebCrawler;
use crate::output::{top_words, CrawlResult};
use crate::state::SharedCrawlState;
use crate::{ConfigError, CrawlError};
use std::sync::Arc;

/// Crawler that fetches and processes pages in parallel on a worker pool
pub struct ParallelWebCrawler {
    settings: CrawlSettings,
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
    pool: WorkerPool,
}

impl ParallelWebCrawler {
    /// Creates a new crawler and starts its worker pool
    ///
    /// # Arguments
    ///
    /// * `settings` - Validated crawl parameters
    /// * `parser` - Collaborator that fetches pages
    /// * `clock` - Time source used for the deadline
    ///
    /// # Returns
    ///
    /// * `Ok(ParallelWebCrawler)` - Ready to crawl
    /// * `Err(CrawlError)` - Settings are invalid or the pool could not start
    pub fn new(
        settings: CrawlSettings,
        parser: Arc<dyn PageParser>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CrawlError> {
        settings.validate()?;
        let pool = WorkerPool::new(settings.parallelism)?;

        Ok(Self {
            settings,
            parser,
            clock,
            pool,
        })
    }

    /// Number of worker threads this crawler runs with
    pub fn parallelism(&self) -> usize {
        self.pool.parallelism()
    }

    fn build_result(&self, state: &SharedCrawlState) -> CrawlResult {
        if !state.has_words() {
            return CrawlResult::new(Vec::new(), state.urls_visited());
        }

        let counts = state.snapshot_word_counts();
        CrawlResult::new(
            top_words(&counts, self.settings.popular_word_count),
            state.urls_visited(),
        )
    }
}

impl WebCrawler for ParallelWebCrawler {
    /// Crawls from `starting_urls` until every branch stops
    ///
    /// All seed tasks are submitted before waiting, and no task is still
    /// running when this returns. A fetch failure under
    /// [`FailurePolicy::Abort`](crate::config::FailurePolicy::Abort) is
    /// returned as an error instead of a partial result.
    fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult, CrawlError> {
        let started = self.clock.now();
        let deadline = started.checked_add(self.settings.timeout).ok_or_else(|| {
            ConfigError::Validation(format!(
                "timeout of {:?} cannot be represented as a deadline",
                self.settings.timeout
            ))
        })?;

        tracing::info!(
            "Starting crawl: {} seeds, max depth {}, timeout {:?}, {} workers",
            starting_urls.len(),
            self.settings.max_depth,
            self.settings.timeout,
            self.pool.parallelism()
        );

        let state = SharedCrawlState::new(deadline);
        let ctx = CrawlContext {
            state: &state,
            parser: self.parser.as_ref(),
            clock: self.clock.as_ref(),
            ignored_urls: &self.settings.ignored_urls,
            failure_policy: self.settings.failure_policy,
        };
        let ctx = &ctx;
        let max_depth = self.settings.max_depth;

        self.pool.scope(|scope| {
            for url in starting_urls {
                let task = CrawlTask::new(url.clone(), max_depth, ctx);
                scope.spawn(move |s| task.compute(s));
            }
        });

        if let Some(error) = state.take_failure() {
            tracing::error!("Crawl failed after visiting {} URLs", state.urls_visited());
            return Err(error.into());
        }

        let result = self.build_result(&state);

        tracing::info!(
            "Crawl completed: {} URLs visited in {:?}",
            result.urls_visited(),
            self.clock.now().saturating_duration_since(started)
        );

        Ok(result)
    }

    fn max_parallelism(&self) -> usize {
        hardware_parallelism()
    }
}

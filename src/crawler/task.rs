//! The recursive unit of crawl work
//!
//! A [`CrawlTask`] handles one URL at one remaining depth: it decides whether
//! the URL may be visited, claims it, fetches it, merges its words into the
//! shared totals and submits one child task per outbound link.

use crate::clock::Clock;
use crate::config::FailurePolicy;
use crate::crawler::page::PageParser;
use crate::crawler::pool::TaskScope;
use crate::state::SharedCrawlState;
use crate::url::PatternSet;
use crate::FetchError;

/// Everything a task reads besides its own URL and depth
///
/// Borrowed by every task of a crawl; nothing in here is mutated except
/// through the concurrent containers of [`SharedCrawlState`].
pub(crate) struct CrawlContext<'a> {
    pub state: &'a SharedCrawlState,
    pub parser: &'a dyn PageParser,
    pub clock: &'a dyn Clock,
    pub ignored_urls: &'a PatternSet,
    pub failure_policy: FailurePolicy,
}

/// Why a task stopped before fetching its URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Skip {
    DepthExhausted,
    DeadlinePassed,
    Ignored,
    AlreadyVisited,
    Aborted,
}

pub(crate) struct CrawlTask<'a> {
    url: String,
    remaining_depth: u32,
    ctx: &'a CrawlContext<'a>,
}

impl<'a> CrawlTask<'a> {
    pub fn new(url: String, remaining_depth: u32, ctx: &'a CrawlContext<'a>) -> Self {
        Self {
            url,
            remaining_depth,
            ctx,
        }
    }

    /// Performs this task's single step, submitting children to `scope`
    ///
    /// Depth and deadline are only checked here, on entry; a fetch already
    /// in progress when the deadline passes runs to completion.
    pub fn compute<'scope>(self, scope: &TaskScope<'scope>)
    where
        'a: 'scope,
    {
        if let Some(reason) = self.admission() {
            tracing::trace!("Skipping {} ({:?})", self.url, reason);
            return;
        }

        if !self.ctx.state.claim(&self.url) {
            tracing::trace!("Skipping {} (claimed by another task)", self.url);
            return;
        }

        tracing::debug!(
            "Fetching {} (remaining depth {})",
            self.url,
            self.remaining_depth
        );

        let page = match self.ctx.parser.parse(&self.url) {
            Ok(page) => page,
            Err(e) => {
                self.fail(e);
                return;
            }
        };

        self.ctx.state.merge_word_counts(&page.word_counts);

        let child_depth = self.remaining_depth - 1;
        tracing::trace!("{} links from {}", page.links.len(), self.url);
        let ctx = self.ctx;
        for link in page.links {
            let child = CrawlTask::new(link, child_depth, ctx);
            scope.spawn(move |s| child.compute(s));
        }
    }

    /// Checks, in order, every reason not to visit this URL
    pub fn admission(&self) -> Option<Skip> {
        if self.remaining_depth == 0 {
            return Some(Skip::DepthExhausted);
        }
        if self.ctx.state.is_aborted() {
            return Some(Skip::Aborted);
        }
        if self.ctx.clock.now() >= self.ctx.state.deadline() {
            return Some(Skip::DeadlinePassed);
        }
        if self.ctx.ignored_urls.matches(&self.url) {
            return Some(Skip::Ignored);
        }
        if self.ctx.state.is_visited(&self.url) {
            return Some(Skip::AlreadyVisited);
        }
        None
    }

    fn fail(&self, error: FetchError) {
        match self.ctx.failure_policy {
            FailurePolicy::Abort => {
                tracing::error!("Aborting crawl: {}", error);
                self.ctx.state.abort(error);
            }
            FailurePolicy::Skip => {
                tracing::warn!("Skipping branch at {}: {}", self.url, error);
            }
        }
    }
}

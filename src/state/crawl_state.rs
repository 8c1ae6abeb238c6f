use crate::FetchError;
use dashmap::{DashMap, DashSet};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Instant;

/// Mutable state shared by every task of one crawl
///
/// Created fresh for each crawl and dropped once the result is built. Word
/// counts only ever grow, visited URLs are only ever added, and the deadline
/// never changes after construction.
#[derive(Debug)]
pub struct SharedCrawlState {
    word_counts: DashMap<String, u64>,
    visited_urls: DashSet<String>,
    deadline: Instant,
    aborted: AtomicBool,
    failure: Mutex<Option<FetchError>>,
}

impl SharedCrawlState {
    pub fn new(deadline: Instant) -> Self {
        Self {
            word_counts: DashMap::new(),
            visited_urls: DashSet::new(),
            deadline,
            aborted: AtomicBool::new(false),
            failure: Mutex::new(None),
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Returns true if `url` has already been claimed by some task
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited_urls.contains(url)
    }

    /// Atomically claims `url` for processing
    ///
    /// Exactly one caller gets `true` for a given URL, no matter how many
    /// tasks race on it.
    pub fn claim(&self, url: &str) -> bool {
        self.visited_urls.insert(url.to_string())
    }

    /// Adds a page's word counts into the shared totals
    ///
    /// Each per-word increment happens under that word's shard lock, so the
    /// final totals do not depend on the order pages are merged in.
    pub fn merge_word_counts<'a, I>(&self, counts: I)
    where
        I: IntoIterator<Item = (&'a String, &'a u64)>,
    {
        for (word, count) in counts {
            *self.word_counts.entry(word.clone()).or_insert(0) += *count;
        }
    }

    pub fn urls_visited(&self) -> usize {
        self.visited_urls.len()
    }

    pub fn word_count(&self, word: &str) -> Option<u64> {
        self.word_counts.get(word).map(|count| *count)
    }

    pub fn has_words(&self) -> bool {
        !self.word_counts.is_empty()
    }

    /// Copies the accumulated counts out of the shared map
    pub fn snapshot_word_counts(&self) -> HashMap<String, u64> {
        self.word_counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// Records a fetch failure that ends the crawl
    ///
    /// Only the first failure is kept; later ones are dropped.
    pub fn abort(&self, error: FetchError) {
        let mut failure = self.failure.lock().unwrap_or_else(|e| e.into_inner());
        if failure.is_none() {
            *failure = Some(error);
        }
        self.aborted.store(true, Ordering::Release);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }

    /// Takes the failure recorded by [`SharedCrawlState::abort`], if any
    pub fn take_failure(&self) -> Option<FetchError> {
        self.failure
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }
}

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

/// Outcome of a crawl
///
/// Built once, after every task has finished. Word counts are kept in
/// ranking order: most frequent first, ties alphabetical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlResult {
    word_counts: Vec<(String, u64)>,
    urls_visited: usize,
}

impl CrawlResult {
    pub fn new(word_counts: Vec<(String, u64)>, urls_visited: usize) -> Self {
        Self {
            word_counts,
            urls_visited,
        }
    }

    /// The reported words with their counts, in ranking order
    pub fn word_counts(&self) -> &[(String, u64)] {
        &self.word_counts
    }

    /// Number of distinct URLs the crawl visited
    pub fn urls_visited(&self) -> usize {
        self.urls_visited
    }

    pub fn count_of(&self, word: &str) -> Option<u64> {
        self.word_counts
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, count)| *count)
    }
}

/// Serializes word counts as a JSON object, preserving ranking order
struct OrderedCounts<'a>(&'a [(String, u64)]);

impl Serialize for OrderedCounts<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(word, count)| (word, count)))
    }
}

impl Serialize for CrawlResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CrawlResult", 2)?;
        state.serialize_field("wordCounts", &OrderedCounts(&self.word_counts))?;
        state.serialize_field("urlsVisited", &self.urls_visited)?;
        state.end()
    }
}

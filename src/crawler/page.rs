//! Page parser interface
//!
//! The crawl core never fetches or tokenizes anything itself; it asks a
//! [`PageParser`] for the words and links of each URL it claims.

use crate::FetchError;
use std::collections::HashMap;
use std::sync::Arc;

/// Words and outbound links of a single page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    /// Occurrences of each word on this page
    pub word_counts: HashMap<String, u64>,

    /// Outbound links, in document order (may contain duplicates)
    pub links: Vec<String>,
}

impl PageContent {
    pub fn new(word_counts: HashMap<String, u64>, links: Vec<String>) -> Self {
        Self { word_counts, links }
    }
}

/// Retrieves and parses a page
///
/// Implementations are called concurrently from many worker threads and
/// block the calling worker until the page is available.
pub trait PageParser: Send + Sync {
    fn parse(&self, url: &str) -> Result<PageContent, FetchError>;
}

impl<P: PageParser + ?Sized> PageParser for Arc<P> {
    fn parse(&self, url: &str) -> Result<PageContent, FetchError> {
        (**self).parse(url)
    }
}

impl<P: PageParser + ?Sized> PageParser for Box<P> {
    fn parse(&self, url: &str) -> Result<PageContent, FetchError> {
        (**self).parse(url)
    }
}

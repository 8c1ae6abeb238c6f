//! Output module for crawl results
//!
//! This module handles:
//! - Ranking aggregated word counts into a top-N list
//! - The immutable [`CrawlResult`] a crawl produces
//! - Writing results as JSON to a file or stdout

mod ranking;
mod result;
mod writer;

pub use ranking::top_words;
pub use result::CrawlResult;
pub use writer::CrawlResultWriter;

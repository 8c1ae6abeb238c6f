//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `SharedCrawlState`: the word-count accumulator, visited-URL set and
//!   deadline shared by every task of a single crawl

mod crawl_state;

pub use crawl_state::SharedCrawlState;

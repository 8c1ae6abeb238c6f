//! URL handling module for Word-Ripple
//!
//! This module provides full-string pattern matching (used for ignored URLs
//! and ignored words) and resolution of links found on a page.

mod matcher;
mod normalize;

pub use matcher::PatternSet;
pub use normalize::resolve_link;

//! HTML page parser
//!
//! This module turns a URL into [`PageContent`]:
//! - Fetching the page (http/https through reqwest, `file:` from disk)
//! - Extracting outbound links from `<a href>` tags
//! - Counting the words of the page body

use crate::crawler::fetcher::{build_http_client, fetch_url, read_file, FetchedBody};
use crate::crawler::page::{PageContent, PageParser};
use crate::url::{resolve_link, PatternSet};
use crate::FetchError;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashMap;
use tokio::runtime::Handle;
use url::Url;

/// Elements whose text is never counted as words
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// [`PageParser`] backed by a real HTTP client and an HTML parser
///
/// `parse` is synchronous; HTTP requests are driven on the tokio runtime
/// behind `runtime`, so it must not be called from inside that runtime's
/// async tasks (use `spawn_blocking` or a non-runtime thread).
#[derive(Debug, Clone)]
pub struct HtmlPageParser {
    client: Client,
    runtime: Handle,
    ignored_words: PatternSet,
}

impl HtmlPageParser {
    /// Creates a parser with a fresh HTTP client
    pub fn new(runtime: Handle, ignored_words: PatternSet) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client()?, runtime, ignored_words))
    }

    pub fn with_client(client: Client, runtime: Handle, ignored_words: PatternSet) -> Self {
        Self {
            client,
            runtime,
            ignored_words,
        }
    }
}

impl PageParser for HtmlPageParser {
    fn parse(&self, url: &str) -> Result<PageContent, FetchError> {
        let page_url = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let body = match page_url.scheme() {
            "file" => read_file(&page_url)?,
            _ => self.runtime.block_on(fetch_url(&self.client, url))?,
        };

        match body {
            FetchedBody::Html(html) => Ok(parse_html(&html, &page_url, &self.ignored_words)),
            FetchedBody::NotHtml { content_type } => {
                tracing::debug!("Ignoring {} content at {}", content_type, url);
                Ok(PageContent::default())
            }
        }
    }
}

/// Parses HTML content into word counts and links
///
/// # Word Rules
///
/// - Only text inside `<body>` is counted
/// - Text inside `script`, `style`, `noscript` and `template` is skipped
/// - Words are maximal runs of alphanumeric characters, lowercased
/// - Words fully matching any `ignored_words` pattern are dropped
///
/// # Link Rules
///
/// - `<a href="...">` tags, resolved against `base_url`
/// - `download` links and non-navigational schemes are excluded
///
/// # Example
///
/// ```
/// use word_ripple::crawler::parse_html;
/// use word_ripple::url::PatternSet;
/// use url::Url;
///
/// let html = r#"<html><body>The fox. The end. <a href="/next">next</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let page = parse_html(html, &base_url, &PatternSet::default());
/// assert_eq!(page.word_counts["the"], 2);
/// assert_eq!(page.links, vec!["https://example.com/next".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url, ignored_words: &PatternSet) -> PageContent {
    let document = Html::parse_document(html);

    PageContent {
        word_counts: extract_words(&document, ignored_words),
        links: extract_links(&document, base_url),
    }
}

/// Counts the words in the body of the document
fn extract_words(document: &Html, ignored_words: &PatternSet) -> HashMap<String, u64> {
    let mut counts = HashMap::new();

    let Ok(body_selector) = Selector::parse("body") else {
        return counts;
    };
    let Some(body) = document.select(&body_selector).next() else {
        return counts;
    };

    for node in body.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let skipped = node
            .ancestors()
            .filter_map(|ancestor| ancestor.value().as_element())
            .any(|element| SKIPPED_ELEMENTS.contains(&element.name()));
        if skipped {
            continue;
        }

        for word in text.split(|c: char| !c.is_alphanumeric()) {
            if word.is_empty() {
                continue;
            }
            let word = word.to_lowercase();
            if ignored_words.matches(&word) {
                continue;
            }
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    counts
}

/// Extracts all followable links from the document, in document order
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter(|element| element.value().attr("download").is_none())
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

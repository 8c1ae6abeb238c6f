//! HTTP and local-file fetching
//!
//! This module handles retrieving page bodies for the HTML page parser:
//! - Building the shared HTTP client
//! - GET requests with status and Content-Type checks
//! - Reading `file:` URLs from disk

use crate::FetchError;
use mime::Mime;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Body of a fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchedBody {
    /// HTML (or local file) content to parse
    Html(String),

    /// Content that is not HTML; yields no words and no links
    NotHtml { content_type: String },
}

/// Builds the HTTP client shared by every fetch
///
/// # Example
///
/// ```no_run
/// use word_ripple::crawler::build_http_client;
///
/// let client = build_http_client().unwrap();
/// ```
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches an http(s) URL
///
/// | Condition | Result |
/// |-----------|--------|
/// | Network failure / timeout | `Err(FetchError::Request)` |
/// | Non-2xx status | `Err(FetchError::Status)` |
/// | 2xx, not HTML | `Ok(FetchedBody::NotHtml)` |
/// | 2xx, HTML | `Ok(FetchedBody::Html)` |
///
/// A missing Content-Type header is treated as HTML.
pub async fn fetch_url(client: &Client, url: &str) -> Result<FetchedBody, FetchError> {
    let request_error = |source| FetchError::Request {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(request_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let (html, content_type) = {
        let values: Vec<&str> = response
            .headers()
            .get_all(reqwest::header::CONTENT_TYPE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        (is_html(&values), values.join(", "))
    };

    if !html {
        return Ok(FetchedBody::NotHtml { content_type });
    }

    let body = response.text().await.map_err(request_error)?;
    Ok(FetchedBody::Html(body))
}

/// Returns true if the Content-Type header values describe an HTML page
///
/// Each value is parsed as a media type; any `text/html` or
/// `application/xhtml+xml` among them wins. No values at all counts as HTML.
pub(crate) fn is_html(content_types: &[&str]) -> bool {
    if content_types.is_empty() {
        return true;
    }

    content_types
        .iter()
        .filter_map(|value| value.parse::<Mime>().ok())
        .any(|mime| {
            let essence = mime.essence_str();
            essence == mime::TEXT_HTML.essence_str() || essence == "application/xhtml+xml"
        })
}

/// Reads a `file:` URL from disk
pub fn read_file(url: &Url) -> Result<FetchedBody, FetchError> {
    let path = url.to_file_path().map_err(|_| FetchError::Unavailable {
        url: url.to_string(),
        reason: "not a local file path".to_string(),
    })?;

    // Decoded lossily, like HTTP bodies
    let bytes = std::fs::read(&path).map_err(|source| FetchError::Io {
        url: url.to_string(),
        source,
    })?;
    Ok(FetchedBody::Html(String::from_utf8_lossy(&bytes).into_owned()))
}

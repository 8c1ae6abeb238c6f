use url::Url;

/// Resolves a link href against the page it was found on
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links (same page anchors)
/// - Invalid URLs
/// - Schemes other than http, https and file after resolution
///
/// The fragment of the resolved URL is dropped so that anchors on the same
/// page resolve to a single URL.
///
/// # Examples
///
/// ```
/// use word_ripple::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/index.html").unwrap();
/// assert_eq!(
///     resolve_link("intro.html#top", &base).as_deref(),
///     Some("https://example.com/docs/intro.html")
/// );
/// assert_eq!(resolve_link("mailto:me@example.com", &base), None);
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if !matches!(absolute_url.scheme(), "http" | "https" | "file") {
        return None;
    }
    absolute_url.set_fragment(None);

    Some(absolute_url.to_string())
}

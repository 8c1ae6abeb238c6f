//! Integration tests for the crawler
//!
//! These tests drive `ParallelWebCrawler` over an in-memory link graph with a
//! fake clock, and one end-to-end crawl over wiremock-served HTML.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use word_ripple::config::{CrawlSettings, FailurePolicy};
use word_ripple::crawler::{HtmlPageParser, PageContent, PageParser, ParallelWebCrawler, WebCrawler};
use word_ripple::profiler::{Profiled, Profiler};
use word_ripple::url::PatternSet;
use word_ripple::{Clock, CrawlError, FakeClock, FetchError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A page of the in-memory web
struct Page {
    words: Vec<(&'static str, u64)>,
    links: Vec<String>,
}

/// PageParser over a fixed graph that counts how often each URL is fetched
#[derive(Default)]
struct GraphParser {
    pages: HashMap<String, Page>,
    failing: Vec<String>,
    fetches: Mutex<HashMap<String, usize>>,
    clock: Option<Arc<FakeClock>>,
    fetch_cost: Duration,
    pause: Duration,
}

impl GraphParser {
    fn new() -> Self {
        Self::default()
    }

    fn page(mut self, url: &str, words: &[(&'static str, u64)], links: &[&str]) -> Self {
        self.pages.insert(
            url.to_string(),
            Page {
                words: words.to_vec(),
                links: links.iter().map(|l| l.to_string()).collect(),
            },
        );
        self
    }

    fn failing(mut self, url: &str) -> Self {
        self.failing.push(url.to_string());
        self
    }

    /// Every fetch advances `clock` by `cost`
    fn advancing(mut self, clock: Arc<FakeClock>, cost: Duration) -> Self {
        self.clock = Some(clock);
        self.fetch_cost = cost;
        self
    }

    /// Every fetch sleeps for real, widening race windows
    fn pausing(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    fn fetch_counts(&self) -> HashMap<String, usize> {
        self.fetches.lock().unwrap().clone()
    }
}

impl PageParser for GraphParser {
    fn parse(&self, url: &str) -> Result<PageContent, FetchError> {
        *self.fetches.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;

        if !self.pause.is_zero() {
            std::thread::sleep(self.pause);
        }
        if let Some(clock) = &self.clock {
            clock.advance(self.fetch_cost);
        }

        if self.failing.iter().any(|f| f == url) {
            return Err(FetchError::Unavailable {
                url: url.to_string(),
                reason: "simulated outage".to_string(),
            });
        }

        let page = self.pages.get(url).ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })?;

        Ok(PageContent::new(
            page.words.iter().map(|(w, c)| (w.to_string(), *c)).collect(),
            page.links.clone(),
        ))
    }
}

fn settings(max_depth: u32, timeout: Duration, popular_word_count: usize) -> CrawlSettings {
    CrawlSettings::new(max_depth, timeout, popular_word_count, 4).unwrap()
}

fn seeds(urls: &[&str]) -> Vec<String> {
    urls.iter().map(|u| u.to_string()).collect()
}

fn crawler(
    settings: CrawlSettings,
    parser: Arc<GraphParser>,
    clock: Arc<FakeClock>,
) -> ParallelWebCrawler {
    ParallelWebCrawler::new(settings, parser, clock).expect("Failed to create crawler")
}

/// The three-page graph: A -> [B, C], B -> [A]
fn fox_graph() -> GraphParser {
    GraphParser::new()
        .page("A", &[("the", 5)], &["B", "C"])
        .page("B", &[("the", 3), ("fox", 2)], &["A"])
        .page("C", &[("the", 1)], &[])
}

#[test]
fn test_end_to_end_scenario() {
    let parser = Arc::new(fox_graph());
    let crawler = crawler(
        settings(2, Duration::from_secs(10), 2),
        parser.clone(),
        Arc::new(FakeClock::new()),
    );

    let result = crawler.crawl(&seeds(&["A"])).expect("Crawl failed");

    assert_eq!(result.urls_visited(), 3);
    assert_eq!(
        result.word_counts(),
        &[("the".to_string(), 9), ("fox".to_string(), 2)]
    );
    assert!(parser.fetch_counts().values().all(|&n| n == 1));
}

#[test]
fn test_zero_depth_visits_nothing() {
    let parser = Arc::new(fox_graph());
    let crawler = crawler(
        settings(0, Duration::from_secs(10), 5),
        parser.clone(),
        Arc::new(FakeClock::new()),
    );

    let result = crawler.crawl(&seeds(&["A", "B", "C"])).unwrap();

    assert_eq!(result.urls_visited(), 0);
    assert!(result.word_counts().is_empty());
    assert!(parser.fetch_counts().is_empty());
}

#[test]
fn test_zero_timeout_visits_nothing() {
    let parser = Arc::new(fox_graph());
    let crawler = crawler(
        settings(5, Duration::ZERO, 5),
        parser.clone(),
        Arc::new(FakeClock::new()),
    );

    let result = crawler.crawl(&seeds(&["A", "B", "C"])).unwrap();

    assert_eq!(result.urls_visited(), 0);
    assert!(result.word_counts().is_empty());
    assert!(parser.fetch_counts().is_empty());
}

#[test]
fn test_depth_limits_link_hops() {
    let parser = Arc::new(
        GraphParser::new()
            .page("1", &[("one", 1)], &["2"])
            .page("2", &[("two", 1)], &["3"])
            .page("3", &[("three", 1)], &["4"])
            .page("4", &[("four", 1)], &[]),
    );
    let crawler = crawler(
        settings(2, Duration::from_secs(10), 10),
        parser.clone(),
        Arc::new(FakeClock::new()),
    );

    let result = crawler.crawl(&seeds(&["1"])).unwrap();

    assert_eq!(result.urls_visited(), 2);
    assert_eq!(result.count_of("two"), Some(1));
    assert_eq!(result.count_of("three"), None);
    assert!(!parser.fetch_counts().contains_key("3"));
}

#[test]
fn test_deadline_stops_new_fetches() {
    let clock = Arc::new(FakeClock::new());
    let parser = Arc::new(
        GraphParser::new()
            .page("1", &[("one", 1)], &["2"])
            .page("2", &[("two", 1)], &["3"])
            .page("3", &[("three", 1)], &["4"])
            .page("4", &[("four", 1)], &[])
            .advancing(clock.clone(), Duration::from_secs(1)),
    );
    let crawler = crawler(settings(10, Duration::from_secs(2), 10), parser.clone(), clock.clone());

    let start = clock.now();
    let result = crawler.crawl(&seeds(&["1"])).unwrap();

    // "1" starts at t=0, "2" at t=1; "3" would start at t=2, the deadline
    assert_eq!(result.urls_visited(), 2);
    assert_eq!(result.count_of("three"), None);
    assert_eq!(parser.fetch_counts().len(), 2);
    assert_eq!(clock.now() - start, Duration::from_secs(2));
}

#[test]
fn test_fetch_in_flight_at_deadline_still_counts() {
    let clock = Arc::new(FakeClock::new());
    let parser = Arc::new(
        GraphParser::new()
            .page("slow", &[("late", 4)], &["next"])
            .page("next", &[("never", 1)], &[])
            .advancing(clock.clone(), Duration::from_secs(30)),
    );
    let crawler = crawler(settings(5, Duration::from_secs(1), 10), parser, clock);

    let result = crawler.crawl(&seeds(&["slow"])).unwrap();

    assert_eq!(result.urls_visited(), 1);
    assert_eq!(result.word_counts(), &[("late".to_string(), 4)]);
}

#[test]
fn test_ignored_urls_are_never_fetched() {
    let parser = Arc::new(
        GraphParser::new()
            .page("https://site/", &[("home", 1)], &["https://site/private/a", "https://site/public"])
            .page("https://site/private/a", &[("secret", 10)], &[])
            .page("https://site/public", &[("open", 2)], &["https://site/private/b"])
            .page("https://site/private/b", &[("secret", 10)], &[]),
    );
    let settings = settings(5, Duration::from_secs(10), 10)
        .with_ignored_urls(&["https://site/private/.*".to_string()])
        .unwrap();
    let crawler = crawler(settings, parser.clone(), Arc::new(FakeClock::new()));

    let result = crawler.crawl(&seeds(&["https://site/"])).unwrap();

    assert_eq!(result.urls_visited(), 2);
    assert_eq!(result.count_of("secret"), None);
    let fetched = parser.fetch_counts();
    assert!(!fetched.contains_key("https://site/private/a"));
    assert!(!fetched.contains_key("https://site/private/b"));
}

#[test]
fn test_ignored_pattern_must_match_whole_url() {
    let parser = Arc::new(
        GraphParser::new()
            .page("https://site/", &[("home", 1)], &["https://site/blog"])
            .page("https://site/blog", &[("post", 1)], &[]),
    );
    // "blog" appears in the URL but does not match it in full
    let settings = settings(5, Duration::from_secs(10), 10)
        .with_ignored_urls(&["blog".to_string()])
        .unwrap();
    let crawler = crawler(settings, parser, Arc::new(FakeClock::new()));

    let result = crawler.crawl(&seeds(&["https://site/"])).unwrap();
    assert_eq!(result.urls_visited(), 2);
}

/// Builds a graph where every seed links to every hub and every hub links to
/// every other hub, so many tasks race to claim the same URLs
fn dense_graph(seed_count: usize, hub_count: usize) -> (GraphParser, Vec<String>, Vec<String>) {
    let hubs: Vec<String> = (0..hub_count).map(|i| format!("hub{}", i)).collect();
    let seeds: Vec<String> = (0..seed_count).map(|i| format!("seed{}", i)).collect();
    let hub_refs: Vec<&str> = hubs.iter().map(String::as_str).collect();

    let mut parser = GraphParser::new();
    for seed in &seeds {
        parser = parser.page(seed, &[("seed", 1), ("shared", 2)], &hub_refs);
    }
    for hub in &hubs {
        parser = parser.page(hub, &[("hub", 3), ("shared", 1)], &hub_refs);
    }
    (parser, seeds, hubs)
}

#[test]
fn test_each_url_fetched_at_most_once_under_races() {
    let (parser, seeds, hubs) = dense_graph(16, 40);
    let parser = Arc::new(parser.pausing(Duration::from_millis(1)));
    let settings = CrawlSettings::new(4, Duration::from_secs(60), 10, 8).unwrap();
    let crawler = crawler(settings, parser.clone(), Arc::new(FakeClock::new()));

    let result = crawler.crawl(&seeds).unwrap();

    let fetches = parser.fetch_counts();
    assert_eq!(fetches.len(), seeds.len() + hubs.len());
    for (url, count) in &fetches {
        assert_eq!(*count, 1, "{} fetched {} times", url, count);
    }
    assert_eq!(result.urls_visited(), seeds.len() + hubs.len());
}

#[test]
fn test_word_counts_are_exact_sums() {
    let (parser, seeds, hubs) = dense_graph(12, 30);
    let parser = Arc::new(parser);
    let settings = CrawlSettings::new(3, Duration::from_secs(60), 10, 8).unwrap();
    let crawler = crawler(settings, parser, Arc::new(FakeClock::new()));

    let result = crawler.crawl(&seeds).unwrap();

    let hub_total = 3 * hubs.len() as u64;
    let shared_total = 2 * seeds.len() as u64 + hubs.len() as u64;
    assert_eq!(
        result.word_counts(),
        &[
            ("hub".to_string(), hub_total),
            ("shared".to_string(), shared_total),
            ("seed".to_string(), seeds.len() as u64),
        ]
    );
}

#[test]
fn test_repeated_crawls_start_fresh() {
    let parser = Arc::new(fox_graph());
    let crawler = crawler(
        settings(2, Duration::from_secs(10), 2),
        parser,
        Arc::new(FakeClock::new()),
    );

    let first = crawler.crawl(&seeds(&["A"])).unwrap();
    let second = crawler.crawl(&seeds(&["A"])).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_fetch_failure_aborts_crawl() {
    let parser = Arc::new(fox_graph().failing("B"));
    let crawler = crawler(
        settings(3, Duration::from_secs(10), 5),
        parser,
        Arc::new(FakeClock::new()),
    );

    match crawler.crawl(&seeds(&["A"])) {
        Err(CrawlError::Fetch(error)) => assert_eq!(error.url(), "B"),
        other => panic!("expected fetch error, got {:?}", other),
    }
}

#[test]
fn test_fetch_failure_skips_branch() {
    let parser = Arc::new(
        GraphParser::new()
            .page("A", &[("the", 5)], &["B", "C"])
            .page("B", &[("the", 3)], &["D"])
            .page("C", &[("the", 1)], &[])
            .page("D", &[("deep", 1)], &[])
            .failing("B"),
    );
    let settings = settings(3, Duration::from_secs(10), 5).with_failure_policy(FailurePolicy::Skip);
    let crawler = crawler(settings, parser.clone(), Arc::new(FakeClock::new()));

    let result = crawler.crawl(&seeds(&["A"])).unwrap();

    // B is claimed before its fetch fails, so it counts as visited
    assert_eq!(result.urls_visited(), 3);
    assert_eq!(result.word_counts(), &[("the".to_string(), 6)]);
    assert!(!parser.fetch_counts().contains_key("D"));
}

#[test]
fn test_profiled_crawl_is_measured() {
    let clock = Arc::new(FakeClock::new());
    let profiler = Arc::new(Profiler::new(clock.clone()));
    let parser = Arc::new(fox_graph().advancing(clock.clone(), Duration::from_millis(50)));
    let profiled_parser = Arc::new(Profiled::parser(parser, profiler.clone()));

    let inner = ParallelWebCrawler::new(
        settings(2, Duration::from_secs(10), 2),
        profiled_parser.clone(),
        clock,
    )
    .unwrap();
    let crawler = Profiled::crawler(inner, profiler.clone());

    let result = crawler.crawl(&seeds(&["A"])).unwrap();
    assert_eq!(result.urls_visited(), 3);
    assert!(crawler.max_parallelism() >= 1);

    let component = crawler.component();
    assert_eq!(component, std::any::type_name::<ParallelWebCrawler>());
    assert_eq!(profiled_parser.component(), std::any::type_name::<GraphParser>());
    assert!(profiler.duration_of(component, "crawl").unwrap() >= Duration::from_millis(50));
    assert_eq!(profiler.duration_of(component, "max_parallelism"), None);
    // Concurrent parses share the fake clock, so their windows may overlap
    assert!(
        profiler.duration_of(profiled_parser.component(), "parse").unwrap()
            >= Duration::from_millis(150)
    );
}

#[test]
fn test_one_shot_crawl() {
    let parser = Arc::new(fox_graph());
    let result = word_ripple::crawler::crawl(
        &seeds(&["A"]),
        settings(1, Duration::from_secs(10), 1),
        parser,
        Arc::new(FakeClock::new()),
    )
    .unwrap();

    assert_eq!(result.urls_visited(), 1);
    assert_eq!(result.word_counts(), &[("the".to_string(), 5)]);
}

#[test]
fn test_invalid_settings_rejected() {
    let mut settings = settings(1, Duration::from_secs(10), 1);
    settings.parallelism = 0;
    let result = ParallelWebCrawler::new(settings, Arc::new(fox_graph()), Arc::new(FakeClock::new()));
    assert!(matches!(result, Err(CrawlError::Config(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_crawl_over_http() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    let home = format!(
        r#"<html><head><title>Home</title></head><body>
        The quick fox.
        <a href="{}/page1">Page 1</a>
        <a href="/page2">Page 2</a>
        <a href="/skip.pdf">PDF</a>
        </body></html>"#,
        base_url
    );
    let pages = [
        ("/", home.as_str()),
        ("/page1", r#"<html><body>The fox jumps. <a href="/">home</a></body></html>"#),
        ("/page2", r#"<html><body>The end.</body></html>"#),
    ];
    for (page_path, body) in pages {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
            .mount(&server)
            .await;
    }

    let ignored_words = PatternSet::compile(&["^.{1,2}$".to_string()]).unwrap();
    let parser = HtmlPageParser::new(tokio::runtime::Handle::current(), ignored_words)
        .expect("Failed to build parser");
    let settings = CrawlSettings::new(3, Duration::from_secs(30), 2, 2)
        .unwrap()
        .with_ignored_urls(&[r".*\.pdf".to_string()])
        .unwrap();
    let crawler = ParallelWebCrawler::new(settings, Arc::new(parser), Arc::new(word_ripple::SystemClock))
        .expect("Failed to create crawler");

    let start = vec![format!("{}/", base_url)];
    let result = tokio::task::spawn_blocking(move || crawler.crawl(&start))
        .await
        .unwrap()
        .expect("Crawl failed");

    assert_eq!(result.urls_visited(), 3);
    assert_eq!(
        result.word_counts(),
        &[("the".to_string(), 3), ("fox".to_string(), 2)]
    );
}

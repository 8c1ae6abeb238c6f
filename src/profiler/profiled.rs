use crate::crawler::{PageContent, PageParser, WebCrawler};
use crate::output::CrawlResult;
use crate::profiler::Profiler;
use crate::{CrawlError, FetchError};
use std::sync::Arc;

/// Operations of [`WebCrawler`] that are timed
pub const WEB_CRAWLER_MEASURED: &[&str] = &["crawl"];

/// Operations of [`PageParser`] that are timed
pub const PAGE_PARSER_MEASURED: &[&str] = &["parse"];

/// Decorator that times a fixed set of operations of the wrapped component
///
/// The component name recorded in the ledger is the wrapped type's name,
/// looking through `Arc`, `Box`, `Rc` and references. Results and errors of the wrapped calls are returned unchanged.
///
/// ```
/// use std::sync::Arc;
/// use word_ripple::profiler::{Profiled, Profiler};
/// use word_ripple::SystemClock;
///
/// struct Greeter;
///
/// let profiler = Arc::new(Profiler::new(Arc::new(SystemClock)));
/// let greeter = Profiled::new(Greeter, profiler.clone(), &["greet"]);
///
/// greeter.invoke("greet", |_| "hello");
/// greeter.invoke("wave", |_| ());
///
/// let component = std::any::type_name::<Greeter>();
/// assert!(profiler.duration_of(component, "greet").is_some());
/// assert!(profiler.duration_of(component, "wave").is_none());
/// ```
#[derive(Debug)]
pub struct Profiled<T> {
    inner: T,
    profiler: Arc<Profiler>,
    component: &'static str,
    measured: &'static [&'static str],
}

impl<T> Profiled<T> {
    /// Wraps `inner`, timing only the operations listed in `measured`
    pub fn new(inner: T, profiler: Arc<Profiler>, measured: &'static [&'static str]) -> Self {
        Self {
            inner,
            profiler,
            component: component_name::<T>(),
            measured,
        }
    }

    /// Name under which this component's timings are recorded
    pub fn component(&self) -> &'static str {
        self.component
    }

    pub fn is_measured(&self, operation: &str) -> bool {
        self.measured.contains(&operation)
    }

    /// Calls `call` on the wrapped component as `operation`
    pub fn invoke<R>(&self, operation: &'static str, call: impl FnOnce(&T) -> R) -> R {
        if !self.is_measured(operation) {
            return call(&self.inner);
        }

        let _measurement = self.profiler.start(self.component, operation);
        call(&self.inner)
    }
}

/// Pointer types whose pointee names the component
const WRAPPERS: &[&str] = &["alloc::sync::Arc<", "alloc::boxed::Box<", "alloc::rc::Rc<"];

/// Name of `T`, with smart-pointer and reference wrappers peeled off
fn component_name<T: ?Sized>() -> &'static str {
    let mut name = std::any::type_name::<T>();
    loop {
        if let Some(inner) = name.strip_prefix('&') {
            name = inner.strip_prefix("mut ").unwrap_or(inner);
            continue;
        }
        let unwrapped = WRAPPERS
            .iter()
            .find_map(move |wrapper| name.strip_prefix(wrapper)?.strip_suffix('>'));
        match unwrapped {
            Some(inner) => name = inner,
            None => return name,
        }
    }
}

impl<C: WebCrawler> Profiled<C> {
    /// Wraps a crawler, timing [`WebCrawler::crawl`]
    pub fn crawler(inner: C, profiler: Arc<Profiler>) -> Self {
        Self::new(inner, profiler, WEB_CRAWLER_MEASURED)
    }
}

impl<P: PageParser> Profiled<P> {
    /// Wraps a page parser, timing [`PageParser::parse`]
    pub fn parser(inner: P, profiler: Arc<Profiler>) -> Self {
        Self::new(inner, profiler, PAGE_PARSER_MEASURED)
    }
}

impl<C: WebCrawler> WebCrawler for Profiled<C> {
    fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult, CrawlError> {
        self.invoke("crawl", |crawler| crawler.crawl(starting_urls))
    }

    fn max_parallelism(&self) -> usize {
        self.invoke("max_parallelism", |crawler| crawler.max_parallelism())
    }
}

impl<P: PageParser> PageParser for Profiled<P> {
    fn parse(&self, url: &str) -> Result<PageContent, FetchError> {
        self.invoke("parse", |parser| parser.parse(url))
    }
}

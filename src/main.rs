//! Word-Ripple main entry point
//!
//! This is the command-line interface for the Word-Ripple crawler.

use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use word_ripple::config::{load_config_with_hash, Config, CrawlSettings};
use word_ripple::crawler::{HtmlPageParser, ParallelWebCrawler, WebCrawler};
use word_ripple::output::{CrawlResult, CrawlResultWriter};
use word_ripple::profiler::{Profiled, Profiler};
use word_ripple::url::PatternSet;
use word_ripple::{Clock, SystemClock};

/// Word-Ripple: a parallel word-frequency web crawler
///
/// Word-Ripple crawls outward from a set of start pages, up to a maximum
/// depth and within a time budget, and reports the most popular words
/// across every page it visited.
#[derive(Parser, Debug)]
#[command(name = "word-ripple")]
#[command(version)]
#[command(about = "A parallel word-frequency web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("word_ripple=info,warn"),
            1 => EnvFilter::new("word_ripple=debug,info"),
            2 => EnvFilter::new("word_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    let crawler = &config.crawler;

    println!("=== Word-Ripple Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", crawler.max_depth);
    println!("  Timeout: {}s", crawler.timeout_seconds);
    println!(
        "  Parallelism: {} requested, {} effective",
        crawler.parallelism,
        word_ripple::crawler::effective_parallelism(crawler.parallelism)
    );
    println!("  Popular word count: {}", crawler.popular_word_count);
    println!("  Fetch failure policy: {:?}", crawler.fetch_failure);

    println!("\nOutput:");
    println!("  Result: {}", display_sink(&config.output.result_path));
    println!("  Profile: {}", display_sink(&config.output.profile_output_path));

    println!("\nStart Pages ({}):", crawler.start_pages.len());
    for page in &crawler.start_pages {
        println!("  - {}", page);
    }

    println!("\nIgnored URL Patterns ({}):", crawler.ignored_urls.len());
    for pattern in &crawler.ignored_urls {
        println!("  - {}", pattern);
    }

    println!("\nIgnored Word Patterns ({}):", crawler.ignored_words.len());
    for pattern in &crawler.ignored_words {
        println!("  - {}", pattern);
    }

    println!("\n✓ Configuration is valid");
}

fn display_sink(path: &str) -> &str {
    if path.is_empty() {
        "<stdout>"
    } else {
        path
    }
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let profiler = Arc::new(Profiler::new(clock.clone()));

    let settings = CrawlSettings::from_config(&config.crawler)?;
    let ignored_words = PatternSet::compile(&config.crawler.ignored_words)?;
    let parser = HtmlPageParser::new(tokio::runtime::Handle::current(), ignored_words)
        .context("failed to build HTTP client")?;
    let parser = Profiled::parser(parser, profiler.clone());

    let crawler = ParallelWebCrawler::new(settings, Arc::new(parser), clock)?;
    let crawler = Profiled::crawler(crawler, profiler.clone());

    tracing::info!("Total seed URLs: {}", config.crawler.start_pages.len());

    // Tasks block on fetches; keep them off the async worker threads
    let start_pages = config.crawler.start_pages.clone();
    let result = tokio::task::spawn_blocking(move || crawler.crawl(&start_pages))
        .await
        .context("crawl worker panicked")?;

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    write_result(&result, &config.output.result_path)?;
    write_profile(&profiler, &config.output.profile_output_path)?;

    Ok(())
}

fn write_result(result: &CrawlResult, path: &str) -> anyhow::Result<()> {
    let writer = CrawlResultWriter::new(result);
    if path.is_empty() {
        writer.write(&mut io::stdout().lock())?;
    } else {
        writer
            .write_to_path(Path::new(path))
            .with_context(|| format!("failed to write result to {}", path))?;
        tracing::info!("Result written to: {}", path);
    }
    Ok(())
}

fn write_profile(profiler: &Profiler, path: &str) -> anyhow::Result<()> {
    if path.is_empty() {
        profiler.write_report(&mut io::stdout().lock())?;
    } else {
        profiler
            .write_to_path(Path::new(path))
            .with_context(|| format!("failed to write profile to {}", path))?;
        tracing::info!("Profile written to: {}", path);
    }
    Ok(())
}

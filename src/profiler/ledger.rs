use crate::clock::Clock;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared ledger of accumulated call durations
#[derive(Debug)]
pub struct Profiler {
    clock: Arc<dyn Clock>,
    started_at: DateTime<Utc>,
    totals: DashMap<String, Duration>,
}

impl Profiler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            started_at: Utc::now(),
            totals: DashMap::new(),
        }
    }

    /// Starts timing one call; the elapsed time is recorded when the
    /// returned guard is dropped, including during unwinding
    pub fn start(&self, component: &str, operation: &str) -> Measurement<'_> {
        Measurement {
            profiler: self,
            key: ledger_key(component, operation),
            started: self.clock.now(),
        }
    }

    /// Adds `elapsed` to the total for `(component, operation)`
    pub fn record(&self, component: &str, operation: &str, elapsed: Duration) {
        self.add(ledger_key(component, operation), elapsed);
    }

    fn add(&self, key: String, elapsed: Duration) {
        *self.totals.entry(key).or_insert(Duration::ZERO) += elapsed;
    }

    /// Total time recorded for `(component, operation)`, if it was ever called
    pub fn duration_of(&self, component: &str, operation: &str) -> Option<Duration> {
        self.totals
            .get(&ledger_key(component, operation))
            .map(|total| *total)
    }

    /// All recorded totals, sorted by key
    pub fn entries(&self) -> Vec<(String, Duration)> {
        let mut entries: Vec<_> = self
            .totals
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Writes the report: a run header, then one line per recorded operation
    pub fn write_report<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "Run at {}", self.started_at.to_rfc2822())?;
        for (key, total) in self.entries() {
            writeln!(writer, "{} took {}", key, format_duration(total))?;
        }
        writeln!(writer)?;
        writer.flush()
    }

    /// Appends the report to the file at `path`, creating it if needed
    pub fn write_to_path(&self, path: &Path) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        self.write_report(&mut BufWriter::new(file))
    }
}

/// Timing guard returned by [`Profiler::start`]
#[derive(Debug)]
pub struct Measurement<'a> {
    profiler: &'a Profiler,
    key: String,
    started: Instant,
}

impl Drop for Measurement<'_> {
    fn drop(&mut self) {
        let elapsed = self
            .profiler
            .clock
            .now()
            .saturating_duration_since(self.started);
        self.profiler.add(std::mem::take(&mut self.key), elapsed);
    }
}

fn ledger_key(component: &str, operation: &str) -> String {
    format!("{}#{}", component, operation)
}

/// Formats a duration as `<minutes>m <seconds>s <millis>ms`
fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    format!(
        "{}m {}s {}ms",
        total_secs / 60,
        total_secs % 60,
        duration.subsec_millis()
    )
}

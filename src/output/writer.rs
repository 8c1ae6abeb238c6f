use crate::output::CrawlResult;
use crate::CrawlError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a [`CrawlResult`] as pretty-printed JSON
pub struct CrawlResultWriter<'a> {
    result: &'a CrawlResult,
}

impl<'a> CrawlResultWriter<'a> {
    pub fn new(result: &'a CrawlResult) -> Self {
        Self { result }
    }

    /// Writes the result to `writer`, followed by a newline
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), CrawlError> {
        serde_json::to_writer_pretty(&mut *writer, self.result)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the result to the file at `path`, replacing its contents
    pub fn write_to_path(&self, path: &Path) -> Result<(), CrawlError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer)
    }
}

pub mod export_csv;
pub mod export_jsonl;

pub use export_csv::CsvSink;
pub use export_jsonl::JsonLinesSink;

use crate::config::OutputFormat;
use crate::db::SqliteSink;
use crate::domain::{DomainStats, ListingRecord};
use crate::scraper::Result;
use std::fs;
use std::path::Path;

/// Destination for finished rows.
///
/// Rows arrive one at a time as soon as a listing is complete, so an
/// implementation should persist each one before returning.
pub trait RowSink {
    fn begin_domain(&mut self, _domain: &str) -> Result<()> {
        Ok(())
    }

    fn write_row(&mut self, record: &ListingRecord) -> Result<()>;

    fn end_domain(&mut self, _stats: &DomainStats) -> Result<()> {
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Opens the sink for `format` at `path`, creating parent directories.
pub fn open_sink(format: OutputFormat, path: &Path) -> Result<Box<dyn RowSink>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let sink: Box<dyn RowSink> = match format {
        OutputFormat::Csv => Box::new(CsvSink::create(path)?),
        OutputFormat::Jsonl => Box::new(JsonLinesSink::create(path)?),
        OutputFormat::Sqlite => Box::new(SqliteSink::open(path)?),
    };
    Ok(sink)
}

/// Holds one domain's output in memory so it can be scraped off the main thread
/// and written out later in domain order.
#[derive(Debug, Default)]
pub struct BufferedSink {
    domain: Option<String>,
    rows: Vec<ListingRecord>,
    stats: Option<DomainStats>,
}

impl BufferedSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plays the buffered domain into `sink` as if it had been scraped straight into it.
    pub fn replay_into(self, sink: &mut dyn RowSink) -> Result<()> {
        if let Some(domain) = &self.domain {
            sink.begin_domain(domain)?;
        }
        for row in &self.rows {
            sink.write_row(row)?;
        }
        if let Some(stats) = &self.stats {
            sink.end_domain(stats)?;
        }
        Ok(())
    }
}

impl RowSink for BufferedSink {
    fn begin_domain(&mut self, domain: &str) -> Result<()> {
        self.domain = Some(domain.to_string());
        Ok(())
    }

    fn write_row(&mut self, record: &ListingRecord) -> Result<()> {
        self.rows.push(record.clone());
        Ok(())
    }

    fn end_domain(&mut self, stats: &DomainStats) -> Result<()> {
        self.stats = Some(stats.clone());
        Ok(())
    }
}

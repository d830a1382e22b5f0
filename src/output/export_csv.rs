use crate::domain::{ListingRecord, COLUMNS};
use crate::output::RowSink;
use crate::scraper::Result;
use csv::{Writer, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Comma separated output with a header row.
pub struct CsvSink<W: Write> {
    writer: Writer<W>,
}

impl CsvSink<File> {
    pub fn create(path: &Path) -> Result<Self> {
        Self::from_writer(File::create(path)?)
    }
}

impl<W: Write> CsvSink<W> {
    /// Writes the header straight away, so a run with no matching listings still
    /// leaves a valid file behind.
    pub fn from_writer(inner: W) -> Result<Self> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(inner);
        writer.write_record(COLUMNS)?;
        writer.flush()?;
        Ok(Self { writer })
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn write_row(&mut self, record: &ListingRecord) -> Result<()> {
        self.writer.write_record(record.fields())?;
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

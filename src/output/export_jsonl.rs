use crate::domain::ListingRecord;
use crate::output::RowSink;
use crate::scraper::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One JSON object per line, keyed by the CSV column names.
pub struct JsonLinesSink<W: Write> {
    writer: BufWriter<W>,
}

impl JsonLinesSink<File> {
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self::from_writer(File::create(path)?))
    }
}

impl<W: Write> JsonLinesSink<W> {
    pub fn from_writer(inner: W) -> Self {
        Self {
            writer: BufWriter::new(inner),
        }
    }
}

impl<W: Write> RowSink for JsonLinesSink<W> {
    fn write_row(&mut self, record: &ListingRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

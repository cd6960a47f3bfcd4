use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::error::Result;
use crate::model::{CsvSchema, TagRecord};

/// Streams tag records into a CSV file.
///
/// The file is created or truncated up front and written row by row, so a
/// failure partway through leaves a partial file behind.
pub struct CsvExport {
    writer: Writer<File>,
    schema: CsvSchema,
    rows: usize,
}

impl CsvExport {
    /// Creates the file and writes the header row.
    pub fn create(path: &Path, schema: CsvSchema) -> Result<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(schema.header())?;
        Ok(Self {
            writer,
            schema,
            rows: 0,
        })
    }

    pub fn write_record(&mut self, record: &TagRecord) -> Result<()> {
        self.writer.write_record(record.to_row(self.schema))?;
        self.rows += 1;
        Ok(())
    }

    /// Flushes buffered rows and returns the number of data rows written.
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.rows)
    }
}

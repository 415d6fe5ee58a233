//! CSV output backend.
//!
//! Header: `tick,timestamp,<record columns…>`.  Timestamps are RFC 3339
//! UTC, booleans are written as `0`/`1`, and readings not taken in a step
//! are empty cells.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use ips_core::Column;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, TableRow};

/// Writes a run's table to one CSV stream.
pub struct CsvWriter<W: Write = File> {
    writer:   Writer<W>,
    columns:  usize,
    finished: bool,
}

impl CsvWriter<File> {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path, columns: &[Column]) -> OutputResult<Self> {
        Self::from_writer(File::create(path)?, columns)
    }
}

impl<W: Write> CsvWriter<W> {
    /// Wrap any `Write` sink and write the header row.
    pub fn from_writer(sink: W, columns: &[Column]) -> OutputResult<Self> {
        let mut writer = Writer::from_writer(sink);
        let header = ["tick", "timestamp"]
            .into_iter()
            .chain(columns.iter().map(|c| c.name));
        writer.write_record(header)?;
        Ok(Self {
            writer,
            columns: columns.len(),
            finished: false,
        })
    }

    /// Flush and hand back the underlying sink.
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }
}

impl<W: Write> OutputWriter for CsvWriter<W> {
    fn write_row(&mut self, row: &TableRow) -> OutputResult<()> {
        if row.fields.len() != self.columns {
            return Err(OutputError::SchemaMismatch {
                expected: self.columns,
                got:      row.fields.len(),
            });
        }
        let mut record = Vec::with_capacity(self.columns + 2);
        record.push(row.tick.to_string());
        record.push(row.timestamp_rfc3339()?);
        record.extend(row.fields.iter().map(ToString::to_string));
        self.writer.write_record(&record)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use tracing::debug;

use crate::error::ExtractError;
use crate::record::PlayerRecord;

/// CSV output opened in append mode. Rows may have six or seven columns
/// (weight only exists for the paginated layout), so the writer is flexible.
pub struct CsvSink {
    writer: csv::Writer<File>,
    path: PathBuf,
    rows: usize,
}

impl CsvSink {
    pub fn append(path: &Path) -> Result<Self, ExtractError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ExtractError::io(parent, e))?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ExtractError::io(path, e))?;
        let writer = WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(file);
        Ok(CsvSink {
            writer,
            path: path.to_path_buf(),
            rows: 0,
        })
    }

    pub fn write(&mut self, record: &PlayerRecord) -> Result<(), ExtractError> {
        self.writer.write_record(record.to_row())?;
        self.rows += 1;
        Ok(())
    }

    /// Flush and close. Returns the number of rows written through this sink.
    pub fn close(mut self) -> Result<usize, ExtractError> {
        self.writer
            .flush()
            .map_err(|e| ExtractError::io(&self.path, e))?;
        debug!(path = %self.path.display(), rows = self.rows, "sink closed");
        Ok(self.rows)
    }
}

pub fn write_records(path: &Path, records: &[PlayerRecord]) -> Result<usize, ExtractError> {
    let mut sink = CsvSink::append(path)?;
    for record in records {
        sink.write(record)?;
    }
    sink.close()
}

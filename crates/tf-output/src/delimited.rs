//! Delimited-text backend.
//!
//! One header line, `agentId` followed by the feature names, then one line
//! per agent.  Tab-separated unless another delimiter is chosen.
//!
//! ```text
//! agentId	longest_stop_s	longest_trip_m
//! 1	52200	12000
//! 3	-1	0
//! ```

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use csv::{Writer, WriterBuilder};
use tf_features::FeatureRow;

use crate::writer::FeatureWriter;
use crate::{OutputError, OutputResult};

/// Header of the agent id column.
pub const AGENT_COLUMN: &str = "agentId";

/// Writes a feature table as delimited text.
pub struct DelimitedWriter<W: Write> {
    inner:    Writer<W>,
    /// Feature count from the header, once written.
    columns:  Option<usize>,
    finished: bool,
}

impl DelimitedWriter<File> {
    /// Create a new tab-separated file at `path`.
    ///
    /// Fails with [`OutputError::AlreadyExists`] if anything is already at
    /// `path`; existing results are never overwritten.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Self::create_with_delimiter(path, b'\t')
    }

    pub fn create_with_delimiter(path: &Path, delimiter: u8) -> OutputResult<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => OutputError::AlreadyExists(path.to_path_buf()),
                _ => OutputError::Io(e),
            })?;
        log::debug!("writing features to {}", path.display());
        Ok(Self::from_writer_with_delimiter(file, delimiter))
    }
}

impl<W: Write> DelimitedWriter<W> {
    /// Tab-separated output to any `Write` sink.
    pub fn from_writer(sink: W) -> Self {
        Self::from_writer_with_delimiter(sink, b'\t')
    }

    pub fn from_writer_with_delimiter(sink: W, delimiter: u8) -> Self {
        Self {
            inner:    WriterBuilder::new().delimiter(delimiter).from_writer(sink),
            columns:  None,
            finished: false,
        }
    }

    /// Flush and hand back the sink.
    pub fn into_inner(self) -> OutputResult<W> {
        self.inner.into_inner().map_err(|e| OutputError::Io(e.into_error()))
    }
}

impl<W: Write> FeatureWriter for DelimitedWriter<W> {
    fn write_header(&mut self, names: &[String]) -> OutputResult<()> {
        let header = std::iter::once(AGENT_COLUMN).chain(names.iter().map(String::as_str));
        self.inner.write_record(header)?;
        self.columns = Some(names.len());
        Ok(())
    }

    fn write_rows(&mut self, rows: &[FeatureRow]) -> OutputResult<()> {
        let expected = self.columns.ok_or(OutputError::MissingHeader)?;
        for row in rows {
            if row.values.len() != expected {
                return Err(OutputError::RowWidth { agent: row.agent, expected, got: row.values.len() });
            }
            let mut record = Vec::with_capacity(expected + 1);
            record.push(row.agent.raw().to_string());
            record.extend(row.values.iter().map(ToString::to_string));
            self.inner.write_record(&record)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.inner.flush()?;
        Ok(())
    }
}

//! The `FeatureWriter` trait implemented by table writers.

use tf_features::{FeatureRow, FeatureTable};

use crate::OutputResult;

/// A sink for one feature table: a header, then rows, then `finish`.
pub trait FeatureWriter {
    /// Write the header: the agent id column followed by `names`.
    fn write_header(&mut self, names: &[String]) -> OutputResult<()>;

    /// Write a batch of rows.  Each row must carry one value per header name.
    fn write_rows(&mut self, rows: &[FeatureRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write all of `table` to `writer` and finish it.
///
/// Failed agents have no row; they are only counted in the log.
pub fn write_table<W: FeatureWriter>(writer: &mut W, table: &FeatureTable) -> OutputResult<()> {
    writer.write_header(&table.names)?;
    writer.write_rows(&table.rows)?;
    writer.finish()?;
    if table.failures.is_empty() {
        log::info!("wrote {} feature rows", table.rows.len());
    } else {
        log::info!(
            "wrote {} feature rows; {} agents omitted after feature failures",
            table.rows.len(),
            table.failures.len(),
        );
    }
    Ok(())
}

//! `tf-output`: writers for extracted feature tables.
//!
//! The only backend is delimited text ([`DelimitedWriter`], tab-separated by
//! default): one header line `agentId<TAB>feature…`, then one line per agent
//! in population order.  Writers implement [`FeatureWriter`]; most callers
//! just use [`write_table`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use tf_output::{DelimitedWriter, write_table};
//!
//! let mut writer = DelimitedWriter::create(Path::new("features.tsv"))?;
//! write_table(&mut writer, &table)?;
//! ```

pub mod delimited;
pub mod error;
pub mod writer;


pub use delimited::{AGENT_COLUMN, DelimitedWriter};
pub use error::{OutputError, OutputResult};
pub use writer::{FeatureWriter, write_table};

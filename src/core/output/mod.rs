//! Format writers and the content writer.
//!
//! This module provides writers sharing one shape,
//! `(payload, stream, options) -> Result<()>`:
//! - [`write_json`] / [`to_json`] - JSON array of records
//! - [`write_stdout`] - JSON followed by a blank line, for standard output
//! - [`write_csv`] / [`to_csv`] - comma-separated with header row - requires `csv-output` feature
//! - [`write_tsv`] / [`to_tsv`] - the csv writer with a tab delimiter - requires `csv-output` feature
//!
//! [`ContentWriter`] decides whether a payload goes to a stream, a file, or
//! nowhere, and delegates to one of these writers.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "csv-output")]
//! # fn main() -> exportpack::Result<()> {
//! use exportpack::config::WriteOptions;
//! use exportpack::core::output::{to_csv, to_tsv};
//! use exportpack::payload::{Payload, Record};
//! use serde_json::json;
//!
//! let mut record = Record::new();
//! record.insert("id".into(), json!(1));
//! record.insert("name".into(), json!("x"));
//! let payload = Payload::from(record);
//!
//! assert_eq!(to_csv(&payload, &WriteOptions::new())?, "id,name\n1,x\n");
//! assert_eq!(to_tsv(&payload, &WriteOptions::new())?, "id\tname\n1\tx\n");
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "csv-output"))]
//! # fn main() {}
//! ```

mod content_writer;
#[cfg(feature = "csv-output")]
mod csv_writer;
mod json_writer;

pub use content_writer::{ContentWriter, OutputTarget, WriteOutcome};
#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, to_tsv, write_csv, write_tsv};
pub use json_writer::{to_json, write_json, write_stdout};

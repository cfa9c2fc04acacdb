//! # Exportpack
//!
//! A Rust library for exporting in-memory records to JSON, CSV and TSV
//! files, one file per combination of state, label and format.
//!
//! ## Overview
//!
//! A batch export run takes a [`Payload`](payload::Payload) (a list of
//! JSON-like records) and a set of CLI-style inputs, then:
//!
//! 1. deduplicates the inputs ([`core::dedup`])
//! 2. builds every `prefix.STATE.label.ext` filename ([`core::filename`])
//! 3. resolves each format key to a writer ([`core::registry`])
//! 4. writes each file, or streams to stdout ([`core::output`])
//!
//! [`pipeline::ExportPipeline`] runs those steps in order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exportpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let registry = FormatRegistry::builtin();
//!     let payload = load_payload(&registry, "centers.json".as_ref())?;
//!
//!     let options = ExportOptions::new()
//!         .with_states(["NY", "OH"])
//!         .with_formats(["csv", "json"])
//!         .with_filenames(["centers"]);
//!
//!     // Writes export.NY.centers.csv, export.NY.centers.json, ...
//!     let report = ExportPipeline::new(&registry, options, Logger::silent()).run(&payload)?;
//!     println!("{} file(s) written", report.written.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Generating filenames only
//!
//! ```rust
//! use exportpack::core::{FilenameRequest, generate_filenames};
//! use exportpack::verbose::Logger;
//!
//! let request = FilenameRequest::new()
//!     .with_prefix("ns")
//!     .add_tag("NY")
//!     .with_labels(["out"])
//!     .with_formats(["csv", "json"]);
//!
//! let names: Vec<String> = generate_filenames(&request, &Logger::silent())
//!     .iter()
//!     .map(|spec| spec.render())
//!     .collect();
//! assert_eq!(names, vec!["ns.NY.out.csv", "ns.NY.out.json"]);
//! ```
//!
//! ## Module Structure
//!
//! - [`core`] - Deduplication, filename generation, format registry, writers
//! - [`pipeline`] - [`ExportPipeline`](pipeline::ExportPipeline): plan and run one export
//! - [`config`] - [`ExportOptions`](config::ExportOptions), writer and reader options
//! - [`payload`] - [`Payload`](payload::Payload) and record lookup
//! - [`format`] - [`FormatKey`](format::FormatKey): the built-in format keys
//! - [`verbose`] - Verbosity-gated [`Logger`](verbose::Logger)
//! - [`error`] - Unified error types ([`ExportError`], [`Result`])
//! - `cli` - Command-line arguments (requires `cli` feature)
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod payload;
pub mod pipeline;
pub mod verbose;

// Re-export the main types at the crate root for convenience
pub use error::{ExportError, Result};
pub use payload::{Payload, Record};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use exportpack::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{ExportError, Result};

    // Data
    pub use crate::payload::{Payload, Record, find_records};

    // Configuration
    pub use crate::config::{ExportOptions, FailurePolicy, ReadOptions, WriteOptions};
    pub use crate::format::FormatKey;

    // Core
    pub use crate::core::{
        ContentWriter, FilenameRequest, FilenameSpec, FormatReader, FormatRegistry, FormatWriter,
        OutputTarget, WriteOutcome, deduplicate, generate_filenames,
    };

    // Output (stream writers and string converters)
    pub use crate::core::output::{to_json, write_json, write_stdout};
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, to_tsv, write_csv, write_tsv};

    // Pipeline
    pub use crate::pipeline::{ExportPipeline, ExportPlan, ExportReport, load_payload};

    // Logging
    pub use crate::verbose::{Logger, Verbosity};
}

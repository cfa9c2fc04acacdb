//! Core export logic.
//!
//! This module contains:
//! - [`dedup`] - Removal of repeated CLI inputs
//! - [`filename`] - Filename specs and the cartesian-product generator
//! - [`registry`] - Format key to writer/reader lookup
//! - [`output`] - Format writers and the content writer
//! - [`input`] - Format readers
//!
//! # Quick Start
//!
//! ```rust
//! use exportpack::core::{
//!     ContentWriter, FilenameRequest, FormatRegistry, OutputTarget,
//!     deduplicate, generate_filenames,
//! };
//! ```

pub mod dedup;
pub mod filename;
pub mod input;
pub mod output;
pub mod registry;

// Re-export main types for convenience
pub use dedup::deduplicate;
pub use filename::{FilenameRequest, FilenameSpec, generate_filenames};
pub use output::{ContentWriter, OutputTarget, WriteOutcome};
pub use registry::{FormatReader, FormatRegistry, FormatWriter};

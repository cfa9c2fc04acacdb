//! Unified error types for exportpack.
//!
//! This module provides a single [`ExportError`] enum that covers every
//! failure the export pipeline can surface. Soft no-ops (empty content, no
//! resolvable destination) are *not* errors; they are reported through
//! [`WriteOutcome`](crate::core::output::WriteOutcome) instead.
//!
//! # Error Handling Philosophy
//!
//! - **Fatal to the command**: [`MissingRequiredArgument`](ExportError::MissingRequiredArgument)
//! - **Fatal at dispatch**: [`UnknownFormat`](ExportError::UnknownFormat)
//! - **Propagated from serializers**: [`MalformedPayload`](ExportError::MalformedPayload),
//!   [`Io`](ExportError::Io), [`Csv`](ExportError::Csv), [`Json`](ExportError::Json)

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for exportpack operations.
///
/// # Example
///
/// ```rust
/// use exportpack::error::Result;
/// use exportpack::payload::Payload;
///
/// fn load_nothing() -> Result<Payload> {
///     Ok(Payload::new())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ExportError>;

/// The error type for all exportpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// A mandatory dimension (e.g. at least one state) was not supplied.
    ///
    /// Fatal to the invoking command; never retried.
    #[error("Missing required argument: at least one {argument} must be supplied")]
    MissingRequiredArgument {
        /// Name of the dimension that was empty
        argument: String,
    },

    /// A requested format key has no registered writer or reader.
    #[error("Unknown format '{key}'")]
    UnknownFormat {
        /// The format key that was requested
        key: String,
    },

    /// A tabular writer met a record that does not fit the header.
    ///
    /// The header is taken from the first record; a later record missing
    /// one of those columns (or carrying an extra one) ends up here.
    #[error("Malformed payload at record {record}: {message}")]
    MalformedPayload {
        /// Zero-based index of the offending record
        record: usize,
        /// Description of what's wrong
        message: String,
    },

    /// Input data could not be turned into a payload.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of what's wrong
        message: String,
    },

    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The output directory doesn't exist
    /// - Permission denied
    /// - Disk is full
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV/TSV reading or writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ExportError {
    /// Creates a missing required argument error.
    pub fn missing_argument(argument: impl Into<String>) -> Self {
        ExportError::MissingRequiredArgument {
            argument: argument.into(),
        }
    }

    /// Creates an unknown format error.
    pub fn unknown_format(key: impl Into<String>) -> Self {
        ExportError::UnknownFormat { key: key.into() }
    }

    /// Creates a malformed payload error.
    pub fn malformed(record: usize, message: impl Into<String>) -> Self {
        ExportError::MalformedPayload {
            record,
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ExportError::InvalidInput {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a missing required argument error.
    pub fn is_missing_argument(&self) -> bool {
        matches!(self, ExportError::MissingRequiredArgument { .. })
    }

    /// Returns `true` if this is an unknown format error.
    pub fn is_unknown_format(&self) -> bool {
        matches!(self, ExportError::UnknownFormat { .. })
    }

    /// Returns `true` if this is a malformed payload error.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ExportError::MalformedPayload { .. })
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ExportError::Io(_))
    }
}

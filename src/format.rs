//! Format keys understood by the built-in registry.
//!
//! The registry itself is keyed by plain strings so tests and library users
//! can register extra formats; [`FormatKey`] is the fixed set the CLI offers.
//!
//! # Example
//!
//! ```rust
//! use exportpack::format::FormatKey;
//! use std::str::FromStr;
//!
//! let format = FormatKey::from_str("tsv").unwrap();
//! assert_eq!(format.suffix(), Some(".tsv"));
//!
//! let inferred = FormatKey::from_path("out/ns.NY.out.json").unwrap();
//! assert_eq!(inferred, FormatKey::Json);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// A supported serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum FormatKey {
    /// JSON array of records
    Json,

    /// Comma-separated values with a header row
    Csv,

    /// Tab-separated values with a header row
    Tsv,

    /// JSON written to the process's standard output
    Stdout,
}

impl FormatKey {
    /// Returns the registry key for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKey::Json => "json",
            FormatKey::Csv => "csv",
            FormatKey::Tsv => "tsv",
            FormatKey::Stdout => "stdout",
        }
    }

    /// Returns the file extension (without dot), or `None` for `stdout`.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            FormatKey::Json => Some("json"),
            FormatKey::Csv => Some("csv"),
            FormatKey::Tsv => Some("tsv"),
            FormatKey::Stdout => None,
        }
    }

    /// Returns the filename suffix including its leading dot.
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            FormatKey::Json => Some(".json"),
            FormatKey::Csv => Some(".csv"),
            FormatKey::Tsv => Some(".tsv"),
            FormatKey::Stdout => None,
        }
    }

    /// Returns `true` if this format writes to a stream instead of a file.
    pub fn is_stream(&self) -> bool {
        matches!(self, FormatKey::Stdout)
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "csv", "tsv", "stdout"]
    }

    /// Returns all formats.
    pub fn all() -> &'static [FormatKey] {
        &[
            FormatKey::Json,
            FormatKey::Csv,
            FormatKey::Tsv,
            FormatKey::Stdout,
        ]
    }

    /// Detects a file format from a path's extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "json" => Ok(FormatKey::Json),
            "csv" => Ok(FormatKey::Csv),
            "tsv" | "tab" => Ok(FormatKey::Tsv),
            _ => Err(ExportError::unknown_format(if ext.is_empty() {
                path.as_ref().display().to_string()
            } else {
                ext
            })),
        }
    }
}

impl std::fmt::Display for FormatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FormatKey {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('.').to_lowercase().as_str() {
            "json" => Ok(FormatKey::Json),
            "csv" => Ok(FormatKey::Csv),
            "tsv" => Ok(FormatKey::Tsv),
            "stdout" => Ok(FormatKey::Stdout),
            _ => Err(ExportError::unknown_format(s)),
        }
    }
}

//! Configuration types for the export pipeline and the format writers.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies. The CLI builds an
//! [`ExportOptions`] from its arguments; library users can build one
//! directly with the `with_*` methods.
//!
//! # Example
//!
//! ```rust
//! use exportpack::config::{ExportOptions, FailurePolicy};
//!
//! let options = ExportOptions::new()
//!     .with_states(["NY", "OH"])
//!     .with_formats(["csv", "json"])
//!     .with_prefix("ns")
//!     .with_policy(FailurePolicy::Continue);
//!
//! assert_eq!(options.states.len(), 2);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::verbose::Verbosity;

/// Default filename prefix used by the CLI.
pub const DEFAULT_PREFIX: &str = "export";

/// Default filename component separator used by the CLI.
pub const DEFAULT_SEPARATOR: &str = ".";

/// What the pipeline does when writing one combination fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failed write and return its error.
    #[default]
    Abort,
    /// Record the failure and keep processing the remaining combinations.
    Continue,
}

/// Options passed to every format writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOptions {
    /// Write a header row for tabular formats (default: true)
    pub headers: bool,

    /// Field delimiter for tabular formats (default: `,`)
    ///
    /// The `tsv` writer overrides this with a tab.
    pub delimiter: u8,

    /// Pretty-print JSON output (default: true)
    pub pretty: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            headers: true,
            delimiter: b',',
            pretty: true,
        }
    }
}

impl WriteOptions {
    /// Creates write options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether a header row is written.
    #[must_use]
    pub fn with_headers(mut self, headers: bool) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether JSON output is pretty-printed.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Options passed to every format reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Field delimiter for tabular formats (default: `,`)
    pub delimiter: u8,

    /// First row is a header (default: true)
    ///
    /// Without a header, columns are named `column1`, `column2`, ...
    pub headers: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            headers: true,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: bool) -> Self {
        self.headers = headers;
        self
    }
}

/// Validated options for one export run.
///
/// `formats` holds registry keys rather than [`FormatKey`](crate::format::FormatKey)
/// values so that custom registries can be driven through the same pipeline;
/// an unregistered key fails at dispatch with
/// [`UnknownFormat`](crate::error::ExportError::UnknownFormat).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Target states (tag groups). At least one is required.
    pub states: Vec<String>,

    /// Requested format keys (`json`, `csv`, `tsv`, `stdout`)
    pub formats: Vec<String>,

    /// Filename labels, one output per label and format
    pub filenames: Vec<String>,

    /// Explicit output files; the format is inferred from the extension
    pub files: Vec<PathBuf>,

    /// Filename prefix (namespace)
    pub prefix: String,

    /// Filename component separator
    pub separator: String,

    /// `-v` occurrence count
    pub verbose: u8,

    /// Skip every write
    pub dry: bool,

    /// Directory generated filenames are placed in (default: working directory)
    pub output_dir: Option<PathBuf>,

    /// Options forwarded to the format writers
    pub write: WriteOptions,

    /// Behaviour when a single write fails
    pub policy: FailurePolicy,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            formats: Vec::new(),
            filenames: Vec::new(),
            files: Vec::new(),
            prefix: DEFAULT_PREFIX.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            verbose: 0,
            dry: false,
            output_dir: None,
            write: WriteOptions::default(),
            policy: FailurePolicy::default(),
        }
    }
}

impl ExportOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the configured verbosity tier.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_count(self.verbose)
    }

    #[must_use]
    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.formats = formats.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_filenames<I, S>(mut self, filenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filenames = filenames.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn with_dry(mut self, dry: bool) -> Self {
        self.dry = dry;
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_write_options(mut self, write: WriteOptions) -> Self {
        self.write = write;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }
}

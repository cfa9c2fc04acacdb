//! Lookup table from format key to writer and reader.
//!
//! The registry is an explicit value: build it once at startup (usually
//! with [`FormatRegistry::builtin`]) and pass it by reference. Tests can
//! build their own with fake formats.
//!
//! # Example
//!
//! ```rust
//! use exportpack::core::registry::{FormatRegistry, FormatWriter};
//! use exportpack::error::ExportError;
//! use std::sync::Arc;
//!
//! let registry = FormatRegistry::builtin();
//! assert!(registry.contains("json"));
//!
//! let sentinel: FormatWriter = Arc::new(|_, _, _| Err(ExportError::unknown_format("xml")));
//! let writer = registry.get("xml", sentinel.clone());
//! assert!(Arc::ptr_eq(&writer, &sentinel));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::io::{Read, Write};
use std::sync::Arc;

use crate::config::{ReadOptions, WriteOptions};
use crate::core::input;
use crate::core::output;
use crate::error::{ExportError, Result};
use crate::format::FormatKey;
use crate::payload::Payload;

/// Writer shape shared by every format.
pub type FormatWriter =
    Arc<dyn Fn(&Payload, &mut dyn Write, &WriteOptions) -> Result<()> + Send + Sync>;

/// Reader shape shared by every format.
pub type FormatReader = Arc<dyn Fn(&mut dyn Read, &ReadOptions) -> Result<Payload> + Send + Sync>;

/// Named writers and readers.
///
/// Each key maps to exactly one writer; registering a key again replaces
/// the previous entry.
#[derive(Clone, Default)]
pub struct FormatRegistry {
    writers: BTreeMap<String, FormatWriter>,
    readers: BTreeMap<String, FormatReader>,
}

impl FormatRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in formats.
    ///
    /// Writers: `json`, `stdout` (JSON plus a blank line), and with
    /// `csv-output` also `csv`, `tsv`.
    /// Readers: `json`, and with `csv-output` also `csv`, `tsv`.
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register("json", Arc::new(output::write_json));
        registry.register("stdout", Arc::new(output::write_stdout));
        registry.register_reader("json", Arc::new(input::read_json));

        #[cfg(feature = "csv-output")]
        {
            registry.register("csv", Arc::new(output::write_csv));
            registry.register("tsv", Arc::new(output::write_tsv));
            registry.register_reader("csv", Arc::new(input::read_csv));
            registry.register_reader("tsv", Arc::new(input::read_tsv));
        }

        registry
    }

    /// Registers `writer` under `name` and hands it back unchanged.
    pub fn register(&mut self, name: impl Into<String>, writer: FormatWriter) -> FormatWriter {
        self.writers.insert(name.into(), writer.clone());
        writer
    }

    /// Registers `reader` under `name` and hands it back unchanged.
    pub fn register_reader(
        &mut self,
        name: impl Into<String>,
        reader: FormatReader,
    ) -> FormatReader {
        self.readers.insert(name.into(), reader.clone());
        reader
    }

    /// Returns the writer for `name`, or `default` if none is registered.
    ///
    /// Never fails; whether a missing format is an error is up to the caller.
    pub fn get(&self, name: &str, default: FormatWriter) -> FormatWriter {
        self.writers.get(name).cloned().unwrap_or(default)
    }

    /// Returns the reader for `name`, or `default` if none is registered.
    pub fn get_reader(&self, name: &str, default: FormatReader) -> FormatReader {
        self.readers.get(name).cloned().unwrap_or(default)
    }

    /// Returns the writer for `name`, failing with `UnknownFormat`.
    pub fn writer(&self, name: &str) -> Result<FormatWriter> {
        self.writers
            .get(name)
            .cloned()
            .ok_or_else(|| ExportError::unknown_format(name))
    }

    /// Returns the writer used when `name` goes to standard output.
    ///
    /// The format's own writer followed by a blank line. `stdout` itself
    /// is returned as registered.
    pub fn stream_writer(&self, name: &str) -> Result<FormatWriter> {
        let inner = self.writer(name)?;
        if name == FormatKey::Stdout.as_str() {
            return Ok(inner);
        }

        let writer: FormatWriter = Arc::new(move |payload, out, options| {
            inner(payload, &mut *out, options)?;
            out.write_all(b"\n\n")?;
            out.flush()?;
            Ok(())
        });
        Ok(writer)
    }

    /// Returns the reader for `name`, failing with `UnknownFormat`.
    pub fn reader(&self, name: &str) -> Result<FormatReader> {
        self.readers
            .get(name)
            .cloned()
            .ok_or_else(|| ExportError::unknown_format(name))
    }

    /// Reads a payload from `source` with the reader registered for `name`.
    pub fn load(&self, name: &str, source: &mut dyn Read, options: &ReadOptions) -> Result<Payload> {
        let reader = self.reader(name)?;
        reader(source, options)
    }

    /// Returns `true` if a writer is registered for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.writers.contains_key(name)
    }

    /// Registered writer keys, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.writers.keys().map(String::as_str).collect()
    }

    /// Registered reader keys, sorted.
    pub fn reader_names(&self) -> Vec<&str> {
        self.readers.keys().map(String::as_str).collect()
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("writers", &self.names())
            .field("readers", &self.reader_names())
            .finish()
    }
}

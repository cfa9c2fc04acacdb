//! Destination resolution for one write.
//!
//! [`ContentWriter::write`] picks exactly one path, in this order:
//!
//! 1. empty content: nothing is written ([`WriteOutcome::NothingToWrite`])
//! 2. explicit stream: the writer runs against it; the stream stays owned
//!    by the caller and is neither opened nor closed here
//! 3. resolvable filename: the file is created, written and closed, on
//!    error paths too
//! 4. otherwise: nothing is written ([`WriteOutcome::NoDestination`])
//!
//! Cases 1 and 4 are not errors. Errors raised by the format writer or by
//! the filesystem are returned untouched.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::WriteOptions;
use crate::core::filename::FilenameSpec;
use crate::core::registry::FormatWriter;
use crate::error::Result;
use crate::payload::Payload;
use crate::verbose::Logger;

/// Where a write without an explicit stream should go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputTarget {
    /// A path given by the user; used as is.
    Explicit(PathBuf),
    /// A generated filename, placed under the writer's output directory.
    Generated(FilenameSpec),
}

/// Which path [`ContentWriter::write`] took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteOutcome {
    /// Content was empty; nothing written.
    NothingToWrite,
    /// Content was written to the caller's stream.
    Stream,
    /// Content was written to this file.
    File(PathBuf),
    /// No stream and no resolvable filename; nothing written.
    NoDestination,
}

impl WriteOutcome {
    /// Returns `true` if anything was written.
    pub fn is_written(&self) -> bool {
        matches!(self, WriteOutcome::Stream | WriteOutcome::File(_))
    }
}

/// Resolves destinations and delegates serialization to a format writer.
#[derive(Debug, Clone, Default)]
pub struct ContentWriter {
    logger: Logger,
    output_dir: Option<PathBuf>,
    options: WriteOptions,
}

impl ContentWriter {
    /// Creates a content writer logging through `logger`.
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            output_dir: None,
            options: WriteOptions::default(),
        }
    }

    /// Places generated filenames under `dir`.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Sets the options forwarded to every format writer.
    #[must_use]
    pub fn with_options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Resolves a target into a path, or `None` if nothing usable is left.
    pub fn resolve(&self, target: Option<&OutputTarget>) -> Option<PathBuf> {
        match target? {
            OutputTarget::Explicit(path) if path.as_os_str().is_empty() => None,
            OutputTarget::Explicit(path) => Some(path.clone()),
            OutputTarget::Generated(spec) => {
                let name = spec.render();
                if name.is_empty() {
                    return None;
                }
                Some(match &self.output_dir {
                    Some(dir) => dir.join(name),
                    None => PathBuf::from(name),
                })
            }
        }
    }

    /// Writes `content` to `stream`, or to the file named by `target`.
    pub fn write(
        &self,
        stream: Option<&mut dyn Write>,
        content: &Payload,
        target: Option<&OutputTarget>,
        writer: &FormatWriter,
    ) -> Result<WriteOutcome> {
        if content.is_empty() {
            self.logger.low("No content to write.");
            return Ok(WriteOutcome::NothingToWrite);
        }

        if let Some(stream) = stream {
            self.logger.low("Explicit stream provided. Writing content to it.");
            writer(content, stream, &self.options)?;
            return Ok(WriteOutcome::Stream);
        }

        if let Some(path) = self.resolve(target) {
            self.logger.low(format!("Opening file: {}", path.display()));
            write_file(&path, content, writer, &self.options)?;
            self.logger.low(format!(
                "Wrote {} record(s) to {}",
                content.len(),
                path.display()
            ));
            return Ok(WriteOutcome::File(path));
        }

        self.logger
            .low("Unable to write content. No stream or filename provided.");
        Ok(WriteOutcome::NoDestination)
    }
}

/// Create, write and close one file. The handle is dropped on every path.
fn write_file(
    path: &Path,
    content: &Payload,
    writer: &FormatWriter,
    options: &WriteOptions,
) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    writer(content, &mut out, options)?;
    out.flush()?;
    Ok(())
}

//! The batch export step.
//!
//! [`ExportPipeline`] ties the pieces together for one CLI execution:
//!
//! ```text
//! ExportOptions ─► deduplicate ─► generate_filenames ─► ContentWriter ─► FormatRegistry writer
//! ```
//!
//! Planning (deduplication, format lookup, filename generation) happens
//! before anything is written, so a missing state or an unknown format
//! fails the run without touching the filesystem. A dry run stops right
//! after planning.
//!
//! # Example
//!
//! ```rust,no_run
//! use exportpack::config::ExportOptions;
//! use exportpack::core::FormatRegistry;
//! use exportpack::payload::Payload;
//! use exportpack::pipeline::ExportPipeline;
//! use exportpack::verbose::Logger;
//!
//! let registry = FormatRegistry::builtin();
//! let options = ExportOptions::new()
//!     .with_states(["NY"])
//!     .with_formats(["json"])
//!     .with_filenames(["centers"]);
//!
//! let pipeline = ExportPipeline::new(&registry, options, Logger::silent());
//! let report = pipeline.run(&Payload::new())?;
//! println!("{} file(s) written", report.written.len());
//! # Ok::<(), exportpack::ExportError>(())
//! ```

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ExportOptions, FailurePolicy};
use crate::core::dedup::deduplicate;
use crate::core::filename::{FilenameRequest, generate_filenames};
use crate::core::output::{ContentWriter, OutputTarget, WriteOutcome};
use crate::core::registry::FormatRegistry;
use crate::error::{ExportError, Result};
use crate::format::FormatKey;
use crate::payload::Payload;
use crate::verbose::Logger;

/// Format used when neither formats nor explicit files were requested.
#[cfg(feature = "csv-output")]
pub const DEFAULT_FORMAT: &str = "csv";
#[cfg(not(feature = "csv-output"))]
pub const DEFAULT_FORMAT: &str = "json";

/// One file write decided during planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedWrite {
    /// Registry key of the writer to use
    pub format: String,
    /// Where the content goes
    pub target: OutputTarget,
}

/// Everything the pipeline is about to do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPlan {
    /// Deduplicated states
    pub states: BTreeSet<String>,
    /// Serializers used for standard output, one stream write each
    pub stream_formats: Vec<String>,
    /// Files to write, explicit files first
    pub writes: Vec<PlannedWrite>,
    /// Dry run: nothing will be written
    pub dry: bool,
}

impl ExportPlan {
    /// Number of writes (stream and file) in the plan.
    pub fn len(&self) -> usize {
        self.stream_formats.len() + self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A write that failed under [`FailurePolicy::Continue`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedWrite {
    /// Description of the destination
    pub target: String,
    /// Error message
    pub error: String,
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    /// The run was a dry run; nothing was written
    pub dry: bool,
    /// Files written, in plan order
    pub written: Vec<PathBuf>,
    /// Number of writes to standard output
    pub streamed: usize,
    /// Destinations skipped as soft no-ops
    pub skipped: Vec<String>,
    /// Failed writes (only with [`FailurePolicy::Continue`])
    pub failures: Vec<FailedWrite>,
}

impl ExportReport {
    /// Returns `true` if no write failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One export run over a payload.
#[derive(Debug, Clone)]
pub struct ExportPipeline<'a> {
    registry: &'a FormatRegistry,
    options: ExportOptions,
    logger: Logger,
}

impl<'a> ExportPipeline<'a> {
    /// Creates a pipeline using `registry` for every format lookup.
    pub fn new(registry: &'a FormatRegistry, options: ExportOptions, logger: Logger) -> Self {
        Self {
            registry,
            options,
            logger,
        }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Deduplicates the options and decides every destination.
    ///
    /// Fails with `MissingRequiredArgument` when no state was given and
    /// with `UnknownFormat` when a requested format (or an explicit file's
    /// extension) has no registered writer.
    pub fn plan(&self) -> Result<ExportPlan> {
        let options = &self.options;
        let logger = &self.logger;

        logger.low("Deduplicating arguments...");
        logger.high("Removing duplicate states...");
        let states = deduplicate("state", &options.states, true, logger)?;
        logger.high("Removing duplicate formats...");
        let mut formats = deduplicate("format", &options.formats, false, logger)?;
        logger.high("Removing duplicate filenames...");
        let filenames = deduplicate("filename", &options.filenames, false, logger)?;
        logger.high("Removing duplicate files...");
        let files = deduplicate("file", &options.files, false, logger)?;

        if formats.is_empty() && files.is_empty() {
            logger.low(format!("No output requested. Defaulting to {DEFAULT_FORMAT}."));
            formats.insert(DEFAULT_FORMAT.to_string());
        }

        for format in &formats {
            self.registry.writer(format)?;
        }

        let (stdout, file_formats): (Vec<String>, Vec<String>) = formats
            .into_iter()
            .partition(|format| format == FormatKey::Stdout.as_str());

        // Standard output reuses the serializer of every other requested
        // format; on its own it falls back to the `stdout` entry (JSON).
        let stream_formats = match (stdout.is_empty(), file_formats.is_empty()) {
            (true, _) => Vec::new(),
            (false, true) => stdout,
            (false, false) => file_formats.clone(),
        };

        let mut writes = Vec::new();
        for file in files {
            let format = FormatKey::from_path(&file)?.as_str().to_string();
            self.registry.writer(&format)?;
            writes.push(PlannedWrite {
                format,
                target: OutputTarget::Explicit(file),
            });
        }

        if !file_formats.is_empty() {
            let request = FilenameRequest::new()
                .with_labels(filenames)
                .with_formats(file_formats)
                .with_tags(states.iter().cloned())
                .with_prefix(options.prefix.clone())
                .with_separator(options.separator.clone());

            for spec in generate_filenames(&request, logger) {
                writes.push(PlannedWrite {
                    format: spec.format_key().to_string(),
                    target: OutputTarget::Generated(spec),
                });
            }
        }

        Ok(ExportPlan {
            states,
            stream_formats,
            writes,
            dry: options.dry,
        })
    }

    /// Runs the export, sending `stdout` output to the process's stdout.
    pub fn run(&self, content: &Payload) -> Result<ExportReport> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.run_to(content, &mut handle)
    }

    /// Runs the export, sending `stdout` output to `stdout`.
    pub fn run_to(&self, content: &Payload, stdout: &mut dyn Write) -> Result<ExportReport> {
        let plan = self.plan()?;
        let mut report = ExportReport {
            dry: plan.dry,
            ..ExportReport::default()
        };

        if plan.dry {
            self.logger.low(format!(
                "Dry run: skipping {} write(s). No changes made to the filesystem.",
                plan.len()
            ));
            return Ok(report);
        }

        let mut writer =
            ContentWriter::new(self.logger.clone()).with_options(self.options.write.clone());
        if let Some(dir) = &self.options.output_dir {
            writer = writer.with_output_dir(dir);
        }

        for format in &plan.stream_formats {
            self.logger.low("Exporting results to the standard output.");
            let format_writer = self.registry.stream_writer(format)?;
            let result = writer.write(Some(&mut *stdout), content, None, &format_writer);
            self.record(&mut report, format, result)?;
        }

        for planned in &plan.writes {
            let format_writer = self.registry.writer(&planned.format)?;
            let description = match writer.resolve(Some(&planned.target)) {
                Some(path) => path.display().to_string(),
                None => format!("{:?}", planned.target),
            };
            let result = writer.write(None, content, Some(&planned.target), &format_writer);
            self.record(&mut report, &description, result)?;
        }

        self.logger.low(format!(
            "Done: {} file(s) written, {} stream write(s), {} skipped, {} failed.",
            report.written.len(),
            report.streamed,
            report.skipped.len(),
            report.failures.len()
        ));

        Ok(report)
    }

    /// Folds one write result into the report, applying the failure policy.
    fn record(
        &self,
        report: &mut ExportReport,
        target: &str,
        result: Result<WriteOutcome>,
    ) -> Result<()> {
        match result {
            Ok(WriteOutcome::File(path)) => report.written.push(path),
            Ok(WriteOutcome::Stream) => report.streamed += 1,
            Ok(WriteOutcome::NothingToWrite | WriteOutcome::NoDestination) => {
                report.skipped.push(target.to_string());
            }
            Err(error) => match self.options.policy {
                FailurePolicy::Abort => return Err(error),
                FailurePolicy::Continue => {
                    self.logger
                        .low(format!("Failed to write {target}: {error}. Continuing."));
                    report.failures.push(FailedWrite {
                        target: target.to_string(),
                        error: error.to_string(),
                    });
                }
            },
        }
        Ok(())
    }
}

/// Reads the input payload through the registry; format from the extension.
pub fn load_payload(registry: &FormatRegistry, path: &std::path::Path) -> Result<Payload> {
    let format = FormatKey::from_path(path)?;
    if format.is_stream() {
        return Err(ExportError::unknown_format(format.as_str()));
    }
    let mut file = std::fs::File::open(path)?;
    registry.load(format.as_str(), &mut file, &crate::config::ReadOptions::default())
}

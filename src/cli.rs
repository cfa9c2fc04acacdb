//! Command-line interface definition using clap.
//!
//! [`Args`] mirrors [`ExportOptions`] one flag at a time; call
//! [`Args::into_options`] to hand the parsed values to the pipeline.
//!
//! ```rust
//! use clap::Parser;
//! use exportpack::cli::Args;
//!
//! let args = Args::try_parse_from(["exportpack", "centers.json", "-s", "NY", "-J", "-n", "out"]).unwrap();
//! let options = args.into_options();
//! assert_eq!(options.formats, vec!["json"]);
//! assert_eq!(options.prefix, "export");
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{DEFAULT_PREFIX, DEFAULT_SEPARATOR, ExportOptions, FailurePolicy, WriteOptions};
use crate::format::FormatKey;

/// Export records to JSON, CSV and TSV files, one file per
/// state, label and format.
#[derive(Parser, Debug, Clone)]
#[command(name = "exportpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    exportpack centers.json -s NY -C
    exportpack centers.json -s NY -s OH -F json,csv -n centers
    exportpack centers.csv -s CA --namespace ns -T -d out/
    exportpack centers.json -s NY -o result.json -S
    exportpack centers.json -s NY -J -D -vv")]
pub struct Args {
    /// Path to input file (.json, .csv or .tsv)
    pub input: PathBuf,

    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Plan the export without writing anything
    #[arg(short = 'D', long)]
    pub dry: bool,

    /// Save to this file; format is inferred from the extension
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Separator between filename components
    #[arg(long = "sep", visible_alias = "separator", value_name = "SEPARATOR", default_value = DEFAULT_SEPARATOR)]
    pub separator: String,

    /// Prefix applied to generated filenames
    #[arg(long, value_name = "PREFIX", conflicts_with = "namespace")]
    pub prefix: Option<String>,

    /// Same as --prefix
    #[arg(long, value_name = "NAMESPACE")]
    pub namespace: Option<String>,

    /// Output formats
    #[arg(short = 'F', long = "format", value_enum, value_delimiter = ',', value_name = "FORMAT")]
    pub formats: Vec<FormatKey>,

    /// Save results in a .json file
    #[arg(short = 'J', long)]
    pub json: bool,

    /// Save results in a .csv file
    #[arg(short = 'C', long)]
    pub csv: bool,

    /// Save results in a .tsv file
    #[arg(short = 'T', long)]
    pub tsv: bool,

    /// Write results to standard output
    #[arg(short = 'S', long)]
    pub stdout: bool,

    /// Label for generated filenames, one file per label and format
    #[arg(short = 'n', long = "name", visible_alias = "basename", value_name = "FILENAME")]
    pub names: Vec<String>,

    /// Target state (repeatable)
    #[arg(short = 's', long = "state", value_delimiter = ',', value_name = "STATE")]
    pub states: Vec<String>,

    /// Omit the header row in csv/tsv output
    #[arg(long)]
    pub no_headers: bool,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Directory for generated filenames
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Keep writing the remaining files when one write fails
    #[arg(long)]
    pub keep_going: bool,
}

impl Args {
    /// Every requested format key: `--format` values first, then the shortcuts.
    pub fn format_keys(&self) -> Vec<FormatKey> {
        let shortcuts = [
            (self.json, FormatKey::Json),
            (self.csv, FormatKey::Csv),
            (self.tsv, FormatKey::Tsv),
            (self.stdout, FormatKey::Stdout),
        ];

        let mut keys = self.formats.clone();
        keys.extend(shortcuts.iter().filter(|(on, _)| *on).map(|(_, key)| *key));
        keys
    }

    /// Returns `true` if results go to standard output.
    pub fn writes_stdout(&self) -> bool {
        self.format_keys().contains(&FormatKey::Stdout)
    }

    /// The effective filename prefix.
    pub fn prefix(&self) -> &str {
        self.namespace
            .as_deref()
            .or(self.prefix.as_deref())
            .unwrap_or(DEFAULT_PREFIX)
    }

    /// Converts the parsed flags into pipeline options.
    pub fn into_options(self) -> ExportOptions {
        let write = WriteOptions::new()
            .with_headers(!self.no_headers)
            .with_pretty(!self.compact);
        let policy = if self.keep_going {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        };

        let mut options = ExportOptions::new()
            .with_states(self.states.iter().cloned())
            .with_formats(self.format_keys().iter().map(FormatKey::as_str))
            .with_filenames(self.names.iter().cloned())
            .with_files(self.files.iter().cloned())
            .with_prefix(self.prefix())
            .with_separator(self.separator.clone())
            .with_verbose(self.verbose)
            .with_dry(self.dry)
            .with_write_options(write)
            .with_policy(policy);

        if let Some(dir) = self.output_dir {
            options = options.with_output_dir(dir);
        }
        options
    }
}

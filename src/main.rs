//! # exportpack CLI
//!
//! Command-line interface for the exportpack library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use log::LevelFilter;
use log4rs::{
    Config,
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
};

use exportpack::ExportError;
use exportpack::cli::Args;
use exportpack::core::FormatRegistry;
use exportpack::pipeline::{ExportPipeline, ExportReport, load_payload};
use exportpack::verbose::{Logger, Verbosity};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Routes log output to stderr so stdout stays free for `--stdout` data.
fn setup_logging(verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = match Verbosity::from_count(verbose) {
        Verbosity::Quiet => LevelFilter::Warn,
        Verbosity::Low => LevelFilter::Info,
        Verbosity::High => LevelFilter::Debug,
    };

    let pattern = if verbose > 1 {
        "{d(%H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .build(Root::builder().appender("stderr").build(log_level))?;

    log4rs::init_config(config)?;
    Ok(())
}

fn run() -> Result<(), ExportError> {
    let start = Instant::now();
    let args = <Args as ClapParser>::parse();

    if let Err(e) = setup_logging(args.verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let quiet_summary = args.writes_stdout();
    let input = args.input.clone();
    let options = args.into_options();
    let logger = Logger::log_facade(options.verbosity());

    let registry = FormatRegistry::builtin();
    logger.low(format!("Loading {}...", input.display()));
    let payload = load_payload(&registry, &input)?;
    logger.low(format!("Loaded {} record(s).", payload.len()));

    let pipeline = ExportPipeline::new(&registry, options, logger);
    let report = pipeline.run(&payload)?;

    if !quiet_summary {
        print_summary(&report, start);
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(ExportError::invalid_input(format!(
            "{} write(s) failed",
            report.failures.len()
        )))
    }
}

fn print_summary(report: &ExportReport, start: Instant) {
    if report.dry {
        println!("Dry run: nothing written.");
        return;
    }

    for path in &report.written {
        println!("Saved {}", path.display());
    }
    for target in &report.skipped {
        println!("Skipped {}", target);
    }
    for failure in &report.failures {
        println!("Failed {}: {}", failure.target, failure.error);
    }
    println!(
        "Done: {} file(s) in {:.2}s",
        report.written.len(),
        start.elapsed().as_secs_f64()
    );
}

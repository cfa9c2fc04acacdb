//! Integration tests for the export pipeline with real files.

use exportpack::prelude::*;
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

fn record(id: i64, name: &str, city: &str) -> Record {
    let mut record = Record::new();
    record.insert("id".into(), json!(id));
    record.insert("name".into(), json!(name));
    record.insert("city".into(), json!(city));
    record
}

fn centers() -> Payload {
    Payload::from_records(vec![
        record(1, "Access Center", "Albany"),
        record(2, "Independence, Inc.", "Buffalo"),
        record(3, "Harbor CIL", "New York"),
    ])
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn capture_logger(verbosity: Verbosity) -> (Logger, Arc<Mutex<Vec<String>>>) {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = lines.clone();
    let logger = Logger::new(
        verbosity,
        Arc::new(move |_, message: &str| sink.lock().unwrap().push(message.to_string())),
    );
    (logger, lines)
}

// ============================================================================
// Filename generation through the pipeline
// ============================================================================

#[test]
fn test_one_file_per_state_label_format() {
    let dir = tempdir().unwrap();
    let registry = FormatRegistry::builtin();
    let options = ExportOptions::new()
        .with_states(["NY", "OH"])
        .with_formats(["json"])
        .with_filenames(["centers", "contacts"])
        .with_output_dir(dir.path());

    let report = ExportPipeline::new(&registry, options, Logger::silent())
        .run(&centers())
        .unwrap();

    assert_eq!(report.written.len(), 4);
    assert_eq!(
        listing(dir.path()),
        vec![
            "export.NY.centers.json",
            "export.NY.contacts.json",
            "export.OH.centers.json",
            "export.OH.contacts.json",
        ]
    );
}

#[test]
fn test_duplicate_inputs_produce_no_extra_files() {
    let dir = tempdir().unwrap();
    let registry = FormatRegistry::builtin();
    let options = ExportOptions::new()
        .with_states(["NY", "NY", "NY"])
        .with_formats(["json", "json"])
        .with_filenames(["centers", "centers"])
        .with_output_dir(dir.path());

    let report = ExportPipeline::new(&registry, options, Logger::silent())
        .run(&centers())
        .unwrap();

    assert_eq!(report.written.len(), 1);
    assert_eq!(listing(dir.path()), vec!["export.NY.centers.json"]);
}

#[test]
fn test_custom_prefix_and_separator() {
    let dir = tempdir().unwrap();
    let registry = FormatRegistry::builtin();
    let options = ExportOptions::new()
        .with_states(["CA"])
        .with_formats(["json"])
        .with_filenames(["out"])
        .with_prefix("ns")
        .with_separator("_")
        .with_output_dir(dir.path());

    ExportPipeline::new(&registry, options, Logger::silent())
        .run(&centers())
        .unwrap();

    assert_eq!(listing(dir.path()), vec!["ns_CA_out.json"]);
}

#[test]
fn test_empty_prefix_is_dropped() {
    let dir = tempdir().unwrap();
    let registry = FormatRegistry::builtin();
    let options = ExportOptions::new()
        .with_states(["NY"])
        .with_formats(["json"])
        .with_filenames(["out"])
        .with_prefix("")
        .with_output_dir(dir.path());

    ExportPipeline::new(&registry, options, Logger::silent())
        .run(&centers())
        .unwrap();

    assert_eq!(listing(dir.path()), vec!["NY.out.json"]);
}

#[test]
fn test_default_label_when_no_names() {
    let dir = tempdir().unwrap();
    let registry = FormatRegistry::builtin();
    let options = ExportOptions::new()
        .with_states(["NY"])
        .with_formats(["json"])
        .with_output_dir(dir.path());

    ExportPipeline::new(&registry, options, Logger::silent())
        .run(&centers())
        .unwrap();

    assert_eq!(listing(dir.path()), vec!["export.NY.output.json"]);
}

// ============================================================================
// File contents
// ============================================================================

#[test]
fn test_json_file_roundtrips_through_reader() {
    let dir = tempdir().unwrap();
    let registry = FormatRegistry::builtin();
    let options = ExportOptions::new()
        .with_states(["NY"])
        .with_formats(["json"])
        .with_filenames(["centers"])
        .with_output_dir(dir.path());

    let report = ExportPipeline::new(&registry, options, Logger::silent())
        .run(&centers())
        .unwrap();

    let loaded = load_payload(&registry, &report.written[0]).unwrap();
    assert_eq!(loaded, centers());
}

#[cfg(feature = "csv-output")]
#[test]
fn test_csv_and_tsv_files() {
    let dir = tempdir().unwrap();
    let registry = FormatRegistry::builtin();
    let options = ExportOptions::new()
        .with_states(["NY"])
        .with_formats(["csv", "tsv"])
        .with_filenames(["centers"])
        .with_output_dir(dir.path());

    ExportPipeline::new(&registry, options, Logger::silent())
        .run(&centers())
        .unwrap();

    let csv = fs::read_to_string(dir.path().join("export.NY.centers.csv")).unwrap();
    let tsv = fs::read_to_string(dir.path().join("export.NY.centers.tsv")).unwrap();

    assert_eq!(
        csv,
        "id,name,city\n1,Access Center,Albany\n2,\"Independence, Inc.\",Buffalo\n3,Harbor CIL,New York\n"
    );
    assert_eq!(
        tsv,
        "id\tname\tcity\n1\tAccess Center\tAlbany\n2\tIndependence, Inc.\tBuffalo\n3\tHarbor CIL\tNew York\n"
    );
}

#[cfg(feature = "csv-output")]
#[test]
fn test_csv_file_readable_by_csv_crate() {
    let dir = tempdir().unwrap();
    let registry = FormatRegistry::builtin();
    let options = ExportOptions::new()
        .with_states(["NY"])
        .with_formats(["csv"])
        .with_output_dir(dir.path());

    let report = ExportPipeline::new(&registry, options, Logger::silent())
        .run(&centers())
        .unwrap();

    let mut reader = csv::Reader::from_path(&report.written[0]).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, vec!["id", "name", "city"]);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[1][1], "Independence, Inc.");
}

#[cfg(feature = "csv-output")]
#[test]
fn test_malformed_record_aborts() {
    let dir = tempdir().unwrap();
    let registry = FormatRegistry::builtin();
    let mut short = Record::new();
    short.insert("id".into(), json!(4));
    let payload = centers().with_record(short);

    let options = ExportOptions::new()
        .with_states(["NY"])
        .with_formats(["csv"])
        .with_output_dir(dir.path());

    let err = ExportPipeline::new(&registry, options, Logger::silent())
        .run(&payload)
        .unwrap_err();
    assert!(err.is_malformed());
    assert!(err.to_string().contains("record 3"));
}

// ============================================================================
// Explicit output files and input loading
// ============================================================================

#[cfg(feature = "csv-output")]
#[test]
fn test_explicit_files_infer_format() {
    let dir = tempdir().unwrap();
    let registry = FormatRegistry::builtin();
    let json_path = dir.path().join("result.json");
    let tsv_path = dir.path().join("result.tsv");
    let options = ExportOptions::new()
        .with_states(["NY"])
        .with_files([json_path.clone(), tsv_path.clone()]);

    let report = ExportPipeline::new(&registry, options, Logger::silent())
        .run(&centers())
        .unwrap();

    assert_eq!(report.written.len(), 2);
    assert!(fs::read_to_string(&json_path).unwrap().starts_with('['));
    assert!(fs::read_to_string(&tsv_path).unwrap().starts_with("id\tname"));
    // Explicit files only: no generated names.
    assert_eq!(listing(dir.path()), vec!["result.json", "result.tsv"]);
}

#[cfg(feature = "csv-output")]
#[test]
fn test_load_csv_input() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.csv");
    fs::write(&path, "id,name\n1,x\n2,\"y, z\"\n").unwrap();

    let payload = load_payload(&FormatRegistry::builtin(), &path).unwrap();
    assert_eq!(payload.len(), 2);
    assert_eq!(payload.records()[1]["name"], json!("y, z"));

    let found = find_records(&payload, |r| r["id"] == json!("1"));
    assert_eq!(found.len(), 1);
}

#[test]
fn test_load_stdout_extension_rejected() {
    let err = load_payload(&FormatRegistry::builtin(), Path::new("input.stdout")).unwrap_err();
    assert!(err.is_unknown_format());
}

// ============================================================================
// Custom registries
// ============================================================================

#[test]
fn test_custom_format_through_pipeline() {
    let dir = tempdir().unwrap();
    let mut registry = FormatRegistry::builtin();
    registry.register(
        "txt",
        Arc::new(|payload: &Payload, out: &mut dyn Write, _: &WriteOptions| -> Result<()> {
            for record in payload {
                writeln!(out, "{}", record["name"].as_str().unwrap_or_default())?;
            }
            Ok(())
        }),
    );

    let options = ExportOptions::new()
        .with_states(["NY"])
        .with_formats(["txt"])
        .with_filenames(["names"])
        .with_output_dir(dir.path());

    ExportPipeline::new(&registry, options, Logger::silent())
        .run(&centers())
        .unwrap();

    let text = fs::read_to_string(dir.path().join("export.NY.names.txt")).unwrap();
    assert_eq!(text, "Access Center\nIndependence, Inc.\nHarbor CIL\n");
}

#[test]
fn test_unknown_format_writes_nothing() {
    let dir = tempdir().unwrap();
    let registry = FormatRegistry::builtin();
    let options = ExportOptions::new()
        .with_states(["NY"])
        .with_formats(["json", "xml"])
        .with_output_dir(dir.path());

    let err = ExportPipeline::new(&registry, options, Logger::silent())
        .run(&centers())
        .unwrap_err();

    assert!(err.is_unknown_format());
    assert_eq!(err.to_string(), "Unknown format 'xml'");
    assert!(listing(dir.path()).is_empty());
}

// ============================================================================
// Verbosity
// ============================================================================

#[test]
fn test_quiet_run_logs_nothing() {
    let dir = tempdir().unwrap();
    let registry = FormatRegistry::builtin();
    let options = ExportOptions::new()
        .with_states(["NY"])
        .with_formats(["json"])
        .with_output_dir(dir.path());

    let (logger, lines) = capture_logger(Verbosity::Quiet);
    ExportPipeline::new(&registry, options, logger)
        .run(&centers())
        .unwrap();
    assert!(lines.lock().unwrap().is_empty());
}

#[test]
fn test_high_verbosity_reports_dedup_and_names() {
    let dir = tempdir().unwrap();
    let registry = FormatRegistry::builtin();
    let options = ExportOptions::new()
        .with_states(["NY", "NY"])
        .with_formats(["json"])
        .with_filenames(["out"])
        .with_prefix("ns")
        .with_output_dir(dir.path());

    let (logger, lines) = capture_logger(Verbosity::High);
    ExportPipeline::new(&registry, options, logger)
        .run(&centers())
        .unwrap();

    let lines = lines.lock().unwrap();
    assert!(lines.iter().any(|l| l.contains("Removed 1 duplicate(s)")));
    assert!(lines.iter().any(|l| l.contains("\"ns.NY.out.json\"")));
    assert!(lines.iter().any(|l| l.starts_with("Opening file")));
}

#[test]
fn test_low_verbosity_skips_detail() {
    let dir = tempdir().unwrap();
    let registry = FormatRegistry::builtin();
    let options = ExportOptions::new()
        .with_states(["NY", "NY"])
        .with_formats(["json"])
        .with_output_dir(dir.path());

    let (logger, lines) = capture_logger(Verbosity::Low);
    ExportPipeline::new(&registry, options, logger)
        .run(&centers())
        .unwrap();

    let lines = lines.lock().unwrap();
    assert!(!lines.is_empty());
    assert!(!lines.iter().any(|l| l.contains("[In]")));
}

//! Payload readers (loaders).
//!
//! Readers share one shape, `(source, options) -> Payload`, so the
//! registry can hand any of them to the caller:
//! - [`read_json`] - array of objects, or a single object
//! - [`read_csv`] / [`read_tsv`] - header row plus string-valued records
//!   (requires `csv-output` feature)

use std::io::Read;

use serde_json::Value;

use crate::config::ReadOptions;
use crate::error::{ExportError, Result};
use crate::payload::Payload;
#[cfg(feature = "csv-output")]
use crate::payload::Record;

/// Reads a JSON payload.
///
/// A single object becomes a one-element payload.
pub fn read_json(source: &mut dyn Read, _options: &ReadOptions) -> Result<Payload> {
    let value: Value = serde_json::from_reader(source)?;
    Payload::from_value(value).ok_or_else(|| {
        ExportError::invalid_input("expected a JSON object or an array of objects")
    })
}

/// Reads delimited text into records of string values.
///
/// Without a header row, columns are named `column1`, `column2`, ...
#[cfg(feature = "csv-output")]
pub fn read_csv(source: &mut dyn Read, options: &ReadOptions) -> Result<Payload> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.headers)
        .from_reader(source);

    let header: Option<Vec<String>> = if options.headers {
        Some(reader.headers()?.iter().map(String::from).collect())
    } else {
        None
    };

    let mut payload = Payload::new();
    for row in reader.records() {
        let row = row?;
        let record: Record = row
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let key = header
                    .as_ref()
                    .and_then(|names| names.get(i).cloned())
                    .unwrap_or_else(|| format!("column{}", i + 1));
                (key, Value::String(value.to_string()))
            })
            .collect();
        payload.push(record);
    }

    Ok(payload)
}

/// Reads tab-separated text; [`read_csv`] with a tab delimiter.
#[cfg(feature = "csv-output")]
pub fn read_tsv(source: &mut dyn Read, options: &ReadOptions) -> Result<Payload> {
    read_csv(source, &options.clone().with_delimiter(b'\t'))
}

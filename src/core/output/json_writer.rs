//! JSON output writers.

use std::io::Write;

use crate::config::WriteOptions;
use crate::error::Result;
use crate::payload::Payload;

/// Writes the payload as a JSON array of objects.
///
/// # Format
/// ```json
/// [
///   {"id": 1, "name": "x"},
///   {"id": 2, "name": "y"}
/// ]
/// ```
///
/// Pretty-printed unless `options.pretty` is off.
pub fn write_json(payload: &Payload, out: &mut dyn Write, options: &WriteOptions) -> Result<()> {
    if options.pretty {
        serde_json::to_writer_pretty(&mut *out, payload)?;
    } else {
        serde_json::to_writer(&mut *out, payload)?;
    }
    out.flush()?;
    Ok(())
}

/// Writes the payload as JSON followed by a blank line.
///
/// Registered under `stdout`; used when standard output is requested
/// without any other format.
pub fn write_stdout(payload: &Payload, out: &mut dyn Write, options: &WriteOptions) -> Result<()> {
    write_json(payload, out, options)?;
    out.write_all(b"\n\n")?;
    out.flush()?;
    Ok(())
}

/// Converts the payload to a JSON string.
///
/// Same format as `write_json`, but returns a String instead of writing
/// to a stream.
pub fn to_json(payload: &Payload, options: &WriteOptions) -> Result<String> {
    let mut buffer: Vec<u8> = Vec::new();
    write_json(payload, &mut buffer, options)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

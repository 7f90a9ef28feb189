//! JSON output writer.

use std::fs::File;
use std::io::Write;

use super::{ExportRecord, OutputConfig};
use crate::Message;
use crate::error::Result;

/// Writes messages to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {"sender": "Alice", "body": "Hello"},
///   {"sender": "Bob", "body": "Hi"}
/// ]
/// ```
pub fn write_json(messages: &[&Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(messages, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts messages to a JSON array string.
pub fn to_json(messages: &[&Message], config: &OutputConfig) -> Result<String> {
    let records: Vec<ExportRecord<'_>> = messages
        .iter()
        .map(|m| ExportRecord::new(m, config))
        .collect();

    Ok(serde_json::to_string_pretty(&records)?)
}

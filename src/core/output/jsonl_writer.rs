//! JSON Lines (JSONL) output writer.
//!
//! One message per line, convenient for line-oriented tooling and for
//! feeding records to a text-generation service one at a time.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::{ExportRecord, OutputConfig};
use crate::Message;
use crate::error::Result;

/// Writes messages to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"sender":"Alice","body":"Hello"}
/// {"sender":"Bob","body":"Hi"}
/// ```
pub fn write_jsonl(messages: &[&Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(&mut writer, messages, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string.
pub fn to_jsonl(messages: &[&Message], config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_lines(&mut buf, messages, config)?;
    Ok(String::from_utf8(buf)?)
}

fn write_lines<W: Write>(out: &mut W, messages: &[&Message], config: &OutputConfig) -> Result<()> {
    for msg in messages {
        let line = serde_json::to_string(&ExportRecord::new(msg, config))?;
        writeln!(out, "{line}")?;
    }
    Ok(())
}

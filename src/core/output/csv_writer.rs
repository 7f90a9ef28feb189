//! CSV output writer.

use std::fs::File;
use std::io::Write;

use super::{ExportRecord, OutputConfig};
use crate::Message;
use crate::error::Result;

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns, in order, depending on [`OutputConfig`]:
///   `ID`, `Timestamp`, `Sender`, `Body`, `Media`, `Question`, `MediaRef`
/// - Encoding: UTF-8
pub fn write_csv(messages: &[&Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(file, messages, config)
}

/// Converts messages to a CSV string.
///
/// Same format as [`write_csv`].
pub fn to_csv(messages: &[&Message], config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_records(&mut buf, messages, config)?;
    Ok(String::from_utf8(buf)?)
}

fn write_records<W: Write>(out: W, messages: &[&Message], config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(build_header(config))?;
    for msg in messages {
        writer.write_record(build_record(&ExportRecord::new(msg, config), config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::new();

    if config.include_ids {
        header.push("ID");
    }
    if config.include_timestamps {
        header.push("Timestamp");
    }

    header.push("Sender");
    header.push("Body");

    if config.include_flags {
        header.extend(["Media", "Question", "MediaRef"]);
    }

    header
}

fn build_record(rec: &ExportRecord<'_>, config: &OutputConfig) -> Vec<String> {
    let mut record = Vec::new();

    if config.include_ids {
        record.push(rec.id.unwrap_or_default().to_string());
    }
    if config.include_timestamps {
        record.push(rec.timestamp.unwrap_or_default().to_string());
    }

    record.push(rec.sender.to_string());
    record.push(rec.body.to_string());

    if config.include_flags {
        record.push(rec.is_media.unwrap_or_default().to_string());
        record.push(rec.is_question.unwrap_or_default().to_string());
        record.push(rec.media_uri.unwrap_or_default().to_string());
    }

    record
}

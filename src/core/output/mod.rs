//! Output format writers.
//!
//! This module provides writers for message views and the analysis report:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of messages - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - one JSON object per line - requires `json-output` feature
//! - [`AnalysisReport`] - stats, participants and metrics as JSON - requires `json-output` feature
//!
//! Writers take a view (`&[&Message]`), so filtered and paginated results
//! export the same way as the full sequence.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatscope::Result<()> {
//! use chatscope::core::output::{OutputConfig, to_csv, to_jsonl};
//! use chatscope::session::Session;
//!
//! let mut session = Session::new();
//! session.load_str("[1/1/2021, 9:00] Ann: hi\n[1/1/2021, 9:01] Ben: <Media omitted>\n");
//!
//! let view = session.view();
//! let config = OutputConfig::new().with_ids().with_flags();
//!
//! let csv = to_csv(&view, &config)?;
//! assert!(csv.starts_with("ID;Sender;Body;Media;Question"));
//!
//! let jsonl = to_jsonl(&view, &config)?;
//! assert_eq!(jsonl.lines().count(), 2);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;
#[cfg(feature = "json-output")]
mod report;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
#[cfg(feature = "json-output")]
pub use report::AnalysisReport;

use serde::Serialize;

use crate::Message;

/// Controls which message fields are exported.
///
/// Sender and body are always written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Include message ids
    pub include_ids: bool,
    /// Include `YYYY-MM-DD HH:MM:SS` timestamps
    pub include_timestamps: bool,
    /// Include `is_media` / `is_question` flags and the media reference
    pub include_flags: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every optional column enabled.
    pub fn all() -> Self {
        Self {
            include_ids: true,
            include_timestamps: true,
            include_flags: true,
        }
    }

    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.include_ids = true;
        self
    }

    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    #[must_use]
    pub fn with_flags(mut self) -> Self {
        self.include_flags = true;
        self
    }
}

/// Flat export shape of one message; disabled fields are omitted.
#[derive(Debug, Serialize)]
pub(crate) struct ExportRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<&'a str>,
    pub sender: &'a str,
    pub body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_media: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_question: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_uri: Option<&'a str>,
}

impl<'a> ExportRecord<'a> {
    pub fn new(msg: &'a Message, config: &OutputConfig) -> Self {
        Self {
            id: config.include_ids.then(|| msg.id()),
            timestamp: config.include_timestamps.then(|| msg.display_timestamp()),
            sender: msg.sender(),
            body: msg.body(),
            is_media: config.include_flags.then(|| msg.is_media()),
            is_question: config.include_flags.then(|| msg.is_question()),
            media_uri: if config.include_flags {
                msg.media_ref().map(|m| m.uri.as_str())
            } else {
                None
            },
        }
    }
}

//! Export formats for message views.
//!
//! [`OutputFormat`] names a writer in [`core::output`](crate::core::output);
//! [`export_view`] and [`render_view`] dispatch to it and report a clear
//! error when the matching cargo feature is off.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatscope::Result<()> {
//! use std::path::Path;
//! use chatscope::core::output::OutputConfig;
//! use chatscope::format::{OutputFormat, render_view};
//! use chatscope::session::Session;
//!
//! let mut session = Session::new();
//! session.load_str("[1/1/2021, 9:00] Ann: hi\n");
//!
//! let format = OutputFormat::from_path(Path::new("out.jsonl"))?;
//! let text = render_view(&session.view(), format, &OutputConfig::new())?;
//! assert_eq!(text, "{\"sender\":\"Ann\",\"body\":\"hi\"}\n");
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::core::output::OutputConfig;
use crate::error::{ChatscopeError, Result};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Semicolon-delimited CSV.
    #[default]
    Csv,
    /// Pretty-printed JSON array.
    Json,
    /// One JSON object per line.
    #[cfg_attr(feature = "cli", value(alias = "ndjson"))]
    Jsonl,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv",
            OutputFormat::Json => "application/json",
            OutputFormat::Jsonl => "application/x-ndjson",
        }
    }

    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl]
    }

    /// Cargo feature that provides the writer.
    pub fn required_feature(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        ext.parse().map_err(|_| {
            ChatscopeError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: csv, json, jsonl"),
            )
        })
    }

    fn disabled(self) -> ChatscopeError {
        ChatscopeError::invalid_format(
            "output",
            format!(
                "{self} output requires the '{}' feature to be enabled",
                self.required_feature()
            ),
        )
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{s}'. Expected one of: csv, json, jsonl, ndjson"
            )),
        }
    }
}

/// Writes a message view to `path` in `format`.
#[allow(unused_variables)]
pub fn export_view(
    view: &[&Message],
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(view, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(view, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(view, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(format.disabled()),
    }
}

/// Renders a message view as a string in `format`.
#[allow(unused_variables)]
pub fn render_view(view: &[&Message], format: OutputFormat, config: &OutputConfig) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(view, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(view, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(view, config),
        #[allow(unreachable_patterns)]
        _ => Err(format.disabled()),
    }
}

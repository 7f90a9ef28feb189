//! Unified error types for chatscope.
//!
//! This module provides a single [`ChatscopeError`] enum that covers every
//! failure the library can report, plus [`SkippedEntry`], the per-entry
//! diagnostic recorded when a transcript entry is dropped during parsing.
//!
//! # Error Handling Philosophy
//!
//! - **Fatal** errors abort the whole request (unreadable file, unsupported
//!   input, archive without a transcript entry)
//! - **Per-entry** errors ([`ChatscopeError::MalformedTimestamp`]) never abort
//!   a parse; the entry is skipped and reported as a [`SkippedEntry`]
//! - An empty transcript is not an error: check
//!   [`ParseReport::is_empty`](crate::parser::ParseReport::is_empty)

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A specialized [`Result`] type for chatscope operations.
///
/// # Example
///
/// ```rust
/// use chatscope::error::Result;
/// use chatscope::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatscopeError>;

/// The error type for all chatscope operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatscopeError {
    /// An I/O error occurred while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input is neither a plain-text transcript nor an archive that
    /// contains one.
    ///
    /// Fatal for the whole parse request.
    #[error("Unsupported input{}: {message}", .path.as_ref().map(|p| format!(" '{}'", p.display())).unwrap_or_default())]
    UnsupportedInputFormat {
        /// Description of what's wrong
        message: String,
        /// The offending file, if known
        path: Option<PathBuf>,
    },

    /// The zip archive could not be read.
    #[cfg(feature = "archive")]
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A date or time component of a single entry is non-numeric or out of
    /// range.
    ///
    /// Recoverable: the parser skips the entry and continues.
    #[error("Malformed timestamp '{date}, {time}': {reason}")]
    MalformedTimestamp {
        /// Raw date text
        date: String,
        /// Raw time text
        time: String,
        /// What failed
        reason: String,
    },

    /// No message with the given id exists in the session.
    #[error("Unknown message id '{0}'")]
    UnknownMessage(String),

    /// A media reference was attached to a message that is not a media
    /// placeholder.
    #[error("Message '{0}' is not a media message")]
    NotMedia(String),

    /// A synthetic message reused an id already present in the sequence.
    #[error("Message id '{0}' is already in use")]
    DuplicateId(String),

    /// A text-generation request was started while the previous one for the
    /// same query is still pending or streaming.
    #[error("A generation request is already in flight for '{0}'")]
    RequestInFlight(String),

    /// Unknown output format, or one whose cargo feature is disabled.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// Which format kind (e.g. "output")
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Lexicon or configuration file could not be decoded.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Content is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatscopeError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatscopeError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatscopeError {
    /// Creates an unsupported-input error.
    pub fn unsupported_input(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        ChatscopeError::UnsupportedInputFormat {
            message: message.into(),
            path,
        }
    }

    /// Creates a malformed-timestamp error for one entry.
    pub fn malformed_timestamp(
        date: impl Into<String>,
        time: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ChatscopeError::MalformedTimestamp {
            date: date.into(),
            time: time.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid-format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatscopeError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatscopeError::Io(_))
    }

    /// Returns `true` if this error aborted a parse because of the input
    /// format.
    pub fn is_unsupported_input(&self) -> bool {
        matches!(self, ChatscopeError::UnsupportedInputFormat { .. })
    }

    /// Returns `true` if this is a per-entry timestamp error.
    pub fn is_malformed_timestamp(&self) -> bool {
        matches!(self, ChatscopeError::MalformedTimestamp { .. })
    }
}

/// A transcript entry dropped during parsing.
///
/// Collected in [`ParseReport::skipped`](crate::parser::ParseReport) so the
/// caller can show which entries were lost instead of silently shrinking the
/// message set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    /// Position of the entry in extraction (textual) order, 0-based.
    pub index: usize,
    /// Byte offset of the entry marker in the transcript.
    pub offset: usize,
    /// Sender as written in the marker (trimmed).
    pub sender: String,
    /// Raw date text.
    pub date: String,
    /// Raw time text.
    pub time: String,
    /// Human-readable reason.
    pub reason: String,
}

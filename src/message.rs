//! The normalized message record.
//!
//! A [`Message`] is produced by the
//! [`TranscriptParser`](crate::parser::TranscriptParser) for every valid
//! transcript entry, or spliced in by the caller as a synthetic marker via
//! [`Session::insert_synthetic`](crate::session::Session::insert_synthetic).
//!
//! Messages are immutable once built. The only field that can change after
//! construction is the opaque [`MediaRef`] on a media message, and only through
//! the session store.
//!
//! # Serialization
//!
//! ```
//! use chatscope::{Message, Origin};
//! use chrono::NaiveDate;
//!
//! let at = NaiveDate::from_ymd_opt(2020, 10, 19).unwrap().and_hms_opt(18, 15, 0).unwrap();
//! let msg = Message::synthetic("EV-1", "SYSTEM", "<Media from IMG-7>", at, true);
//!
//! let json = serde_json::to_string(&msg)?;
//! let parsed: Message = serde_json::from_str(&json)?;
//!
//! assert_eq!(msg, parsed);
//! assert_eq!(parsed.origin(), Origin::Synthetic);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::media::MediaRef;

/// Display format of [`Message::display_timestamp`].
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Where a message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Built from a transcript entry.
    #[default]
    Parsed,
    /// Inserted by the caller; never counted by the aggregator.
    Synthetic,
}

/// A normalized, timestamped transcript entry.
///
/// | Field | Description |
/// |-------|-------------|
/// | `id` | Unique within a session, e.g. `MSG-00001` |
/// | `sender` | Trimmed display name |
/// | `body` | Trimmed text, inner newlines preserved |
/// | `instant` | Naive date-time, no timezone conversion |
/// | `display_timestamp` | `YYYY-MM-DD HH:MM:SS` |
/// | `is_media` | Body contains a media placeholder |
/// | `is_question` | Question heuristic result |
/// | `media_ref` | Externally attached asset reference |
/// | `origin` | Parsed or synthetic |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: String,
    sender: String,
    body: String,
    instant: NaiveDateTime,
    display_timestamp: String,
    is_media: bool,
    is_question: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    media_ref: Option<MediaRef>,
    #[serde(default)]
    origin: Origin,
}

impl Message {
    /// Builds a parsed message. Classification is done by the caller.
    pub(crate) fn parsed(
        id: String,
        sender: &str,
        body: &str,
        instant: NaiveDateTime,
        display_timestamp: String,
        is_media: bool,
        is_question: bool,
    ) -> Self {
        Self {
            id,
            sender: sender.trim().to_string(),
            body: body.trim().to_string(),
            instant,
            display_timestamp,
            is_media,
            is_question,
            media_ref: None,
            origin: Origin::Parsed,
        }
    }

    /// Creates a synthetic message for splicing into a session.
    ///
    /// Synthetic messages are never questions.
    pub fn synthetic(
        id: impl Into<String>,
        sender: impl Into<String>,
        body: impl Into<String>,
        instant: NaiveDateTime,
        is_media: bool,
    ) -> Self {
        Self {
            id: id.into(),
            sender: sender.into().trim().to_string(),
            body: body.into().trim().to_string(),
            instant,
            display_timestamp: instant.format(DISPLAY_FORMAT).to_string(),
            is_media,
            is_question: false,
            media_ref: None,
            origin: Origin::Synthetic,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn instant(&self) -> NaiveDateTime {
        self.instant
    }

    /// Canonical `YYYY-MM-DD HH:MM:SS` rendering of [`instant`](Self::instant).
    pub fn display_timestamp(&self) -> &str {
        &self.display_timestamp
    }

    pub fn is_media(&self) -> bool {
        self.is_media
    }

    pub fn is_question(&self) -> bool {
        self.is_question
    }

    pub fn media_ref(&self) -> Option<&MediaRef> {
        self.media_ref.as_ref()
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Number of whitespace-separated tokens in the body.
    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }

    pub(crate) fn set_media_ref(&mut self, media_ref: MediaRef) {
        self.media_ref = Some(media_ref);
    }
}

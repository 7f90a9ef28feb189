//! Media-asset collaborator contract.
//!
//! Transcripts only carry placeholders such as `<Media omitted>`. Pairing a
//! placeholder with an actual file is left to an external [`MediaStore`]; the
//! core stores whatever opaque [`MediaRef`] it hands back.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Message;

/// Broad kind of a media asset, derived from its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Document,
    #[default]
    Other,
}

impl MediaKind {
    /// Classifies a MIME type such as `image/jpeg`.
    pub fn from_mime(mime: &str) -> Self {
        let top = mime.split('/').next().unwrap_or_default();
        match top.to_ascii_lowercase().as_str() {
            "image" => MediaKind::Image,
            "video" => MediaKind::Video,
            "audio" => MediaKind::Audio,
            "application" | "text" => MediaKind::Document,
            _ => MediaKind::Other,
        }
    }
}

/// Opaque reference to an externally supplied media asset.
///
/// The core never dereferences `uri`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaRef {
    /// Caller-assigned asset id, e.g. a file name.
    pub id: String,
    /// Where the asset lives (path, URL or object key).
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub kind: MediaKind,
}

impl MediaRef {
    pub fn new(id: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            uri: uri.into(),
            mime_type: None,
            kind: MediaKind::Other,
        }
    }

    /// Sets the MIME type and derives [`kind`](Self::kind) from it.
    #[must_use]
    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        let mime = mime.into();
        self.kind = MediaKind::from_mime(&mime);
        self.mime_type = Some(mime);
        self
    }
}

/// Supplies zero or one media reference for a media message.
pub trait MediaStore {
    /// Looks up the asset for `message`. Only called for `is_media` messages.
    fn lookup(&self, message: &Message) -> Option<MediaRef>;
}

/// A [`MediaStore`] backed by an id → reference map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMediaStore {
    by_message: HashMap<String, MediaRef>,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `media_ref` for the message with `message_id`.
    pub fn insert(&mut self, message_id: impl Into<String>, media_ref: MediaRef) {
        self.by_message.insert(message_id.into(), media_ref);
    }

    pub fn len(&self) -> usize {
        self.by_message.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_message.is_empty()
    }
}

impl MediaStore for InMemoryMediaStore {
    fn lookup(&self, message: &Message) -> Option<MediaRef> {
        self.by_message.get(message.id()).cloned()
    }
}

//! Building blocks of the transcript parser.
//!
//! - [`scanner`] - splits raw text into [`RawEntry`] tuples
//! - [`timestamp`] - normalizes date and time text
//! - [`classify`] - media and question heuristics
//! - [`builder`] - assembles [`Message`](crate::Message) records
//!
//! Most callers want [`TranscriptParser`](crate::parser::TranscriptParser),
//! which drives all four.

pub mod builder;
pub mod classify;
pub mod scanner;
pub mod timestamp;

pub use builder::MessageBuilder;
pub use classify::{is_media, is_question};
pub use scanner::{EntryScanner, RawEntry};
pub use timestamp::{Timestamp, normalize};

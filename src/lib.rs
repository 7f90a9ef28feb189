//! # Chatscope
//!
//! A Rust library for turning exported chat transcripts into a structured,
//! queryable message set with derived statistics.
//!
//! ## Overview
//!
//! Chatscope reads transcripts whose entries start with a line marker such as
//! `[19/10/2020, 18:15] Alice: ` (plain `.txt` or inside a `.zip` export) and
//! produces:
//! - an ordered sequence of [`Message`]s with stable ids, normalized
//!   timestamps and media/question flags
//! - per-participant message and word counts
//! - corpus metrics: word frequency, affection expressions, question count and
//!   question response rate
//! - filtered, paginated views and CSV / JSON / JSONL export
//!
//! Semantic analysis (sentiment, intent, entities) is left to an external
//! text-generation service; [`generation`] only builds the request and tracks
//! the response.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatscope::prelude::*;
//!
//! let mut session = Session::new();
//! let report = session.load_str(
//!     "[19/10/2020, 18:15] Alice: Are you coming?\n\
//!      [19/10/2020, 18:16] Bob: Yes, on my way.\n",
//! );
//!
//! assert_eq!(report.parsed, 2);
//! assert_eq!(session.metrics().question_count, 1);
//! assert_eq!(session.metrics().question_response_rate, 100.0);
//! assert_eq!(session.participants()[0].name, "Alice");
//! ```
//!
//! ## Module Structure
//!
//! - [`session`] - the session store (load, query, select, splice)
//! - [`parser`] - [`TranscriptParser`](parser::TranscriptParser), [`ParseReport`](parser::ParseReport)
//! - [`parsing`] - scanner, timestamp normalizer, classifiers, message builder
//! - [`core`] - aggregator, analyzer, filters, output writers
//! - [`config`] - [`Lexicon`](config::Lexicon), [`ParserConfig`](config::ParserConfig), [`SessionConfig`](config::SessionConfig)
//! - [`input`] - `.txt` / `.zip` loading
//! - [`media`] - media-asset collaborator contract
//! - [`generation`] - text-generation collaborator contract
//! - [`format`] - [`OutputFormat`](format::OutputFormat) dispatch
//! - [`error`] - [`ChatscopeError`], [`Result`]
//! - [`prelude`] - convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod generation;
pub mod input;
pub mod media;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod session;

// Re-export the main types at the crate root for convenience
pub use error::{ChatscopeError, Result};
pub use message::{Message, Origin};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatscope::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Message, Origin};

    pub use crate::error::{ChatscopeError, Result, SkippedEntry};

    pub use crate::config::{DateOrder, Lexicon, ParserConfig, SessionConfig};

    pub use crate::parser::{ParseOutput, ParseReport, TranscriptParser};
    pub use crate::session::Session;

    pub use crate::core::aggregator::{Participant, ParticipantAggregator};
    pub use crate::core::analyzer::{ConversationStats, CorpusMetrics};
    pub use crate::core::filter::{Category, FilterConfig, Page};
    pub use crate::core::output::OutputConfig;

    pub use crate::media::{MediaKind, MediaRef, MediaStore};
    pub use crate::generation::{
        AnalysisOptions, GenerationEvent, GenerationRequest, GenerationSlot, GenerationState,
        TextGenerator,
    };

    pub use crate::format::OutputFormat;
}

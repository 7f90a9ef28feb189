//! Transcript parser.
//!
//! [`TranscriptParser`] drives the whole pipeline for one transcript:
//! scan entries, normalize timestamps, build and classify messages, update
//! the participant aggregator, then stable-sort by instant.
//!
//! # Example
//!
//! ```rust
//! use chatscope::core::aggregator::ParticipantAggregator;
//! use chatscope::parser::TranscriptParser;
//!
//! let text = "[19/10/2020, 18:16] Bob: Yes, on my way.\n\
//!             [19/10/2020, 18:15] Alice: Are you coming?\n\
//!             [31/02/2020, 18:17] Carol: never happened\n";
//!
//! let mut participants = ParticipantAggregator::new();
//! let out = TranscriptParser::new().parse_str(text, &mut participants);
//!
//! // Sorted by time; ids follow extraction order
//! assert_eq!(out.messages[0].sender(), "Alice");
//! assert_eq!(out.messages[0].id(), "MSG-00002");
//!
//! // The impossible date is skipped, not fatal
//! assert_eq!(out.report.skipped.len(), 1);
//! assert_eq!(participants.len(), 2);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::Message;
use crate::config::{Lexicon, ParserConfig};
use crate::core::aggregator::ParticipantAggregator;
use crate::error::{Result, SkippedEntry};
use crate::input::load_transcript;
use crate::parsing::{EntryScanner, MessageBuilder};

/// Diagnostics of one parse run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Messages built from the transcript.
    pub parsed: usize,
    /// Entries dropped because their timestamp could not be normalized.
    pub skipped: Vec<SkippedEntry>,
}

impl ParseReport {
    /// Returns `true` if no message was produced. Not an error.
    pub fn is_empty(&self) -> bool {
        self.parsed == 0
    }

    /// Entries seen by the scanner, valid or not.
    pub fn total_entries(&self) -> usize {
        self.parsed + self.skipped.len()
    }
}

/// The sorted messages of a parse plus its report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutput {
    pub messages: Vec<Message>,
    pub report: ParseReport,
}

/// Parser for line-marker transcripts.
#[derive(Debug, Clone, Default)]
pub struct TranscriptParser {
    config: ParserConfig,
    lexicon: Lexicon,
}

impl TranscriptParser {
    /// Creates a parser with default configuration and the English lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig, lexicon: Lexicon) -> Self {
        Self { config, lexicon }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Parses transcript text.
    ///
    /// `aggregator` is reset first and then receives one record per built
    /// message. Malformed entries are skipped, logged and listed in
    /// [`ParseReport::skipped`].
    pub fn parse_str(&self, text: &str, aggregator: &mut ParticipantAggregator) -> ParseOutput {
        debug!(bytes = text.len(), "parsing transcript");
        aggregator.reset();

        let mut builder = MessageBuilder::new(&self.config, &self.lexicon);
        let mut messages = Vec::new();
        let mut skipped = Vec::new();

        for (index, raw) in EntryScanner::new(text).enumerate() {
            match builder.build(&raw, aggregator) {
                Ok(message) => messages.push(message),
                Err(err) => {
                    warn!(
                        index,
                        offset = raw.offset,
                        sender = raw.sender.trim(),
                        error = %err,
                        "skipping transcript entry"
                    );
                    skipped.push(SkippedEntry {
                        index,
                        offset: raw.offset,
                        sender: raw.sender.trim().to_string(),
                        date: raw.date.to_string(),
                        time: raw.time.to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        // Stable: equal instants keep extraction order
        messages.sort_by_key(Message::instant);

        debug!(
            messages = messages.len(),
            skipped = skipped.len(),
            participants = aggregator.len(),
            "transcript parsed"
        );

        ParseOutput {
            report: ParseReport {
                parsed: messages.len(),
                skipped,
            },
            messages,
        }
    }

    /// Loads a `.txt` or `.zip` transcript and parses it.
    pub fn parse_path(
        &self,
        path: &Path,
        aggregator: &mut ParticipantAggregator,
    ) -> Result<ParseOutput> {
        let text = load_transcript(path, &self.config)?;
        Ok(self.parse_str(&text, aggregator))
    }
}

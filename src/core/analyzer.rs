//! Whole-sequence statistics.
//!
//! [`CorpusMetrics`] runs once over the final, sorted message sequence:
//!
//! - word frequency (lowercased, stop words and short/numeric tokens removed)
//! - affection-expression count
//! - question count and response rate
//!
//! [`ConversationStats`] holds the overview numbers (totals, media count,
//! active days).

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::config::Lexicon;

/// How many following messages are checked for a reply to a question.
pub const RESPONSE_WINDOW: usize = 3;

/// Derived whole-corpus statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusMetrics {
    /// Cleaned token → occurrences, ordered by token.
    pub word_frequency: BTreeMap<String, usize>,
    /// Messages containing at least one affection phrase.
    pub affection_expression_count: usize,
    pub question_count: usize,
    /// Questions followed by another sender within [`RESPONSE_WINDOW`]
    /// messages.
    pub answered_question_count: usize,
    /// `answered / questions * 100`, or 0 without questions.
    pub question_response_rate: f64,
}

impl CorpusMetrics {
    /// Computes all metrics over `messages`, which must already be sorted.
    ///
    /// ```
    /// use chatscope::config::Lexicon;
    /// use chatscope::core::aggregator::ParticipantAggregator;
    /// use chatscope::core::analyzer::CorpusMetrics;
    /// use chatscope::parser::TranscriptParser;
    ///
    /// let text = "[19/10/2020, 18:15] Alice: Are you coming?\n\
    ///             [19/10/2020, 18:16] Bob: Yes, on my way.\n";
    /// let mut agg = ParticipantAggregator::new();
    /// let out = TranscriptParser::new().parse_str(text, &mut agg);
    ///
    /// let metrics = CorpusMetrics::analyze(&out.messages, &Lexicon::default());
    /// assert_eq!(metrics.question_count, 1);
    /// assert_eq!(metrics.question_response_rate, 100.0);
    /// ```
    pub fn analyze(messages: &[Message], lexicon: &Lexicon) -> Self {
        let question_count = messages.iter().filter(|m| m.is_question()).count();
        let answered_question_count = count_answered(messages);

        let question_response_rate = if question_count == 0 {
            0.0
        } else {
            answered_question_count as f64 / question_count as f64 * 100.0
        };

        Self {
            word_frequency: word_frequency(messages, lexicon),
            affection_expression_count: messages
                .iter()
                .filter(|m| lexicon.contains_affection(&m.body().to_lowercase()))
                .count(),
            question_count,
            answered_question_count,
            question_response_rate,
        }
    }

    /// The `n` most frequent tokens, by count descending then token ascending.
    pub fn top_words(&self, n: usize) -> Vec<(&str, usize)> {
        let mut words: Vec<(&str, usize)> = self
            .word_frequency
            .iter()
            .map(|(w, &c)| (w.as_str(), c))
            .collect();
        // BTreeMap order is already token-ascending; a stable sort keeps it for ties
        words.sort_by(|a, b| b.1.cmp(&a.1));
        words.truncate(n);
        words
    }

    /// Distinct tokens counted.
    pub fn vocabulary_size(&self) -> usize {
        self.word_frequency.len()
    }
}

fn word_frequency(messages: &[Message], lexicon: &Lexicon) -> BTreeMap<String, usize> {
    let mut freq = BTreeMap::new();

    for message in messages {
        let lowered = message.body().to_lowercase();
        for token in lowered.split_whitespace() {
            if token.chars().count() <= 2
                || token.chars().all(|c| c.is_ascii_digit())
                || lexicon.is_stop_word(token)
            {
                continue;
            }

            let cleaned: String = token
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            if cleaned.chars().count() <= 2 || lexicon.is_stop_word(&cleaned) {
                continue;
            }

            *freq.entry(cleaned).or_insert(0) += 1;
        }
    }

    freq
}

fn count_answered(messages: &[Message]) -> usize {
    messages
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_question())
        .filter(|&(i, question)| {
            messages
                .iter()
                .skip(i + 1)
                .take(RESPONSE_WINDOW)
                .any(|next| next.sender() != question.sender())
        })
        .count()
}

/// Overview numbers for a message sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationStats {
    pub total_messages: usize,
    /// Whitespace tokens over all bodies.
    pub total_words: usize,
    pub media_count: usize,
    pub first_instant: Option<NaiveDateTime>,
    pub last_instant: Option<NaiveDateTime>,
    /// Whole days between first and last message plus one; 0 when empty.
    pub active_days: i64,
}

impl ConversationStats {
    /// Computes the overview of a sorted sequence.
    pub fn from_messages(messages: &[Message]) -> Self {
        let first_instant = messages.first().map(Message::instant);
        let last_instant = messages.last().map(Message::instant);

        let active_days = match (first_instant, last_instant) {
            (Some(first), Some(last)) => (last - first).num_days() + 1,
            _ => 0,
        };

        Self {
            total_messages: messages.len(),
            total_words: messages.iter().map(Message::word_count).sum(),
            media_count: messages.iter().filter(|m| m.is_media()).count(),
            first_instant,
            last_instant,
            active_days,
        }
    }
}

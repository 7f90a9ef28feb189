//! JSON analysis report.

use std::fs::File;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::core::aggregator::Participant;
use crate::core::analyzer::{ConversationStats, CorpusMetrics};
use crate::error::{Result, SkippedEntry};
use crate::session::Session;

/// A token and its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Snapshot of everything derived from a parsed transcript.
///
/// The full word-frequency table is not included; `top_words` carries the
/// head of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub stats: ConversationStats,
    /// Sorted by message count, descending.
    pub participants: Vec<Participant>,
    pub question_count: usize,
    pub answered_question_count: usize,
    pub question_response_rate: f64,
    pub affection_expression_count: usize,
    pub vocabulary_size: usize,
    pub top_words: Vec<WordCount>,
    pub skipped: Vec<SkippedEntry>,
}

impl AnalysisReport {
    /// Assembles a report from its parts.
    pub fn new(
        stats: ConversationStats,
        participants: Vec<Participant>,
        metrics: &CorpusMetrics,
        top_n: usize,
        skipped: Vec<SkippedEntry>,
    ) -> Self {
        Self {
            stats,
            participants,
            question_count: metrics.question_count,
            answered_question_count: metrics.answered_question_count,
            question_response_rate: metrics.question_response_rate,
            affection_expression_count: metrics.affection_expression_count,
            vocabulary_size: metrics.vocabulary_size(),
            top_words: metrics
                .top_words(top_n)
                .into_iter()
                .map(|(word, count)| WordCount {
                    word: word.to_string(),
                    count,
                })
                .collect(),
            skipped,
        }
    }

    /// Builds the report for the current state of `session`.
    pub fn from_session(session: &Session, top_n: usize) -> Self {
        Self::new(
            session.stats(),
            session.participants(),
            session.metrics(),
            top_n,
            session.skipped().to_vec(),
        )
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the pretty-printed JSON to `output_path`.
    pub fn write_json(&self, output_path: &str) -> Result<()> {
        let mut file = File::create(output_path)?;
        file.write_all(self.to_json()?.as_bytes())?;
        Ok(())
    }
}

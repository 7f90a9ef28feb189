//! Configuration types for parsing, analysis and querying.
//!
//! Everything locale-dependent lives here as plain data so it can be swapped
//! without touching behavior:
//!
//! - [`Lexicon`] - stop words, question starters, media markers and the
//!   phrase lists used by the analyzer and the category filter
//! - [`ParserConfig`] - date field order and message id format
//! - [`SessionConfig`] - the two above plus the page size of the query layer
//!
//! # Example
//!
//! ```rust
//! use chatscope::config::{DateOrder, ParserConfig, SessionConfig};
//!
//! let config = SessionConfig::new()
//!     .with_parser(ParserConfig::new().with_date_order(DateOrder::MonthDayYear))
//!     .with_page_size(25);
//!
//! assert_eq!(config.page_size, 25);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// English stop words excluded from the word-frequency table.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does", "doesn't",
    "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had", "hadn't",
    "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her", "here",
    "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd", "i'll",
    "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "let's",
    "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on",
    "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own",
    "same", "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so", "some",
    "such", "than", "that", "that's", "the", "their", "theirs", "them", "themselves", "then",
    "there", "there's", "these", "they", "they'd", "they'll", "they're", "they've", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we",
    "we'd", "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's",
    "where", "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with",
    "won't", "would", "wouldn't", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
    "yourself", "yourselves", "just", "like", "get", "got", "also", "much", "many", "even", "now",
    "one", "two", "will", "shall",
];

/// Leading words that mark a sentence as interrogative.
pub const DEFAULT_QUESTION_STARTERS: &[&str] = &[
    "who", "what", "when", "where", "why", "how", "is", "are", "was", "were", "will", "would",
    "could", "should", "do", "does", "did", "have", "has", "had", "can",
];

/// Placeholders an export writes in place of an attachment.
pub const DEFAULT_MEDIA_MARKERS: &[&str] = &[
    "<Media omitted>",
    "<image omitted>",
    "<video omitted>",
    "<audio omitted>",
];

/// Phrases and glyphs counted as affection expressions (lowercase).
pub const DEFAULT_AFFECTION_PHRASES: &[&str] = &["i love you", "love you", "love u", "❤", "<3"];

/// Phrases matched by the `phrases` filter category (lowercase).
pub const DEFAULT_FILTER_PHRASES: &[&str] = &["i love you", "miss you", "thank you", "sorry"];

/// Word lists driving the heuristics.
///
/// Stop words and question starters are compared against lowercased tokens,
/// so store them lowercase. Media markers are matched case-sensitively.
///
/// A lexicon can be loaded from TOML; missing keys fall back to the English
/// defaults:
///
/// ```rust
/// use chatscope::config::Lexicon;
///
/// let lexicon = Lexicon::from_toml_str(r#"
///     question_starters = ["qui", "quoi", "quand"]
/// "#)?;
///
/// assert!(lexicon.is_question_starter("quand"));
/// assert!(lexicon.is_stop_word("the"));
/// # Ok::<(), chatscope::ChatscopeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Tokens excluded from word frequency.
    pub stop_words: HashSet<String>,
    /// Sentence-leading words that make a sentence a question.
    pub question_starters: HashSet<String>,
    /// Exact substrings marking an omitted attachment.
    pub media_markers: Vec<String>,
    /// Substrings counted once per message as affection expressions.
    pub affection_phrases: Vec<String>,
    /// Substrings matched by the `phrases` filter category.
    pub filter_phrases: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            stop_words: to_set(DEFAULT_STOP_WORDS),
            question_starters: to_set(DEFAULT_QUESTION_STARTERS),
            media_markers: to_vec(DEFAULT_MEDIA_MARKERS),
            affection_phrases: to_vec(DEFAULT_AFFECTION_PHRASES),
            filter_phrases: to_vec(DEFAULT_FILTER_PHRASES),
        }
    }
}

impl Lexicon {
    /// Creates the default English lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a lexicon from TOML. Absent keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Replaces the stop-word set.
    #[must_use]
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the question-starter list.
    #[must_use]
    pub fn with_question_starters<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.question_starters = words.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the media placeholder markers.
    #[must_use]
    pub fn with_media_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.media_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    pub fn is_question_starter(&self, token: &str) -> bool {
        self.question_starters.contains(token)
    }

    /// Returns `true` if `body` contains any media marker verbatim.
    pub fn contains_media_marker(&self, body: &str) -> bool {
        self.media_markers.iter().any(|m| body.contains(m.as_str()))
    }

    /// Returns `true` if the lowercased body contains an affection phrase.
    pub fn contains_affection(&self, lowered_body: &str) -> bool {
        self.affection_phrases
            .iter()
            .any(|p| lowered_body.contains(p.as_str()))
    }

    /// Returns `true` if the lowercased body contains a filter phrase.
    pub fn contains_filter_phrase(&self, lowered_body: &str) -> bool {
        self.filter_phrases
            .iter()
            .any(|p| lowered_body.contains(p.as_str()))
    }
}

fn to_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

fn to_vec(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

/// Field order of the date part of an entry marker.
///
/// The order is fixed per transcript and never inferred from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateOrder {
    /// `19/10/2020`
    #[default]
    #[serde(alias = "dmy")]
    DayMonthYear,
    /// `10/19/2020`
    #[serde(alias = "mdy")]
    MonthDayYear,
}

impl std::fmt::Display for DateOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateOrder::DayMonthYear => write!(f, "D/M/Y"),
            DateOrder::MonthDayYear => write!(f, "M/D/Y"),
        }
    }
}

impl std::str::FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dmy" | "daymonthyear" | "d/m/y" => Ok(DateOrder::DayMonthYear),
            "mdy" | "monthdayyear" | "m/d/y" => Ok(DateOrder::MonthDayYear),
            _ => Err(format!("Unknown date order: '{}'. Expected one of: dmy, mdy", s)),
        }
    }
}

/// Configuration for transcript parsing.
///
/// # Example
///
/// ```rust
/// use chatscope::config::ParserConfig;
///
/// let config = ParserConfig::new().with_id_prefix("EV-").with_id_start(2200);
/// assert_eq!(config.format_id(0), "EV-02200");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Date field order (default: day/month/year)
    pub date_order: DateOrder,

    /// Prefix of generated message ids (default: `MSG-`)
    pub id_prefix: String,

    /// First sequence number (default: 1)
    pub id_start: u64,

    /// Zero-padded width of the sequence number (default: 5)
    pub id_width: usize,

    /// Archive entry name suffix that identifies the transcript
    /// (default: `_chat.txt`)
    pub archive_entry_suffix: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            date_order: DateOrder::DayMonthYear,
            id_prefix: "MSG-".to_string(),
            id_start: 1,
            id_width: 5,
            archive_entry_suffix: "_chat.txt".to_string(),
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    #[must_use]
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_id_start(mut self, start: u64) -> Self {
        self.id_start = start;
        self
    }

    #[must_use]
    pub fn with_id_width(mut self, width: usize) -> Self {
        self.id_width = width;
        self
    }

    #[must_use]
    pub fn with_archive_entry_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.archive_entry_suffix = suffix.into();
        self
    }

    /// Formats the id of the `seq`-th built message (0-based). The number
    /// saturates at `u64::MAX`.
    pub fn format_id(&self, seq: u64) -> String {
        format!(
            "{}{:0width$}",
            self.id_prefix,
            self.id_start.saturating_add(seq),
            width = self.id_width
        )
    }
}

/// Configuration for a [`Session`](crate::session::Session).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Parser settings
    pub parser: ParserConfig,

    /// Heuristic word lists
    pub lexicon: Lexicon,

    /// Messages per page in the query layer (default: 50)
    pub page_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            lexicon: Lexicon::default(),
            page_size: 50,
        }
    }
}

impl SessionConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a full session configuration from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    #[must_use]
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    #[must_use]
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Sets the page size. Zero is raised to one.
    #[must_use]
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }
}

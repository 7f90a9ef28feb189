//! Search, category and sender filters plus pagination.
//!
//! Every function here borrows the canonical sequence and returns a new
//! view (`Vec<&Message>`); nothing is mutated.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Search | [`with_search`](FilterConfig::with_search) | Case-insensitive substring of body, sender or id |
//! | Category | [`with_category`](FilterConfig::with_category) | `all`, `questions`, `phrases`, `media` |
//! | Sender | [`filter_by_sender`] | Exact sender match |
//!
//! # Example
//!
//! ```
//! use chatscope::config::Lexicon;
//! use chatscope::core::aggregator::ParticipantAggregator;
//! use chatscope::core::filter::{Category, FilterConfig, apply_filters, paginate};
//! use chatscope::parser::TranscriptParser;
//!
//! let text = "[1/1/2021, 9:00] Ann: thank you!\n\
//!             [1/1/2021, 9:01] Ben: <Media omitted>\n\
//!             [1/1/2021, 9:02] Ann: where are you?\n";
//! let out = TranscriptParser::new().parse_str(text, &mut ParticipantAggregator::new());
//! let lexicon = Lexicon::default();
//!
//! let config = FilterConfig::new().with_search("ANN");
//! assert_eq!(apply_filters(&out.messages, &config, &lexicon).len(), 2);
//!
//! let config = FilterConfig::new().with_category(Category::Phrases);
//! let view = apply_filters(&out.messages, &config, &lexicon);
//! assert_eq!(view[0].body(), "thank you!");
//!
//! let page = paginate(&view, 1, 50);
//! assert_eq!(page.count, 1);
//! ```
//!
//! # Behavior Notes
//!
//! - Search and category combine with AND logic
//! - The search term is lowercased but not trimmed
//! - An empty sender matches nothing

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::config::Lexicon;

/// Default number of messages per page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Message category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// No category restriction.
    #[default]
    All,
    /// Messages flagged by the question heuristic.
    Questions,
    /// Messages containing one of the lexicon's filter phrases.
    Phrases,
    /// Media placeholders.
    Media,
}

impl Category {
    /// Returns `true` if `message` belongs to this category.
    pub fn matches(self, message: &Message, lexicon: &Lexicon) -> bool {
        match self {
            Category::All => true,
            Category::Questions => message.is_question(),
            Category::Phrases => lexicon.contains_filter_phrase(&message.body().to_lowercase()),
            Category::Media => message.is_media(),
        }
    }

    pub fn all_names() -> &'static [&'static str] {
        &["all", "questions", "phrases", "media"]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::All => write!(f, "all"),
            Category::Questions => write!(f, "questions"),
            Category::Phrases => write!(f, "phrases"),
            Category::Media => write!(f, "media"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Category::All),
            "questions" | "question" | "q" => Ok(Category::Questions),
            "phrases" | "phrase" => Ok(Category::Phrases),
            "media" => Ok(Category::Media),
            _ => Err(format!(
                "Unknown category: '{}'. Expected one of: {}",
                s,
                Category::all_names().join(", ")
            )),
        }
    }
}

/// Search and category criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Lowercased search term. `None` or empty matches everything.
    pub search: Option<String>,

    pub category: Category,
}

impl FilterConfig {
    /// Creates a filter that passes every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search term. Lowercased, not trimmed.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into().to_lowercase());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Returns `true` if any criterion restricts the result.
    pub fn is_active(&self) -> bool {
        self.search.as_deref().is_some_and(|s| !s.is_empty()) || self.category != Category::All
    }

    /// Returns `true` if `message` passes both criteria.
    pub fn matches(&self, message: &Message, lexicon: &Lexicon) -> bool {
        let matches_search = match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => {
                message.body().to_lowercase().contains(term)
                    || message.sender().to_lowercase().contains(term)
                    || message.id().to_lowercase().contains(term)
            }
        };
        matches_search && self.category.matches(message, lexicon)
    }
}

/// Returns the messages that pass `config`, in sequence order.
pub fn apply_filters<'a>(
    messages: &'a [Message],
    config: &FilterConfig,
    lexicon: &Lexicon,
) -> Vec<&'a Message> {
    messages
        .iter()
        .filter(|m| config.matches(m, lexicon))
        .collect()
}

/// Returns the messages whose sender equals `sender` exactly.
///
/// An empty `sender` yields an empty view.
pub fn filter_by_sender<'a>(messages: &'a [Message], sender: &str) -> Vec<&'a Message> {
    if sender.is_empty() {
        return Vec::new();
    }
    messages.iter().filter(|m| m.sender() == sender).collect()
}

/// One page of a filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub items: Vec<&'a Message>,
    /// 1-based page number after clamping.
    pub number: usize,
    /// Total pages, at least 1.
    pub count: usize,
    /// Messages in the whole view.
    pub total: usize,
}

impl Page<'_> {
    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.count
    }
}

/// Number of pages for `len` items: `max(1, ceil(len / size))`.
pub fn page_count(len: usize, size: usize) -> usize {
    len.div_ceil(size.max(1)).max(1)
}

/// Slices page `number` (1-based, clamped into range) out of `view`.
pub fn paginate<'a>(view: &[&'a Message], number: usize, size: usize) -> Page<'a> {
    let size = size.max(1);
    let count = page_count(view.len(), size);
    let number = number.clamp(1, count);

    let start = (number - 1) * size;
    let end = (start + size).min(view.len());

    Page {
        items: view[start.min(end)..end].to_vec(),
        number,
        count,
        total: view.len(),
    }
}

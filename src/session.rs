//! Session-scoped store.
//!
//! A [`Session`] owns the canonical, time-ordered message sequence together
//! with everything derived from it: participants, corpus metrics, parse
//! diagnostics, the active filter and page, and the message selection used
//! to build text-generation requests.
//!
//! Loading a transcript resets all of it. Writers take `&mut self`, so one
//! session never sees two concurrent parses.
//!
//! # Example
//!
//! ```rust
//! use chatscope::core::filter::{Category, FilterConfig};
//! use chatscope::session::Session;
//!
//! let mut session = Session::new();
//! let report = session.load_str(
//!     "[19/10/2020, 18:15] Alice: Are you coming?\n\
//!      [19/10/2020, 18:16] Bob: Yes, on my way.\n",
//! );
//! assert_eq!(report.parsed, 2);
//! assert_eq!(session.metrics().question_response_rate, 100.0);
//!
//! session.set_filter(FilterConfig::new().with_category(Category::Questions));
//! let page = session.current_page();
//! assert_eq!(page.items.len(), 1);
//! assert_eq!(page.items[0].sender(), "Alice");
//! ```

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::Message;
use crate::config::{Lexicon, SessionConfig};
use crate::core::aggregator::{Participant, ParticipantAggregator};
use crate::core::analyzer::{ConversationStats, CorpusMetrics};
use crate::core::filter::{FilterConfig, Page, apply_filters, filter_by_sender, page_count, paginate};
use crate::error::{ChatscopeError, Result, SkippedEntry};
use crate::generation::build_context;
use crate::media::{MediaRef, MediaStore};
use crate::parser::{ParseOutput, ParseReport, TranscriptParser};

/// Sender of messages spliced in by [`Session::add_media_to_timeline`].
pub const SYSTEM_SENDER: &str = "SYSTEM";

/// Which filter currently defines the view.
///
/// Search/category and sender filters replace each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveFilter {
    Query(FilterConfig),
    Sender(String),
}

impl Default for ActiveFilter {
    fn default() -> Self {
        ActiveFilter::Query(FilterConfig::default())
    }
}

/// In-memory store for one transcript.
#[derive(Debug, Clone)]
pub struct Session {
    parser: TranscriptParser,
    page_size: usize,
    messages: Vec<Message>,
    participants: ParticipantAggregator,
    metrics: CorpusMetrics,
    report: ParseReport,
    filter: ActiveFilter,
    page: usize,
    selection: HashSet<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_config(SessionConfig::default())
    }
}

impl Session {
    /// Creates an empty session with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            parser: TranscriptParser::with_config(config.parser, config.lexicon),
            page_size: config.page_size.max(1),
            messages: Vec::new(),
            participants: ParticipantAggregator::new(),
            metrics: CorpusMetrics::default(),
            report: ParseReport::default(),
            filter: ActiveFilter::default(),
            page: 1,
            selection: HashSet::new(),
        }
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Replaces the session contents with `text` parsed, sorted and analyzed.
    pub fn load_str(&mut self, text: &str) -> ParseReport {
        self.reset();
        let output = self.parser.parse_str(text, &mut self.participants);
        self.install(output)
    }

    /// Loads a `.txt` or `.zip` transcript from disk.
    ///
    /// On error the session is left empty.
    pub fn load_path(&mut self, path: &Path) -> Result<ParseReport> {
        self.reset();
        let output = self.parser.parse_path(path, &mut self.participants)?;
        Ok(self.install(output))
    }

    fn install(&mut self, output: ParseOutput) -> ParseReport {
        self.messages = output.messages;
        self.report = output.report;
        self.metrics = CorpusMetrics::analyze(&self.messages, self.parser.lexicon());

        info!(
            messages = self.report.parsed,
            skipped = self.report.skipped.len(),
            participants = self.participants.len(),
            "transcript loaded"
        );
        self.report.clone()
    }

    /// Clears messages, participants, metrics, diagnostics, filters and
    /// selection.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.participants.reset();
        self.metrics = CorpusMetrics::default();
        self.report = ParseReport::default();
        self.filter = ActiveFilter::default();
        self.page = 1;
        self.selection.clear();
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The canonical sequence, sorted by instant.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id() == id)
    }

    /// Participants sorted by message count, ties by first appearance.
    pub fn participants(&self) -> Vec<Participant> {
        self.participants.ranked()
    }

    pub fn aggregator(&self) -> &ParticipantAggregator {
        &self.participants
    }

    pub fn metrics(&self) -> &CorpusMetrics {
        &self.metrics
    }

    /// Overview numbers, including synthetic messages.
    pub fn stats(&self) -> ConversationStats {
        ConversationStats::from_messages(&self.messages)
    }

    pub fn report(&self) -> &ParseReport {
        &self.report
    }

    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.report.skipped
    }

    pub fn lexicon(&self) -> &Lexicon {
        self.parser.lexicon()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    // ------------------------------------------------------------------
    // Filtering and paging
    // ------------------------------------------------------------------

    pub fn active_filter(&self) -> &ActiveFilter {
        &self.filter
    }

    /// Applies a search/category filter and returns to page 1.
    pub fn set_filter(&mut self, filter: FilterConfig) {
        debug!(?filter, "filter changed");
        self.filter = ActiveFilter::Query(filter);
        self.page = 1;
    }

    /// Shows only messages from `sender` (exact match) and returns to page 1.
    pub fn filter_by_sender(&mut self, sender: impl Into<String>) {
        self.filter = ActiveFilter::Sender(sender.into());
        self.page = 1;
    }

    /// Drops every filter and returns to page 1.
    pub fn reset_filters(&mut self) {
        self.filter = ActiveFilter::default();
        self.page = 1;
    }

    /// The filtered view of the canonical sequence.
    pub fn view(&self) -> Vec<&Message> {
        match &self.filter {
            ActiveFilter::Query(config) => apply_filters(&self.messages, config, self.lexicon()),
            ActiveFilter::Sender(sender) => filter_by_sender(&self.messages, sender),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Pages in the current view, at least 1.
    pub fn page_count(&self) -> usize {
        page_count(self.view().len(), self.page_size)
    }

    /// Jumps to `number`, clamped into `1..=page_count()`.
    pub fn set_page(&mut self, number: usize) {
        self.page = number.clamp(1, self.page_count());
    }

    /// Advances one page. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page < self.page_count() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Goes back one page. Returns `false` on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// The current page of the current view.
    pub fn current_page(&self) -> Page<'_> {
        paginate(&self.view(), self.page, self.page_size)
    }

    // ------------------------------------------------------------------
    // Media and synthetic messages
    // ------------------------------------------------------------------

    /// Attaches an opaque media reference to a media message.
    ///
    /// # Errors
    ///
    /// [`ChatscopeError::UnknownMessage`] if no message has `id`;
    /// [`ChatscopeError::NotMedia`] if it is not a media placeholder.
    pub fn attach_media_ref(&mut self, id: &str, media_ref: MediaRef) -> Result<()> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id() == id)
            .ok_or_else(|| ChatscopeError::UnknownMessage(id.to_string()))?;
        if !message.is_media() {
            return Err(ChatscopeError::NotMedia(id.to_string()));
        }
        message.set_media_ref(media_ref);
        Ok(())
    }

    /// Asks `store` for the asset of message `id` and attaches it.
    ///
    /// Returns `Ok(false)` if the store has nothing for this message.
    pub fn request_media_ref(&mut self, id: &str, store: &dyn MediaStore) -> Result<bool> {
        let message = self
            .message(id)
            .ok_or_else(|| ChatscopeError::UnknownMessage(id.to_string()))?;
        if !message.is_media() {
            return Err(ChatscopeError::NotMedia(id.to_string()));
        }

        match store.lookup(message) {
            Some(media_ref) => {
                self.attach_media_ref(id, media_ref)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Splices a caller-supplied message into the sequence.
    ///
    /// The sequence is stable re-sorted; existing ids are untouched.
    /// Participants and corpus metrics are not updated.
    ///
    /// # Errors
    ///
    /// [`ChatscopeError::DuplicateId`] if the id is already in use.
    pub fn insert_synthetic(&mut self, message: Message) -> Result<()> {
        if self.message(message.id()).is_some() {
            return Err(ChatscopeError::DuplicateId(message.id().to_string()));
        }
        debug!(id = message.id(), "inserting synthetic message");
        self.messages.push(message);
        self.messages.sort_by_key(Message::instant);
        Ok(())
    }

    /// Places a media asset on the timeline at `instant`.
    ///
    /// The new message takes the asset id as its own id, is sent by
    /// [`SYSTEM_SENDER`] and reads `<Media from {id}>`. On success the
    /// filters are dropped and the view returns to page 1.
    pub fn add_media_to_timeline(&mut self, media_ref: MediaRef, instant: NaiveDateTime) -> Result<()> {
        let mut message = Message::synthetic(
            media_ref.id.clone(),
            SYSTEM_SENDER,
            format!("<Media from {}>", media_ref.id),
            instant,
            true,
        );
        message.set_media_ref(media_ref);
        self.insert_synthetic(message)?;
        self.reset_filters();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Selects or deselects message `id`. Returns the new state.
    pub fn toggle_selection(&mut self, id: &str) -> Result<bool> {
        if self.message(id).is_none() {
            return Err(ChatscopeError::UnknownMessage(id.to_string()));
        }
        if self.selection.remove(id) {
            Ok(false)
        } else {
            self.selection.insert(id.to_string());
            Ok(true)
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected messages in sequence order.
    pub fn selected(&self) -> Vec<&Message> {
        self.messages
            .iter()
            .filter(|m| self.selection.contains(m.id()))
            .collect()
    }

    /// Context string for a text-generation request over the selection.
    pub fn selection_context(&self) -> String {
        build_context(&self.selected())
    }
}

//! Text-generation collaborator contract.
//!
//! Intent, sentiment and entity analysis are delegated to an external
//! service. This module only builds what is sent ([`GenerationRequest`]) and
//! tracks what comes back ([`GenerationSlot`]); the response text is stored
//! verbatim and never interpreted.
//!
//! # State machine
//!
//! ```text
//! Idle ──begin──▶ Pending ──Partial──▶ Streaming ──Complete──▶ Complete
//!                    │                    │
//!                    └──────Error─────────┴──────────────────▶ Failed
//! ```
//!
//! A slot accepts a new request only when it is not `Pending` or
//! `Streaming`.
//!
//! # Example
//!
//! ```rust
//! use chatscope::generation::{GenerationEvent, GenerationSlot, GenerationState};
//!
//! let mut slot = GenerationSlot::new("analysis");
//! slot.begin()?;
//! assert!(slot.begin().is_err());
//!
//! slot.apply(GenerationEvent::Partial("Sent".into()));
//! slot.apply(GenerationEvent::Complete("Sentiment: neutral".into()));
//! assert_eq!(slot.state(), &GenerationState::Complete("Sentiment: neutral".into()));
//! # Ok::<(), chatscope::ChatscopeError>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::Message;
use crate::error::{ChatscopeError, Result};

/// Renders messages as `[timestamp] sender: body` blocks separated by a
/// blank line.
pub fn build_context(messages: &[&Message]) -> String {
    messages
        .iter()
        .map(|m| format!("[{}] {}: {}", m.display_timestamp(), m.sender(), m.body()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Which analyses to request from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub sentiment: bool,
    pub entities: bool,
    pub intent: bool,
    pub timeline: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            sentiment: true,
            entities: true,
            intent: true,
            timeline: true,
        }
    }
}

impl AnalysisOptions {
    /// No analysis selected.
    pub fn none() -> Self {
        Self {
            sentiment: false,
            entities: false,
            intent: false,
            timeline: false,
        }
    }

    #[must_use]
    pub fn with_sentiment(mut self, on: bool) -> Self {
        self.sentiment = on;
        self
    }

    #[must_use]
    pub fn with_entities(mut self, on: bool) -> Self {
        self.entities = on;
        self
    }

    #[must_use]
    pub fn with_intent(mut self, on: bool) -> Self {
        self.intent = on;
        self
    }

    #[must_use]
    pub fn with_timeline(mut self, on: bool) -> Self {
        self.timeline = on;
        self
    }

    /// Instruction lines for the enabled analyses, in fixed order.
    pub fn requested(&self) -> Vec<&'static str> {
        [
            (self.sentiment, "Sentiment of each message and overall conversation tone"),
            (self.entities, "Entities mentioned (people, places, objects)"),
            (self.intent, "Intent and motivation behind the messages"),
            (self.timeline, "Timeline reconstruction and sequence of events"),
        ]
        .into_iter()
        .filter_map(|(on, line)| on.then_some(line))
        .collect()
    }
}

/// What is sent to the text-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Rendered messages, see [`build_context`].
    pub context: String,
    /// What the service is asked to do with the context.
    pub instruction: String,
}

impl GenerationRequest {
    pub fn new(context: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            instruction: instruction.into(),
        }
    }

    /// Requests the analyses enabled in `options` over `messages`.
    pub fn analysis(messages: &[&Message], options: &AnalysisOptions) -> Self {
        let mut instruction =
            String::from("Analyze the chat messages below. Requested analysis:\n");
        for line in options.requested() {
            instruction.push_str("- ");
            instruction.push_str(line);
            instruction.push('\n');
        }
        instruction.push_str("Report factual observations only, formatted as Markdown.");
        Self::new(build_context(messages), instruction)
    }

    /// Asks a free-form question about `messages`.
    pub fn evidence_query(messages: &[&Message], question: &str) -> Self {
        let instruction = format!(
            "Answer the question using only the chat messages below. \
             Cite message timestamps where relevant.\nQuestion: {}",
            question.trim()
        );
        Self::new(build_context(messages), instruction)
    }

    /// Instruction and context joined into a single prompt.
    pub fn prompt(&self) -> String {
        format!("{}\n\nCHAT MESSAGES:\n{}", self.instruction, self.context)
    }
}

/// One update from the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "content", rename_all = "lowercase")]
pub enum GenerationEvent {
    /// Text so far (replaces earlier partial text).
    #[serde(rename = "incomplete")]
    Partial(String),
    /// Final text.
    Complete(String),
    /// The service failed.
    Error(String),
}

/// State of one logical query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationState {
    #[default]
    Idle,
    Pending,
    Streaming(String),
    Complete(String),
    Failed(String),
}

impl GenerationState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, GenerationState::Pending | GenerationState::Streaming(_))
    }

    /// Latest text, partial or final.
    pub fn text(&self) -> Option<&str> {
        match self {
            GenerationState::Streaming(t) | GenerationState::Complete(t) => Some(t),
            _ => None,
        }
    }
}

/// Tracks at most one in-flight request for a named query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSlot {
    name: String,
    state: GenerationState,
}

impl GenerationSlot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: GenerationState::Idle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    /// Moves to `Pending`.
    ///
    /// # Errors
    ///
    /// [`ChatscopeError::RequestInFlight`] while a request is pending or
    /// streaming.
    pub fn begin(&mut self) -> Result<()> {
        if self.state.is_in_flight() {
            return Err(ChatscopeError::RequestInFlight(self.name.clone()));
        }
        self.state = GenerationState::Pending;
        Ok(())
    }

    /// Applies an event. Events arriving while no request is in flight are
    /// ignored; returns whether the event was applied.
    pub fn apply(&mut self, event: GenerationEvent) -> bool {
        if !self.state.is_in_flight() {
            debug!(slot = %self.name, ?event, "ignoring event outside a request");
            return false;
        }
        self.state = match event {
            GenerationEvent::Partial(text) => GenerationState::Streaming(text),
            GenerationEvent::Complete(text) => GenerationState::Complete(text),
            GenerationEvent::Error(reason) => {
                warn!(slot = %self.name, %reason, "generation failed");
                GenerationState::Failed(reason)
            }
        };
        true
    }

    /// Marks the in-flight request as failed.
    pub fn fail(&mut self, reason: impl Into<String>) {
        if self.state.is_in_flight() {
            self.state = GenerationState::Failed(reason.into());
        }
    }
}

/// An external text-generation service.
pub trait TextGenerator {
    /// Starts a request and returns its event stream.
    ///
    /// The stream should end with a `Complete` or `Error` event.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Box<dyn Iterator<Item = GenerationEvent> + '_>>;
}

/// Runs `request` on `generator`, feeding every event into `slot`.
///
/// A stream that ends without a terminal event leaves the slot `Failed`.
///
/// # Errors
///
/// [`ChatscopeError::RequestInFlight`] if `slot` is busy, or whatever
/// `generator` returns when the request cannot be started (the slot is then
/// `Failed`).
pub fn run_query<'s>(
    slot: &'s mut GenerationSlot,
    generator: &dyn TextGenerator,
    request: &GenerationRequest,
) -> Result<&'s GenerationState> {
    slot.begin()?;
    debug!(slot = %slot.name, context_bytes = request.context.len(), "starting generation");

    let events = match generator.generate(request) {
        Ok(events) => events,
        Err(err) => {
            slot.fail(err.to_string());
            return Err(err);
        }
    };

    for event in events {
        slot.apply(event);
        if !slot.state.is_in_flight() {
            break;
        }
    }

    slot.fail("stream ended before completion");
    Ok(&slot.state)
}

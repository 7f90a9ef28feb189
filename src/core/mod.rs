//! Core analysis logic for chatscope.
//!
//! This module contains:
//! - [`aggregator`] - per-sender message and word counters
//! - [`analyzer`] - word frequency, affection count, question/response rate
//! - [`filter`] - search, category and sender filters, pagination
//! - [`output`] - format writers (CSV, JSON, JSONL) and the analysis report
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use chatscope::core::{
//!     CorpusMetrics, FilterConfig, OutputConfig, ParticipantAggregator,
//!     apply_filters, paginate, to_csv, to_json,
//! };
//! # }
//! ```

pub mod aggregator;
pub mod analyzer;
pub mod filter;
pub mod output;

pub use aggregator::{Participant, ParticipantAggregator};
pub use analyzer::{ConversationStats, CorpusMetrics};
pub use filter::{Category, FilterConfig, Page, apply_filters, filter_by_sender, paginate};
pub use output::OutputConfig;

#[cfg(feature = "json-output")]
pub use output::AnalysisReport;
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};

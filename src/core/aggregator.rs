//! Per-sender counters.
//!
//! The aggregator is an explicit object owned by the caller and passed by
//! `&mut` into the message builder. It is reset at the start of every parse.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A distinct sender and its counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub message_count: usize,
    pub word_count: usize,
}

/// Incrementally built participant table.
///
/// Participants are kept in first-appearance order; [`ranked`](Self::ranked)
/// sorts by message count with that order as the tie-breaker.
///
/// ```
/// use chatscope::core::aggregator::ParticipantAggregator;
///
/// let mut agg = ParticipantAggregator::new();
/// agg.record("Alice", 3);
/// agg.record("Bob", 1);
/// agg.record("Bob", 2);
///
/// let ranked = agg.ranked();
/// assert_eq!(ranked[0].name, "Bob");
/// assert_eq!(ranked[0].word_count, 3);
/// assert_eq!(agg.total_messages(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParticipantAggregator {
    participants: Vec<Participant>,
    index: HashMap<String, usize>,
}

impl ParticipantAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one message of `words` tokens for `name`.
    ///
    /// Senders are compared by plain string equality.
    pub fn record(&mut self, name: &str, words: usize) {
        let slot = match self.index.get(name) {
            Some(&i) => i,
            None => {
                self.participants.push(Participant {
                    name: name.to_string(),
                    message_count: 0,
                    word_count: 0,
                });
                let i = self.participants.len() - 1;
                self.index.insert(name.to_string(), i);
                i
            }
        };
        let participant = &mut self.participants[slot];
        participant.message_count += 1;
        participant.word_count += words;
    }

    /// Forgets every participant.
    pub fn reset(&mut self) {
        self.participants.clear();
        self.index.clear();
    }

    pub fn get(&self, name: &str) -> Option<&Participant> {
        self.index.get(name).map(|&i| &self.participants[i])
    }

    /// Participants in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    /// Participants sorted by `message_count` descending.
    pub fn ranked(&self) -> Vec<Participant> {
        let mut ranked = self.participants.clone();
        ranked.sort_by(|a, b| b.message_count.cmp(&a.message_count));
        ranked
    }

    pub fn total_messages(&self) -> usize {
        self.participants.iter().map(|p| p.message_count).sum()
    }

    pub fn total_words(&self) -> usize {
        self.participants.iter().map(|p| p.word_count).sum()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_get() {
        let mut agg = ParticipantAggregator::new();
        agg.record("Ann", 4);
        agg.record("Ann", 0);
        let ann = agg.get("Ann").unwrap();
        assert_eq!(ann.message_count, 2);
        assert_eq!(ann.word_count, 4);
        assert!(agg.get("ann").is_none());
    }

    #[test]
    fn test_ranked_ties_keep_first_appearance() {
        let mut agg = ParticipantAggregator::new();
        agg.record("Zed", 1);
        agg.record("Amy", 1);
        agg.record("Bob", 1);
        agg.record("Bob", 1);

        let names: Vec<_> = agg.ranked().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Bob", "Zed", "Amy"]);
    }

    #[test]
    fn test_reset() {
        let mut agg = ParticipantAggregator::new();
        agg.record("Ann", 1);
        agg.reset();
        assert!(agg.is_empty());
        assert_eq!(agg.total_messages(), 0);
        assert!(agg.get("Ann").is_none());
    }

    #[test]
    fn test_totals() {
        let mut agg = ParticipantAggregator::new();
        agg.record("Ann", 2);
        agg.record("Ben", 5);
        assert_eq!(agg.total_messages(), 2);
        assert_eq!(agg.total_words(), 7);
        assert_eq!(agg.len(), 2);
    }
}

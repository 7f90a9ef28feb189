//! Builds [`Message`] records from raw entries.

use crate::Message;
use crate::config::{Lexicon, ParserConfig};
use crate::core::aggregator::ParticipantAggregator;
use crate::error::Result;

use super::classify::{is_media, is_question};
use super::scanner::RawEntry;
use super::timestamp::normalize;

/// Turns [`RawEntry`] tuples into messages with sequential ids.
///
/// Timestamp normalization runs before an id is taken and before the
/// aggregator is touched, so a rejected entry leaves no trace.
pub struct MessageBuilder<'a> {
    config: &'a ParserConfig,
    lexicon: &'a Lexicon,
    issued: u64,
}

impl<'a> MessageBuilder<'a> {
    pub fn new(config: &'a ParserConfig, lexicon: &'a Lexicon) -> Self {
        Self {
            config,
            lexicon,
            issued: 0,
        }
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Builds one message and records it with `aggregator`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTimestamp`](crate::ChatscopeError::MalformedTimestamp)
    /// if the entry's date or time cannot be normalized.
    pub fn build(
        &mut self,
        raw: &RawEntry<'_>,
        aggregator: &mut ParticipantAggregator,
    ) -> Result<Message> {
        let ts = normalize(raw.date, raw.time, self.config.date_order)?;

        let id = self.config.format_id(self.issued);
        self.issued += 1;

        let message = Message::parsed(
            id,
            raw.sender,
            raw.body,
            ts.instant,
            ts.display,
            is_media(raw.body, self.lexicon),
            is_question(raw.body, self.lexicon),
        );
        aggregator.record(message.sender(), raw.body.split_whitespace().count());

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw<'a>(date: &'a str, sender: &'a str, body: &'a str) -> RawEntry<'a> {
        RawEntry {
            date,
            time: "10:00",
            sender,
            body,
            offset: 0,
        }
    }

    #[test]
    fn test_sequential_ids_and_aggregation() {
        let config = ParserConfig::default();
        let lexicon = Lexicon::default();
        let mut agg = ParticipantAggregator::new();
        let mut builder = MessageBuilder::new(&config, &lexicon);

        let a = builder.build(&raw("1/1/2021", " Ann ", "hello there\n"), &mut agg).unwrap();
        let b = builder.build(&raw("1/1/2021", "Ben", "<Media omitted>"), &mut agg).unwrap();

        assert_eq!(a.id(), "MSG-00001");
        assert_eq!(b.id(), "MSG-00002");
        assert_eq!(a.sender(), "Ann");
        assert!(b.is_media());
        assert!(!b.is_question());
        assert_eq!(agg.get("Ann").map(|p| p.word_count), Some(2));
        assert_eq!(agg.get("Ben").map(|p| p.message_count), Some(1));
    }

    #[test]
    fn test_malformed_entry_consumes_nothing() {
        let config = ParserConfig::default();
        let lexicon = Lexicon::default();
        let mut agg = ParticipantAggregator::new();
        let mut builder = MessageBuilder::new(&config, &lexicon);

        assert!(builder.build(&raw("31/2/2021", "Ann", "x"), &mut agg).is_err());
        assert_eq!(builder.issued(), 0);
        assert!(agg.is_empty());

        let ok = builder.build(&raw("1/3/2021", "Ann", "x"), &mut agg).unwrap();
        assert_eq!(ok.id(), "MSG-00001");
    }
}

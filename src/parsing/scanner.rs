//! Transcript tokenizer.
//!
//! Finds line-leading entry markers of the form
//! `[D/M/YYYY, H:MM[:SS][ AM|PM]] sender: ` and slices the text between
//! consecutive markers into [`RawEntry`] tuples.

use std::iter::Peekable;
use std::sync::LazyLock;

use regex::{CaptureMatches, Regex};

/// Entry marker at the start of a line.
///
/// The meridiem may be preceded by any non-newline Unicode space (exports
/// use U+202F). The sender cannot contain a colon or a line break, and the
/// colon after it must be followed by whitespace or the end of a line.
static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\[(\d{1,2}/\d{1,2}/\d{4}),[\s&&[^\r\n]]+(\d{1,2}:\d{2}(?::\d{2})?(?:[\s&&[^\r\n]]?(?i:[ap]m))?)\][\s&&[^\r\n]]([^:\r\n]+):(?:\s|$)",
    )
    .expect("entry marker pattern is valid")
});

const BOM: char = '\u{feff}';

/// One undecoded transcript entry.
///
/// All fields borrow from the transcript. `sender` and `body` are untrimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEntry<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub sender: &'a str,
    pub body: &'a str,
    /// Byte offset of the marker's `[` in the transcript.
    pub offset: usize,
}

/// Lazy, forward-only iterator over the entries of a transcript.
///
/// # Example
///
/// ```
/// use chatscope::parsing::EntryScanner;
///
/// let text = "[19/10/2020, 18:15] Alice: Are you coming?\n\
///             [19/10/2020, 18:16] Bob: Yes,\non my way.\n";
///
/// let entries: Vec<_> = EntryScanner::new(text).collect();
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[1].sender, "Bob");
/// assert_eq!(entries[1].body.trim(), "Yes,\non my way.");
/// ```
pub struct EntryScanner<'a> {
    text: &'a str,
    base: usize,
    markers: Peekable<CaptureMatches<'static, 'a>>,
}

impl<'a> EntryScanner<'a> {
    /// Creates a scanner over `text`. A leading byte-order mark is skipped.
    pub fn new(text: &'a str) -> Self {
        let (text, base) = match text.strip_prefix(BOM) {
            Some(rest) => (rest, BOM.len_utf8()),
            None => (text, 0),
        };
        Self {
            text,
            base,
            markers: MARKER.captures_iter(text).peekable(),
        }
    }
}

impl<'a> Iterator for EntryScanner<'a> {
    type Item = RawEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let caps = self.markers.next()?;
        let marker = caps.get(0)?;

        let body_end = self
            .markers
            .peek()
            .and_then(|next| next.get(0))
            .map_or(self.text.len(), |m| m.start());

        Some(RawEntry {
            date: caps.get(1)?.as_str(),
            time: caps.get(2)?.as_str(),
            sender: caps.get(3)?.as_str(),
            body: &self.text[marker.end()..body_end],
            offset: self.base + marker.start(),
        })
    }
}

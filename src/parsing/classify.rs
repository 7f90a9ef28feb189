//! Token-level message classifiers.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::Lexicon;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("URL pattern is valid"));

/// Returns `true` if `body` contains a media placeholder marker.
pub fn is_media(body: &str, lexicon: &Lexicon) -> bool {
    lexicon.contains_media_marker(body)
}

/// Question heuristic.
///
/// URLs are removed first. A remaining `?` makes the body a question;
/// otherwise any sentence (split on `.`, `!`, `?`) whose first word is a
/// question starter does.
///
/// ```
/// use chatscope::config::Lexicon;
/// use chatscope::parsing::classify::is_question;
///
/// let lexicon = Lexicon::default();
/// assert!(is_question("Are you coming?", &lexicon));
/// assert!(is_question("ok. where are you", &lexicon));
/// assert!(!is_question("see https://example.com/?q=1", &lexicon));
/// ```
pub fn is_question(body: &str, lexicon: &Lexicon) -> bool {
    let stripped = URL.replace_all(body, "");
    if stripped.contains('?') {
        return true;
    }

    stripped
        .split(['.', '!', '?'])
        .filter_map(|sentence| sentence.split_whitespace().next())
        .any(|first| lexicon.is_question_starter(&first.to_lowercase()))
}

//! Edge case tests for chatscope
//!
//! Boundary conditions of the scanner, the timestamp normalizer, the
//! classifiers and the analyzer that the regular tests do not reach.

use chatscope::ChatscopeError;
use chatscope::config::{DateOrder, Lexicon};
use chatscope::core::aggregator::ParticipantAggregator;
use chatscope::parser::TranscriptParser;
use chatscope::parsing::timestamp::normalize;
use chatscope::session::Session;
use chrono::{NaiveDate, NaiveDateTime};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

fn parse(text: &str) -> chatscope::parser::ParseOutput {
    let mut agg = ParticipantAggregator::new();
    TranscriptParser::new().parse_str(text, &mut agg)
}

// =========================================================================
// Scanner boundaries
// =========================================================================

#[test]
fn test_empty_and_blank_input() {
    for text in ["", "   \n\n", "no markers here at all"] {
        let out = parse(text);
        assert!(out.report.is_empty());
        assert!(out.report.skipped.is_empty());
        assert!(out.messages.is_empty());
    }
}

#[test]
fn test_byte_order_mark() {
    let out = parse("\u{feff}[1/1/2021, 9:00] Ann: hi\n");
    assert_eq!(out.messages.len(), 1);
    assert_eq!(out.messages[0].sender(), "Ann");
}

#[test]
fn test_crlf_line_endings() {
    let out = parse("[1/1/2021, 9:00] Ann: hi\r\n[1/1/2021, 9:01] Ben: yo\r\n");
    assert_eq!(out.messages.len(), 2);
    assert_eq!(out.messages[0].body(), "hi");
    assert_eq!(out.messages[1].body(), "yo");
}

#[test]
fn test_preamble_before_first_marker_ignored() {
    let out = parse(
        "Messages and calls are end-to-end encrypted.\n[1/1/2021, 9:00] Ann: hi\n",
    );
    assert_eq!(out.messages.len(), 1);
    assert_eq!(out.messages[0].body(), "hi");
}

#[test]
fn test_marker_not_at_line_start_stays_in_body() {
    let out = parse("[1/1/2021, 9:00] Ann: quoting [1/1/2021, 8:00] Ben: old\n");
    assert_eq!(out.messages.len(), 1);
    assert_eq!(out.messages[0].body(), "quoting [1/1/2021, 8:00] Ben: old");
}

#[test]
fn test_colon_in_body() {
    let out = parse("[1/1/2021, 9:00] Ann: note: bring the receipt\n");
    assert_eq!(out.messages[0].sender(), "Ann");
    assert_eq!(out.messages[0].body(), "note: bring the receipt");
}

#[test]
fn test_empty_body() {
    let out = parse("[1/1/2021, 9:00] Ann:\n[1/1/2021, 9:01] Ben: hi\n");
    assert_eq!(out.messages.len(), 2);
    assert_eq!(out.messages[0].body(), "");
    assert_eq!(out.messages[0].word_count(), 0);
}

#[test]
fn test_unicode_senders() {
    let mut agg = ParticipantAggregator::new();
    let out = TranscriptParser::new().parse_str(
        "[1/1/2021, 9:00] Мария: Привет\n[1/1/2021, 9:01] 村上: こんにちは\n[1/1/2021, 9:02] +1 (555) 010-4477: 👍\n",
        &mut agg,
    );
    assert_eq!(out.messages.len(), 3);
    assert_eq!(out.messages[1].sender(), "村上");
    assert_eq!(out.messages[2].sender(), "+1 (555) 010-4477");
    assert_eq!(agg.len(), 3);
}

// =========================================================================
// Timestamps
// =========================================================================

#[test]
fn test_seconds_and_single_digit_fields() {
    let ts = normalize("1/2/2021", "9:05:59", DateOrder::DayMonthYear).unwrap();
    assert_eq!(ts.instant, at(2021, 2, 1, 9, 5, 59));
    assert_eq!(ts.display, "2021-02-01 09:05:59");
}

#[test]
fn test_meridiem_boundaries() {
    let order = DateOrder::DayMonthYear;
    assert_eq!(normalize("1/1/2021", "12:30 AM", order).unwrap().instant, at(2021, 1, 1, 0, 30, 0));
    assert_eq!(normalize("1/1/2021", "12:05 PM", order).unwrap().instant, at(2021, 1, 1, 12, 5, 0));
    assert_eq!(normalize("1/1/2021", "11:59pm", order).unwrap().instant, at(2021, 1, 1, 23, 59, 0));
    // A 24-hour value with a meridiem is taken as written
    assert_eq!(normalize("1/1/2021", "13:00 PM", order).unwrap().instant, at(2021, 1, 1, 13, 0, 0));
}

#[test]
fn test_narrow_no_break_space_before_meridiem() {
    let out = parse("[1/1/2021, 9:00\u{202f}PM] Ann: hi\n");
    assert_eq!(out.messages.len(), 1);
    assert_eq!(out.messages[0].instant(), at(2021, 1, 1, 21, 0, 0));
}

#[test]
fn test_impossible_dates_rejected() {
    let order = DateOrder::DayMonthYear;
    for (date, time) in [
        ("31/02/2021", "10:00"),
        ("29/02/2021", "10:00"),
        ("0/1/2021", "10:00"),
        ("1/13/2021", "10:00"),
        ("1/1/2021", "24:00"),
        ("1/1/2021", "10:60"),
    ] {
        let err = normalize(date, time, order).unwrap_err();
        assert!(err.is_malformed_timestamp(), "{date} {time}");
    }
    assert!(normalize("29/02/2020", "10:00", order).is_ok());
}

#[test]
fn test_date_order_swaps_fields() {
    let dmy = normalize("3/4/2021", "10:00", DateOrder::DayMonthYear).unwrap();
    let mdy = normalize("3/4/2021", "10:00", DateOrder::MonthDayYear).unwrap();
    assert_eq!(dmy.instant.date(), NaiveDate::from_ymd_opt(2021, 4, 3).unwrap());
    assert_eq!(mdy.instant.date(), NaiveDate::from_ymd_opt(2021, 3, 4).unwrap());
}

#[test]
fn test_all_entries_malformed() {
    let out = parse("[31/02/2021, 10:00] Ann: a\n[30/02/2021, 10:00] Ben: b\n");
    assert!(out.report.is_empty());
    assert_eq!(out.report.skipped.len(), 2);
    assert!(out.report.skipped[0].reason.contains("31/02/2021"));
}

// =========================================================================
// Classifiers
// =========================================================================

#[test]
fn test_question_heuristics() {
    let out = parse(
        "\
[1/1/2021, 9:00] Ann: ok. where are you
[1/1/2021, 9:01] Ann: see https://example.com/?q=1
[1/1/2021, 9:02] Ann: WHAT
[1/1/2021, 9:03] Ann: i know what you did
[1/1/2021, 9:04] Ann: really?
",
    );
    let flags: Vec<bool> = out.messages.iter().map(|m| m.is_question()).collect();
    assert_eq!(flags, [true, false, true, false, true]);
}

#[test]
fn test_media_markers_are_case_sensitive() {
    let out = parse(
        "[1/1/2021, 9:00] Ann: <MEDIA OMITTED>\n[1/1/2021, 9:01] Ann: look <image omitted>\n",
    );
    assert!(!out.messages[0].is_media());
    assert!(out.messages[1].is_media());
}

#[test]
fn test_heart_emoji_variants_count_as_affection() {
    let mut session = Session::new();
    session.load_str(
        "[1/1/2021, 9:00] Ann: ❤️\n[1/1/2021, 9:01] Ben: ❤\n[1/1/2021, 9:02] Ann: LOVE U\n[1/1/2021, 9:03] Ben: lovely\n",
    );
    assert_eq!(session.metrics().affection_expression_count, 3);
}

// =========================================================================
// Word frequency
// =========================================================================

#[test]
fn test_word_cleaning() {
    let mut session = Session::new();
    session.load_str("[1/1/2021, 9:00] Ann: #rust!! 2021 ok -- a1b \"quoted\" don't\n");
    let freq = &session.metrics().word_frequency;

    assert_eq!(freq.get("rust"), Some(&1));
    assert_eq!(freq.get("a1b"), Some(&1));
    assert_eq!(freq.get("quoted"), Some(&1));
    assert!(!freq.contains_key("2021"));
    assert!(!freq.contains_key("ok"));
    assert!(!freq.contains_key(""));
    // Stop word in its raw form
    assert!(!freq.contains_key("dont"));
}

#[test]
fn test_filler_words_are_stop_words() {
    let mut session = Session::new();
    session.load_str(
        "[1/1/2021, 9:00] Ann: just like also much many even now one two will shall get got\n",
    );
    let freq = &session.metrics().word_frequency;
    assert!(freq.is_empty(), "counted: {:?}", freq.keys().collect::<Vec<_>>());
}

#[test]
fn test_custom_stop_words() {
    let lexicon = Lexicon::new().with_stop_words(["evidence"]);
    let mut agg = ParticipantAggregator::new();
    let parser = TranscriptParser::with_config(Default::default(), lexicon.clone());
    let out = parser.parse_str("[1/1/2021, 9:00] Ann: the evidence\n", &mut agg);

    let metrics = chatscope::core::analyzer::CorpusMetrics::analyze(&out.messages, &lexicon);
    assert!(!metrics.word_frequency.contains_key("evidence"));
    // "the" is no longer a stop word with the replaced set
    assert_eq!(metrics.word_frequency.get("the"), Some(&1));
}

// =========================================================================
// Session lifecycle
// =========================================================================

#[test]
fn test_reload_resets_derived_state() {
    let mut session = Session::new();
    session.load_str("[1/1/2021, 9:00] Ann: Where?\n[1/1/2021, 9:01] Ben: here\n");
    session.toggle_selection("MSG-00001").unwrap();

    session.load_str("[2/1/2021, 9:00] Cat: hello\n");
    let participants = session.participants();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0].name, "Cat");
    assert_eq!(session.metrics().question_count, 0);
    assert!(session.selected().is_empty());
    assert_eq!(session.messages()[0].id(), "MSG-00001");
}

#[test]
fn test_non_utf8_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.txt");
    std::fs::write(&path, [0xff, 0xfe, 0x00, 0x5b]).unwrap();

    let err = Session::new().load_path(&path).unwrap_err();
    assert!(matches!(err, ChatscopeError::Utf8 { .. }));
}

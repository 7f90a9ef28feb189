//! Tests for the export writers and the JSON analysis report.

#![cfg(all(feature = "csv-output", feature = "json-output"))]

use chatscope::core::output::{
    AnalysisReport, OutputConfig, to_csv, to_json, to_jsonl, write_csv, write_json, write_jsonl,
};
use chatscope::format::{OutputFormat, render_view};
use chatscope::media::MediaRef;
use chatscope::session::Session;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

const TRANSCRIPT: &str = "\
[19/10/2020, 18:15] Alice: Are you coming?
[19/10/2020, 18:16] Bob: Yes; on my \"way\".
second line
[19/10/2020, 18:20] Bob: <Media omitted>
";

fn session() -> Session {
    let mut session = Session::new();
    session.load_str(TRANSCRIPT);
    session
}

// ============================================================================
// CSV
// ============================================================================

#[test]
fn test_csv_minimal_columns() {
    let session = session();
    let csv = to_csv(&session.view(), &OutputConfig::new()).unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_reader(csv.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), ["Sender", "Body"]);

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[1][1], "Yes; on my \"way\".\nsecond line");
}

#[test]
fn test_csv_all_columns() {
    let mut session = session();
    session
        .attach_media_ref("MSG-00003", MediaRef::new("IMG-1.jpg", "file:///IMG-1.jpg"))
        .unwrap();
    let csv = to_csv(&session.view(), &OutputConfig::all()).unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_reader(csv.as_bytes());
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        ["ID", "Timestamp", "Sender", "Body", "Media", "Question", "MediaRef"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(&rows[0][0], "MSG-00001");
    assert_eq!(&rows[0][1], "2020-10-19 18:15:00");
    assert_eq!(&rows[0][5], "true");
    assert_eq!(&rows[2][4], "true");
    assert_eq!(&rows[2][6], "file:///IMG-1.jpg");
    assert_eq!(&rows[1][6], "");
}

#[test]
fn test_csv_empty_view_has_header_only() {
    let csv = to_csv(&[], &OutputConfig::new().with_ids()).unwrap();
    assert_eq!(csv.trim_end(), "ID;Sender;Body");
}

// ============================================================================
// JSON / JSONL
// ============================================================================

#[test]
fn test_json_array_omits_disabled_fields() {
    let session = session();
    let json = to_json(&session.view(), &OutputConfig::new().with_timestamps()).unwrap();
    let parsed: Value = serde_json::from_str(&json).unwrap();

    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["sender"], "Alice");
    assert_eq!(items[0]["timestamp"], "2020-10-19 18:15:00");
    assert!(items[0].get("id").is_none());
    assert!(items[0].get("is_media").is_none());
}

#[test]
fn test_json_flags() {
    let session = session();
    let json = to_json(&session.view(), &OutputConfig::new().with_flags()).unwrap();
    let parsed: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed[0]["is_question"], true);
    assert_eq!(parsed[2]["is_media"], true);
    assert!(parsed[2].get("media_uri").is_none());
}

#[test]
fn test_jsonl_one_object_per_line() {
    let session = session();
    let jsonl = to_jsonl(&session.view(), &OutputConfig::all()).unwrap();

    let lines: Vec<&str> = jsonl.lines().collect();
    assert_eq!(lines.len(), 3);
    for line in &lines {
        let value: Value = serde_json::from_str(line).unwrap();
        assert!(value.is_object());
    }
    let second: Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second["id"], "MSG-00002");
    assert_eq!(second["body"], "Yes; on my \"way\".\nsecond line");
}

#[test]
fn test_writers_match_string_renderers() {
    let dir = tempdir().unwrap();
    let session = session();
    let view = session.view();
    let config = OutputConfig::all();

    let csv_path = dir.path().join("out.csv");
    let json_path = dir.path().join("out.json");
    let jsonl_path = dir.path().join("out.jsonl");

    write_csv(&view, csv_path.to_str().unwrap(), &config).unwrap();
    write_json(&view, json_path.to_str().unwrap(), &config).unwrap();
    write_jsonl(&view, jsonl_path.to_str().unwrap(), &config).unwrap();

    assert_eq!(fs::read_to_string(&csv_path).unwrap(), to_csv(&view, &config).unwrap());
    assert_eq!(fs::read_to_string(&json_path).unwrap(), to_json(&view, &config).unwrap());
    assert_eq!(fs::read_to_string(&jsonl_path).unwrap(), to_jsonl(&view, &config).unwrap());
}

#[test]
fn test_render_view_dispatch() {
    let session = session();
    let view = session.view();
    let config = OutputConfig::new();

    for format in OutputFormat::all() {
        let text = render_view(&view, *format, &config).unwrap();
        assert!(text.contains("Alice"), "{format}");
    }
}

// ============================================================================
// Analysis report
// ============================================================================

#[test]
fn test_report_json() {
    let mut session = Session::new();
    session.load_str(
        "\
[19/10/2020, 18:15] Alice: Are you coming? evidence
[19/10/2020, 18:16] Bob: Yes, evidence here.
[31/02/2020, 18:17] Bob: broken
",
    );

    let report = AnalysisReport::from_session(&session, 5);
    let parsed: Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(parsed["stats"]["total_messages"], 2);
    assert_eq!(parsed["participants"][0]["name"], "Alice");
    assert_eq!(parsed["question_count"], 1);
    assert_eq!(parsed["question_response_rate"], 100.0);
    assert_eq!(parsed["top_words"][0]["word"], "evidence");
    assert_eq!(parsed["top_words"][0]["count"], 2);
    assert_eq!(parsed["skipped"][0]["date"], "31/02/2020");

    let dir = tempdir().unwrap();
    let path = dir.path().join("report.json");
    report.write_json(path.to_str().unwrap()).unwrap();
    let back: AnalysisReport = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back, report);
}

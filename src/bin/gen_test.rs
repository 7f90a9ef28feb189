//! Synthetic transcript generator for stress testing chatscope.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [messages] [output] [dmy|mdy]
//! Example: cargo run --features gen-test --bin gen_test -- 100000 heavy_chat.txt

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;
use rand::seq::SliceRandom;

const SENDERS: &[&str] = &[
    "Alice",
    "Bob",
    "Иван",
    "Мария",
    "村上",
    "محمد",
    "User;With;Semicolons",
    "User\"With\"Quotes",
    "🔥FireUser🔥",
    "+1 (555) 010-4477",
];

const OPENERS: &[&str] = &[
    "what", "where", "when", "why", "how", "who", "did", "do", "can", "is", "are", "will",
];

const WORDS: &[&str] = &[
    "meeting", "tomorrow", "evidence", "dinner", "office", "receipt", "train", "photo",
    "contract", "weekend", "deadline", "coffee", "parcel", "invoice", "screenshot", "call",
    "the", "a", "and", "to", "of", "in", "it", "that", "was", "for", "on", "with",
];

const EMOJIS: &[&str] = &["😀", "😂", "🤔", "🙄", "🔥", "👍", "❤️", "💔", "🏳️‍🌈", "👨‍👩‍👧‍👦"];

const MEDIA: &[&str] = &[
    "<Media omitted>",
    "image omitted",
    "video omitted",
    "audio omitted",
    "IMG-20240101-WA0001.jpg (file attached)",
];

const AFFECTION: &[&str] = &["I love you", "love u", "❤", "<3"];

fn main() {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map_or("heavy_chat.txt", String::as_str);
    let us_dates = matches!(args.get(3).map(String::as_str), Some("mdy" | "us"));

    println!("🧪 Transcript Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {count}");
    println!("   Output:   {output}");
    println!("   Dates:    {}", if us_dates { "M/D/Y" } else { "D/M/Y" });
    println!();

    if let Err(e) = write_transcript(count, output, us_dates) {
        eprintln!("❌ Error: {e}");
        std::process::exit(1);
    }
}

fn write_transcript(count: usize, output: &str, us_dates: bool) -> io::Result<()> {
    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);

    let mut rng = rand::thread_rng();
    let start = Instant::now();
    let mut bytes_written: usize = 0;
    let mut at = NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .ok_or_else(|| io::Error::other("invalid start date"))?;

    // Exports from some devices carry a BOM.
    writer.write_all("\u{feff}".as_bytes())?;

    for i in 0..count {
        at += Duration::seconds(rng.gen_range(5..3_600));

        let sender = SENDERS.choose(&mut rng).copied().unwrap_or("Alice");
        let body = random_body(&mut rng);
        let marker = if i % 5_000 == 2_500 {
            // An impossible date, to exercise the skip path.
            String::from("[31/02/2023, 12:00]")
        } else {
            format_marker(at, us_dates, i % 3 == 0)
        };

        let entry = format!("{marker} {sender}: {body}\n");
        bytes_written += entry.len();
        writer.write_all(entry.as_bytes())?;

        if (i + 1) % 10_000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)",
                i + 1,
                count,
                bytes_written as f64 / 1_000_000.0,
                (i + 1) as f64 / elapsed
            );
        }
    }

    writer.flush()?;

    let elapsed = start.elapsed();
    println!("\n\n✅ Done!");
    println!("   Size:  {:.2} MB", bytes_written as f64 / 1_000_000.0);
    println!("   Time:  {:.2}s", elapsed.as_secs_f64());
    println!("   Speed: {:.0} msg/s", count as f64 / elapsed.as_secs_f64());
    Ok(())
}

/// `[D/M/YYYY, H:MM:SS]`, optionally with a 12-hour clock.
fn format_marker(at: NaiveDateTime, us_dates: bool, twelve_hour: bool) -> String {
    let date = if us_dates {
        at.format("%-m/%-d/%Y")
    } else {
        at.format("%-d/%-m/%Y")
    };
    let time = if twelve_hour {
        at.format("%-I:%M:%S %p")
    } else {
        at.format("%H:%M:%S")
    };
    format!("[{date}, {time}]")
}

fn random_body(rng: &mut impl Rng) -> String {
    match rng.gen_range(0..10) {
        0 => MEDIA.choose(rng).copied().unwrap_or("<Media omitted>").to_string(),
        1 => AFFECTION.choose(rng).copied().unwrap_or("<3").to_string(),
        2 | 3 => {
            let opener = OPENERS.choose(rng).copied().unwrap_or("what");
            let question_mark = if rng.gen_bool(0.5) { "?" } else { "" };
            format!("{opener} {}{question_mark}", random_words(rng, 6))
        }
        4 => {
            // Continuation lines belong to the same entry.
            format!("{}\n{}\n{}", random_words(rng, 5), random_words(rng, 8), random_words(rng, 3))
        }
        5 => format!(
            "see https://example.com/{}?id={} {}",
            random_words(rng, 1),
            rng.gen_range(1..10_000),
            EMOJIS.choose(rng).copied().unwrap_or("👍")
        ),
        _ => random_words(rng, 12),
    }
}

fn random_words(rng: &mut impl Rng, max: usize) -> String {
    let len = rng.gen_range(1..=max);
    (0..len)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}

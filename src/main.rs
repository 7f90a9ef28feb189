//! # chatscope CLI
//!
//! Command-line interface for the chatscope library.

use std::fs;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatscope::ChatscopeError;
use chatscope::cli::Args;
use chatscope::config::SessionConfig;
use chatscope::core::filter::{Category, FilterConfig};
use chatscope::core::output::{AnalysisReport, OutputConfig};
use chatscope::format::export_view;
use chatscope::session::Session;

fn main() {
    let args = <Args as ClapParser>::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ChatscopeError> {
    let total_start = Instant::now();
    let format = args.resolved_format()?;
    let config = session_config(args)?;

    println!("🔎 chatscope v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", args.output);
    println!("📄 Format:  {format}");
    println!("📅 Dates:   {}", config.parser.date_order);

    let mut session = Session::with_config(config);

    // Step 1: Parse
    println!();
    println!("⏳ Parsing transcript...");
    let parse_start = Instant::now();
    let report = session.load_path(&args.input)?;
    println!(
        "   Found {} messages ({:.2}s)",
        report.parsed,
        parse_start.elapsed().as_secs_f64()
    );
    if !report.skipped.is_empty() {
        println!(
            "⚠️  Skipped {} entries with unreadable timestamps",
            report.skipped.len()
        );
        for entry in report.skipped.iter().take(5) {
            println!("   #{} {} {} ({})", entry.index, entry.date, entry.time, entry.reason);
        }
    }

    // Step 2: Filter
    if let Some(ref sender) = args.from {
        println!("👤 From:    {sender}");
        session.filter_by_sender(sender.clone());
    } else {
        let mut filter = FilterConfig::new().with_category(args.category);
        if let Some(ref term) = args.search {
            println!("🔍 Search:  {term}");
            filter = filter.with_search(term.clone());
        }
        if args.category != Category::All {
            println!("🏷️  Category: {}", args.category);
        }
        session.set_filter(filter);
    }

    let view_len = session.view().len();

    // Step 3: Page
    if let Some(number) = args.page {
        session.set_page(number);
    }
    let exported = match args.page {
        Some(_) => {
            let page = session.current_page();
            println!(
                "📑 Page {} of {} ({} of {} messages)",
                page.number,
                page.count,
                page.items.len(),
                page.total
            );
            page.items
        }
        None => session.view(),
    };

    // Step 4: Write
    let mut output_config = OutputConfig::new();
    if args.timestamps {
        output_config = output_config.with_timestamps();
    }
    if args.ids {
        output_config = output_config.with_ids();
    }
    if args.flags {
        output_config = output_config.with_flags();
    }

    println!("💾 Writing {format}...");
    let write_start = Instant::now();
    export_view(&exported, &args.output, format, &output_config)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    if let Some(ref path) = args.report {
        AnalysisReport::from_session(&session, args.top).write_json(path)?;
        println!("🧾 Report saved to {path}");
    }

    println!();
    println!("✅ Done! Output saved to {}", args.output);

    print_summary(&session, view_len, exported.len(), args.top);

    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

/// Config file first, then command-line overrides.
fn session_config(args: &Args) -> Result<SessionConfig, ChatscopeError> {
    let mut config = match args.config {
        Some(ref path) => SessionConfig::from_toml_str(&fs::read_to_string(path)?)?,
        None => SessionConfig::new(),
    };
    if let Some(order) = args.date_order {
        config.parser = config.parser.with_date_order(order);
    }
    if let Some(size) = args.page_size {
        config = config.with_page_size(size);
    }
    Ok(config)
}

fn print_summary(session: &Session, view_len: usize, exported: usize, top: usize) {
    let stats = session.stats();
    let metrics = session.metrics();

    println!();
    println!("📊 Summary:");
    println!("   Messages:   {}", stats.total_messages);
    println!("   In view:    {view_len}");
    println!("   Exported:   {exported}");
    println!("   Words:      {}", stats.total_words);
    println!("   Media:      {}", stats.media_count);
    if let (Some(first), Some(last)) = (stats.first_instant, stats.last_instant) {
        println!(
            "   Span:       {} → {} ({} days)",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d"),
            stats.active_days
        );
    }

    println!();
    println!("👥 Participants:");
    for participant in session.participants() {
        println!(
            "   {:<20} {:>6} messages {:>8} words",
            participant.name, participant.message_count, participant.word_count
        );
    }

    println!();
    println!(
        "❓ Questions:  {} ({} answered, {:.1}% response rate)",
        metrics.question_count,
        metrics.answered_question_count,
        metrics.question_response_rate
    );
    println!("💬 Affection:  {}", metrics.affection_expression_count);

    let words = metrics.top_words(top);
    if !words.is_empty() {
        println!();
        println!("🔤 Top words ({} distinct):", metrics.vocabulary_size());
        for (word, count) in words {
            println!("   {word:<20} {count:>6}");
        }
    }
}

//! Command-line interface definition using clap.
//!
//! [`Args`] drives the `chatscope` binary: load one transcript, optionally
//! narrow it with a search/category or sender filter, export the resulting
//! view and print a summary of the derived statistics.

use std::path::PathBuf;

use clap::Parser;

use crate::config::DateOrder;
use crate::core::filter::Category;
use crate::format::OutputFormat;

/// Parse exported chat transcripts (.txt or .zip) into structured messages
/// with participant statistics, question response rate and word frequency.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatscope")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatscope chat.txt
    chatscope export.zip -o messages.json
    chatscope chat.txt --search evidence --category questions
    chatscope chat.txt --from Alice -f jsonl --page 2 --page-size 100
    chatscope chat.txt --report report.json --top 25
    chatscope us_chat.txt --date-order mdy")]
pub struct Args {
    /// Path to the transcript (.txt) or export archive (.zip)
    pub input: PathBuf,

    /// Path to output file
    #[arg(short, long, default_value = "messages.csv")]
    pub output: String,

    /// Output format (defaults to the output file's extension)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Keep messages whose body, sender or id contains this text
    /// (case-insensitive)
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Keep messages of one category: all, questions, phrases, media
    #[arg(short, long, value_name = "CATEGORY", default_value = "all")]
    pub category: Category,

    /// Keep messages from one sender (replaces --search/--category)
    #[arg(long, value_name = "SENDER")]
    pub from: Option<String>,

    /// Export only this page of the view (1-based)
    #[arg(long, value_name = "N")]
    pub page: Option<usize>,

    /// Messages per page (default: 50, or the config file's value)
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Number of most frequent words to show
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub top: usize,

    /// TOML file with session settings (lexicon, parser, page size)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Date field order of the entry markers: dmy or mdy
    #[arg(long, value_name = "ORDER")]
    pub date_order: Option<DateOrder>,

    /// Write the JSON analysis report to this path
    #[arg(long, value_name = "FILE")]
    pub report: Option<String>,

    /// Include timestamps in output
    #[arg(short = 't', long)]
    pub timestamps: bool,

    /// Include message IDs in output
    #[arg(long)]
    pub ids: bool,

    /// Include media/question flags and media references in output
    #[arg(long)]
    pub flags: bool,

    /// Log parser diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// The explicit format, or the one implied by the output extension.
    pub fn resolved_format(&self) -> crate::Result<OutputFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => OutputFormat::from_path(std::path::Path::new(&self.output)),
        }
    }
}

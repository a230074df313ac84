// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Only the seed URL is required. Everything else has a sensible default:
//   title-crawler https://example.com --max-pages 20 --json
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] generates the argument parser
// - Doc comments (///) on fields become the --help text
// =============================================================================

use clap::Parser;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "title-crawler",
    version = "0.1.0",
    about = "Crawl one website breadth-first and collect page titles",
    long_about = "title-crawler starts from a seed URL, follows links on the same domain in \
                  breadth-first order, respects robots.txt, and prints the <title> of every \
                  HTML page it visits."
)]
pub struct Cli {
    /// URL to start crawling from (e.g., https://example.com/)
    ///
    /// Only pages on exactly this host are crawled
    pub seed_url: String,

    /// Maximum number of pages to collect titles from
    #[arg(long, default_value_t = crate::config::DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Output results in JSON format instead of a table
    #[arg(long)]
    pub json: bool,

    /// Pause between two requests, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Override the User-Agent header (also used for robots.txt matching)
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

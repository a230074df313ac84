// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (progress goes to stderr)
// 3. Build the crawl config and the HTTP client
// 4. Run the crawl and print the collected titles
// 5. Exit with proper code (0 = crawl finished, 2 = error)
//
// Rust concepts used:
// - async/await: Network requests and the politeness delay
// - Result<T, E>: For error handling
// =============================================================================

mod cli;
mod config;
mod crawl;
mod fetch;
mod robots;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::CrawlConfig;
use crawl::{CrawlReport, Crawler};
use fetch::HttpTransport;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let mut config = CrawlConfig::new(&cli.seed_url, cli.max_pages)?
        .with_delay(Duration::from_millis(cli.delay_ms))
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(user_agent) = cli.user_agent {
        config = config.with_user_agent(user_agent);
    }

    // One client for the whole run: pages and robots.txt share its headers
    let transport = HttpTransport::new(&config.user_agent, config.timeout)?;

    let report = Crawler::new(config, &transport).run().await;

    print_report(&report, cli.json)?;
    Ok(0)
}

// Logs go to stderr so --json output on stdout stays machine-readable.
// RUST_LOG wins over -v when it is set.
fn init_logging(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))
}

fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print_table(report);
    }
    Ok(())
}

// Prints results as a human-readable table in visit order
fn print_table(report: &CrawlReport) {
    println!("{:<60} {}", "URL", "TITLE");
    println!("{}", "=".repeat(100));

    for page in &report.pages {
        // Truncate on a char boundary; titles and URLs may be non-ASCII
        let url_display = if page.url.chars().count() > 57 {
            format!("{}...", page.url.chars().take(57).collect::<String>())
        } else {
            page.url.clone()
        };
        println!("{:<60} {}", url_display, page.title);
    }

    println!();

    let stats = &report.stats;
    println!("📊 Summary ({:?}):", report.state);
    println!("   📄 Pages: {}", report.pages.len());
    println!(
        "   ⏭️  Skipped: {} extension, {} robots.txt, {} status, {} content-type",
        stats.skipped_extension, stats.skipped_robots, stats.skipped_status, stats.skipped_content_type
    );
    println!(
        "   ❌ Failed: {} request, {} other",
        stats.failed_transport, stats.failed_other
    );
    println!("   📋 Still queued: {}", report.pending.len());
}

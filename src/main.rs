//! Eventscan main entry point
//!
//! Command-line interface for the event-listing discovery crawler.

use clap::Parser;
use eventscan::config::{load_config, Config};
use eventscan::crawler::run_scan;
use eventscan::output::{print_summary, summarize};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Eventscan: a polite event-listing discovery crawler
///
/// Eventscan walks a configured set of organization websites, mines their
/// pages for event listings, and reports a deduplicated, date-ordered
/// collection of events.
#[derive(Parser, Debug)]
#[command(name = "eventscan")]
#[command(version)]
#[command(about = "Discovers event listings across organization websites", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the configured maximum crawl depth
    #[arg(long, value_name = "DEPTH")]
    max_depth: Option<u32>,

    /// Validate config and show what would be scanned without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = load_config(&cli.config)?;

    if let Some(depth) = cli.max_depth {
        config.crawler.max_depth = depth;
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let outcome = run_scan(config).await?;
    let summary = summarize(&outcome.records, outcome.pages_visited, outcome.elapsed);
    print_summary(&summary, &outcome.records);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("eventscan=info,warn"),
            1 => EnvFilter::new("eventscan=debug,info"),
            2 => EnvFilter::new("eventscan=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the planned scan
fn handle_dry_run(config: &Config) {
    println!("=== Eventscan Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Fetch delay: {}ms", config.crawler.fetch_delay_ms);
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);
    println!("  Page budget: {}", config.crawler.page_budget);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nSites ({}):", config.sites.len());
    for site in &config.sites {
        match config.trusts.iter().find(|t| t.url == *site) {
            Some(trust) => println!("  - {} ({}, {})", site, trust.abbrev, trust.name),
            None => println!("  - {} (no trust metadata)", site),
        }
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would scan {} sites", config.sites.len());
}

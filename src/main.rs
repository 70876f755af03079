//! Sitecomb command-line entry point

use clap::Parser;
use sitecomb::config::{load_config, validate, Config};
use sitecomb::events::{LogSink, ProgressSink};
use sitecomb::{CancelToken, CrawlSession, Crawler, ProgressEvent};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Sitecomb: a same-site contact harvester
///
/// Crawls a single website breadth-first from the seed URL and reports
/// every distinct phone number and named contact found, each exactly
/// once.
#[derive(Parser, Debug)]
#[command(name = "sitecomb")]
#[command(version)]
#[command(about = "A same-site contact harvester", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum pages to fetch (overrides config)
    #[arg(long)]
    max_pages: Option<u32>,

    /// Maximum hop-distance from the seed (overrides config)
    #[arg(long)]
    max_level: Option<u32>,

    /// Delay between page fetches in milliseconds (overrides config)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Print progress events as JSON lines instead of log messages
    #[arg(long)]
    json_events: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Prints each event as one JSON object per line on stdout
struct JsonLinesSink;

impl ProgressSink for JsonLinesSink {
    fn emit(&self, event: ProgressEvent) {
        if let Ok(line) = serde_json::to_string(&event) {
            println!("{}", line);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    // CLI overrides take precedence over the config file
    if cli.max_pages.is_some() {
        config.crawler.max_pages = cli.max_pages;
    }
    if cli.max_level.is_some() {
        config.crawler.max_level = cli.max_level;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.request_delay_ms = delay_ms;
    }
    validate(&config)?;

    let cancel = CancelToken::new();
    spawn_ctrl_c_handler(cancel.clone());

    let sink: Arc<dyn ProgressSink> = if cli.json_events {
        Arc::new(JsonLinesSink)
    } else {
        Arc::new(LogSink)
    };

    let crawler = Crawler::new(config, sink, cancel.clone())?;
    let session = crawler.run(&cli.seed).await?;

    if cancel.is_cancelled() {
        tracing::warn!("Interrupted; printing partial results");
    }
    print_summary(&session);

    Ok(())
}

/// Sets Ctrl-C to request cooperative cancellation
fn spawn_ctrl_c_handler(cancel: CancelToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, finishing current page...");
            cancel.cancel();
        }
    });
}

/// Sets up the tracing subscriber based on verbosity flags
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitecomb=info,warn"),
            1 => EnvFilter::new("sitecomb=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Prints the session outcome to stdout
fn print_summary(session: &CrawlSession) {
    println!();
    println!("==================================================");
    if let Some(title) = &session.site_title {
        println!("Site: {}", title);
    }
    println!("Seed: {}", session.seed);
    println!("Pages fetched: {}", session.page_count);
    println!(
        "Unique phones: {}, unique contacts: {}",
        session.total_phones(),
        session.total_contacts()
    );
    println!("==================================================");

    for (i, result) in session.page_results.iter().take(10).enumerate() {
        println!();
        println!("{}. {}", i + 1, result.title);
        println!("   URL: {}", result.url);
        if !result.new_phones.is_empty() {
            println!("   Phones: {}", result.new_phones.join("; "));
        }
        if !result.new_contacts.is_empty() {
            println!("   Contacts: {}", result.new_contacts.join("; "));
        }
    }

    if session.page_results.len() > 10 {
        println!();
        println!("... and {} more pages with findings", session.page_results.len() - 10);
    }
}

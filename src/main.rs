use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use feedpeek::feed::{self, DEFAULT_FEED_URL};

#[derive(Parser)]
#[command(name = "feedpeek")]
#[command(about = "Browse an RSS feed in the terminal", long_about = None)]
struct Cli {
    /// Feed to fetch
    #[arg(long, default_value = DEFAULT_FEED_URL)]
    feed_url: String,

    /// Write logs here (the terminal is taken by the UI)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let feed = feed::fetch_feed(&cli.feed_url).with_context(|| format!("load {}", cli.feed_url))?;
    tracing::info!(title = %feed.title, items = feed.items.len(), "feed loaded");

    feedpeek::tui::run(&feed)
}

fn init_file_logging(path: &PathBuf) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

//! Playlist-Ripple main entry point
//!
//! This is the command-line interface for the Playlist-Ripple playlist walker.

use anyhow::{bail, Context};
use clap::Parser;
use playlist_ripple::config::{load_config_with_hash, Config};
use playlist_ripple::crawler::PlaylistCrawler;
use playlist_ripple::output::{export_seed, print_statistics, write_csv};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Playlist-Ripple: save every video of a playlist into a CSV file
///
/// The playlist page is read once, then every continuation page is followed
/// until the full list has been collected.
#[derive(Parser, Debug)]
#[command(name = "playlist-ripple")]
#[command(version)]
#[command(about = "Save all videos from a playlist into a CSV file", long_about = None)]
struct Cli {
    /// The playlist URL (e.g. https://www.youtube.com/playlist?list=...)
    #[arg(value_name = "PLAYLIST_URL", required_unless_present = "seed_from")]
    playlist_url: Option<String>,

    /// Output CSV path (defaults to ./playlist.csv)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print crawl statistics after saving
    #[arg(long)]
    stats: bool,

    /// Convert an existing playlist CSV into SQL seed data and exit
    #[arg(long, value_name = "CSV", conflicts_with = "playlist_url")]
    seed_from: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(cli.config.as_deref())?;

    if let Some(csv_path) = &cli.seed_from {
        return handle_seed_export(&config, csv_path);
    }

    let playlist_url = cli
        .playlist_url
        .as_deref()
        .context("A playlist URL is required")?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.csv_path));

    handle_crawl(config, playlist_url, &output, cli.stats).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("playlist_ripple=info,warn"),
            1 => EnvFilter::new("playlist_ripple=debug,info"),
            2 => EnvFilter::new("playlist_ripple=trace,debug"),
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

/// Loads the configuration file if one was given, else the built-in defaults
fn load_configuration(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: Config,
    playlist_url: &str,
    output: &Path,
    show_stats: bool,
) -> anyhow::Result<()> {
    let crawler = PlaylistCrawler::new(config, playlist_url)?;

    let outcome = match crawler.run().await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if outcome.entries.is_empty() {
        bail!("No videos were found in the provided playlist.");
    }

    write_csv(&outcome.entries, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "Saved {} entries to {}",
        outcome.entries.len(),
        output.display()
    );

    if show_stats {
        println!();
        print_statistics(&outcome.stats);
    }

    Ok(())
}

/// Handles the --seed-from mode: CSV to SQL seed data
fn handle_seed_export(config: &Config, csv_path: &Path) -> anyhow::Result<()> {
    let sql_path = PathBuf::from(&config.output.seed_sql_path);
    let json_path = PathBuf::from(&config.output.seed_json_path);

    let report = export_seed(csv_path, &sql_path, &json_path)
        .with_context(|| format!("Failed to export seed data from {}", csv_path.display()))?;

    if report.unresolved > 0 {
        println!("Skipped {} rows without a video id", report.unresolved);
    }
    if report.duplicates > 0 {
        println!("Removed {} duplicate video ids", report.duplicates);
    }
    println!(
        "Wrote {} of {} rows to {} and {}",
        report.records_written,
        report.rows_read,
        sql_path.display(),
        json_path.display()
    );

    Ok(())
}

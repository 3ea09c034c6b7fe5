//! pet-crossref main entry point
//!
//! This is the command-line interface for the pet listing cross-referencer.

use clap::Parser;
use pet_crossref::config::{default_config, load_config_with_hash, Config, OutputFormat};
use pet_crossref::crawler::{crawl, SourceDescriptor};
use pet_crossref::output::write_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// pet-crossref: find pets missing from some rescue listing sites
///
/// Fetches every configured listing page concurrently, extracts the pet ids
/// on each, and writes a table of which site lists which pet, least-listed
/// pets first.
#[derive(Parser, Debug)]
#[command(name = "pet-crossref")]
#[command(version)]
#[command(about = "Cross-reference pet adoption listings across sites", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in source list when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write the report to this file (or into this directory) instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Report format (overrides the configuration)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be fetched without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("Using built-in source list");
            default_config()?
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_crawl(&config, cli.output, cli.format).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so the report can be piped from stdout.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pet_crossref=info,warn"),
            1 => EnvFilter::new("pet_crossref=debug,info"),
            2 => EnvFilter::new("pet_crossref=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows every page that would be fetched
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== pet-crossref Dry Run ===\n");

    println!("HTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);

    println!("\nOutput:");
    println!(
        "  Path: {}",
        config.output.path.as_deref().unwrap_or("<stdout>")
    );
    println!("  Format: {:?}", config.output.format);

    let sources = SourceDescriptor::from_config(config)?;
    println!("\nSource pages ({}):", sources.len());
    for source in &sources {
        println!("  - [{}] {}", source.extractor.kind(), source.url());
        for (name, value) in &source.headers {
            println!("      {}: {}", name, value);
        }
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main run: crawl, merge, write the report
async fn handle_crawl(
    config: &Config,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = crawl(config).await?;

    tracing::info!(
        "{} pets, {} missing from at least one site",
        report.pets.len(),
        report.incomplete_count()
    );

    let path = output.or_else(|| config.output.path.as_ref().map(PathBuf::from));
    let format = format.unwrap_or(config.output.format);

    if let Err(e) = write_report(&report, format, path.as_deref()) {
        tracing::error!("Failed to write report: {}", e);
        return Err(e.into());
    }

    Ok(())
}

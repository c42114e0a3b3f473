//! Herald main entry point
//!
//! This is the command-line interface for the Herald URL indexing submitter.

use anyhow::Context;
use clap::Parser;
use herald::config::load_config_with_hash;
use herald::report::print_summary;
use herald::submit::run_batch;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Exit code reported when the run ended with the credential pool
/// exhausted and URLs left unsubmitted
const EXIT_POOL_EXHAUSTED: i32 = 2;

/// Herald: a credential-rotating URL indexing submitter
///
/// Herald probes each input URL, derives the indexing action from its HTTP
/// status, and submits update/delete notifications to the configured
/// indexing API, rotating through credentials as their quotas are spent.
#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(version = "1.0.0")]
#[command(about = "A credential-rotating URL indexing submitter", long_about = None)]
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

    /// Validate config and show what would be submitted without touching
    /// the network
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) =
        load_config_with_hash(&cli.config).context("Failed to load configuration")?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config)?;
        return Ok(());
    }

    handle_run(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("herald=info,warn"),
            1 => EnvFilter::new("herald=debug,info"),
            2 => EnvFilter::new("herald=trace,debug"),
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

/// Handles the --dry-run mode: validates the full setup and shows the run
/// plan without making any network request
fn handle_dry_run(config: &herald::config::Config) -> anyhow::Result<()> {
    println!("=== Herald Dry Run ===\n");

    println!("Submission:");
    println!("  Endpoint: {}", config.submission.endpoint);
    println!(
        "  Per-credential quota: {}",
        config.submission.per_credential_quota
    );
    println!("  Timeout: {}s", config.submission.timeout_secs);

    println!("\nProbe:");
    println!("  User agent: {}", config.probe.user_agent);
    println!("  Timeout: {}s", config.probe.timeout_secs);

    println!("\nReport:");
    println!("  Output directory: {}", config.report.output_dir);

    println!("\nCredentials ({}):", config.credential.len());
    let credentials = herald::pool::load_credentials(
        &config.credential,
        config.submission.per_credential_quota,
    )
    .context("Failed to resolve credential key files")?;
    for credential in &credentials {
        println!(
            "  - {} (quota: {})",
            credential.identifier(),
            credential.quota_remaining()
        );
    }

    let entries = herald::input::read_entries(Path::new(&config.input.url_file))
        .context("Failed to read input list")?;
    let hinted = entries.iter().filter(|e| e.hint.is_some()).count();

    println!("\nInput:");
    println!("  File: {}", config.input.url_file);
    println!("  URLs: {}", entries.len());
    if hinted > 0 {
        println!("  With status hints (no probe needed): {}", hinted);
    }

    let capacity =
        config.submission.per_credential_quota as usize * config.credential.len();
    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would process {} URLs with a total submission capacity of {}",
        entries.len(),
        capacity
    );

    Ok(())
}

/// Handles the main submission run
async fn handle_run(config: herald::config::Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting run: {} credentials, quota {} each",
        config.credential.len(),
        config.submission.per_credential_quota
    );

    let summary = run_batch(config).await.context("Run failed")?;

    print_summary(&summary);

    // A pool-exhaustion early termination must be distinguishable from a
    // clean completion by the caller.
    if !summary.completed_cleanly() {
        std::process::exit(EXIT_POOL_EXHAUSTED);
    }

    Ok(())
}

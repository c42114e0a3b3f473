//! Submission module for probing, classifying, and notifying
//!
//! This module contains the core submission logic, including:
//! - HTTP liveness probing of input URLs
//! - The indexing-API client and its response taxonomy
//! - The batch runner orchestrating probe, classify, submit, and account

mod client;
mod prober;
mod runner;

pub use client::{HttpSubmissionClient, IndexingApi, NotifyResult};
pub use prober::{build_probe_client, HttpProber, ProbeResult, Prober};
pub use runner::BatchRunner;

use crate::config::Config;
use crate::pool::{load_credentials, CredentialPool};
use crate::report::CsvSink;
use crate::{input, HeraldError, RunSummary};
use std::path::Path;

/// Runs a complete submission batch
///
/// This is the main entry point for a run. It will:
/// 1. Read the ordered URL list
/// 2. Resolve credential key files in declaration order
/// 3. Build the probe and submission HTTP clients
/// 4. Process every URL through the batch runner
/// 5. Leave one report record per URL in the per-domain CSV files
///
/// The returned summary distinguishes a clean completion from a run that
/// ended with the credential pool exhausted.
pub async fn run_batch(config: Config) -> Result<RunSummary, HeraldError> {
    let entries = input::read_entries(Path::new(&config.input.url_file))?;

    let credentials = load_credentials(
        &config.credential,
        config.submission.per_credential_quota,
    )?;
    let pool = CredentialPool::new(credentials);

    let prober = HttpProber::new(&config.probe)?;
    let api = HttpSubmissionClient::new(&config.submission)?;
    let sink = CsvSink::new(Path::new(&config.report.output_dir))?;

    let mut runner = BatchRunner::new(prober, api, sink, pool);
    runner.run(&entries).await
}

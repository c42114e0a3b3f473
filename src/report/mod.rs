//! Report module for the per-domain audit trail and run summaries
//!
//! This module handles:
//! - The result sink interface consumed by the batch runner
//! - Append-only per-domain CSV report files
//! - End-of-run summary counts and printing

mod csv;
mod sink;
pub mod stats;

pub use csv::CsvSink;
pub use sink::{Outcome, OutcomeKind, ReportError, ReportResult, ResultSink};
pub use stats::{print_summary, CredentialUsage, RunSummary};

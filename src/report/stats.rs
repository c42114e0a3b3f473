//! Run summary counts and printing
//!
//! Tracks the per-kind outcome totals for a run and renders the end-of-run
//! banner. The summary is also how callers distinguish a clean completion
//! from a pool-exhaustion early termination.

use crate::report::sink::{Outcome, OutcomeKind};

/// Submissions made and quota left for one credential
#[derive(Debug, Clone)]
pub struct CredentialUsage {
    /// Credential display name
    pub name: String,

    /// Accepted submissions made with this credential
    pub submissions: u32,

    /// Quota left when the run ended
    pub quota_remaining: u32,
}

/// Summary statistics for one run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Total outcome records produced (one per input URL)
    pub total: u64,

    /// Accepted submissions
    pub submitted: u64,

    /// Submissions the API rejected
    pub failed: u64,

    /// URLs whose probe status required no submission
    pub skipped: u64,

    /// URLs the probe never reached
    pub unreachable: u64,

    /// URLs never attempted because the pool ran dry
    pub unsubmitted: u64,

    /// Set when the run ended with the credential pool exhausted
    pub pool_exhausted: bool,

    /// Per-credential usage in declaration order
    pub credential_usage: Vec<CredentialUsage>,
}

impl RunSummary {
    /// Creates a new empty run summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one outcome record into the totals
    pub fn record(&mut self, outcome: &Outcome) {
        self.total += 1;
        match outcome.kind {
            OutcomeKind::Submitted => self.submitted += 1,
            OutcomeKind::SubmitFailed => self.failed += 1,
            OutcomeKind::Skipped => self.skipped += 1,
            OutcomeKind::Unreachable => self.unreachable += 1,
            OutcomeKind::Unsubmitted => self.unsubmitted += 1,
        }
    }

    /// Returns true when every URL got a real decision
    ///
    /// A run that ended early on pool exhaustion is not a clean completion
    /// even though every URL still has an outcome record.
    pub fn completed_cleanly(&self) -> bool {
        !self.pool_exhausted
    }

    /// Returns the share of submissions the API accepted, as a percentage
    pub fn submission_success_rate(&self) -> f64 {
        let attempted = self.submitted + self.failed;
        if attempted == 0 {
            return 0.0;
        }
        (self.submitted as f64 / attempted as f64) * 100.0
    }
}

/// Prints the end-of-run summary to stdout
pub fn print_summary(summary: &RunSummary) {
    println!("=== Submission Summary ===\n");

    println!("Overview:");
    println!("  Total URLs: {}", summary.total);
    println!("  Submitted: {}", summary.submitted);
    println!("  Failed: {}", summary.failed);
    println!("  Skipped: {}", summary.skipped);
    println!("  Unreachable: {}", summary.unreachable);
    println!("  Unsubmitted (pool exhausted): {}", summary.unsubmitted);
    println!();

    if !summary.credential_usage.is_empty() {
        println!("Credentials:");
        for usage in &summary.credential_usage {
            println!(
                "  {}: {} submissions, {} quota remaining",
                usage.name, usage.submissions, usage.quota_remaining
            );
        }
        println!();
    }

    let attempted = summary.submitted + summary.failed;
    if attempted > 0 {
        println!(
            "Success Rate: {:.1}% ({} / {} attempted submissions accepted)",
            summary.submission_success_rate(),
            summary.submitted,
            attempted
        );
    }

    if summary.pool_exhausted {
        println!(
            "\n⚠ Run ended early: all credentials exhausted, {} URLs unsubmitted",
            summary.unsubmitted
        );
    } else {
        println!("\n✓ Run completed");
    }
}

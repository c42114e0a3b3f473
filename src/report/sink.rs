//! Result sink trait and outcome types
//!
//! Every processed (or force-terminated) URL produces exactly one
//! [`Outcome`], appended to a [`ResultSink`] grouped by the URL's domain.
//! No URL is silently dropped: when the credential pool runs dry mid-run,
//! the remaining URLs still get a terminal `Unsubmitted` record.

use crate::classify::Action;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur while recording outcomes
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// What happened to one URL's submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    /// The indexing API accepted the notification
    Submitted,

    /// The submission was attempted but the API rejected it
    SubmitFailed,

    /// Probe status required no submission (1xx/3xx/5xx)
    Skipped,

    /// The probe never reached the URL
    Unreachable,

    /// Never attempted: the credential pool was exhausted first
    Unsubmitted,
}

impl OutcomeKind {
    /// Returns true if the indexing API accepted the submission
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Submitted)
    }

    /// Returns true if no submission was attempted for this URL
    pub fn is_no_submit(&self) -> bool {
        matches!(self, Self::Skipped | Self::Unreachable | Self::Unsubmitted)
    }
}

/// The durable, per-URL record of what was attempted and what happened
///
/// Immutable once produced; outcomes are never mutated or retried.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The URL this record concerns
    pub url: String,

    /// Lowercased host component, used to group report rows
    pub domain: String,

    /// Probe status (0 when no probe reached the server or none was made)
    pub http_status: u16,

    /// The action derived for this URL; absent for URLs force-terminated
    /// before any probe or hint was consulted
    pub action: Option<Action>,

    /// What happened to the submission
    pub kind: OutcomeKind,

    /// Failure detail, when there is one
    pub error_detail: Option<String>,

    /// Credential the submission was attempted with, when one was
    pub credential: Option<String>,

    /// When the record was produced
    pub timestamp: DateTime<Utc>,
}

impl Outcome {
    /// The status label written to the report's `Status` column
    ///
    /// Successful submissions carry their action token; the remaining
    /// labels match the vocabulary the CSV input variant accepts back.
    pub fn status_label(&self) -> &'static str {
        match (self.kind, self.action) {
            (OutcomeKind::Submitted, Some(action)) => action.as_report_str(),
            (OutcomeKind::Submitted, None) => "SUBMITTED",
            (OutcomeKind::SubmitFailed, _) => "API_ERROR",
            (OutcomeKind::Skipped, _) => "URL_SKIPPED",
            (OutcomeKind::Unreachable, _) => "UNREACHABLE",
            (OutcomeKind::Unsubmitted, _) => "UNSUBMITTED",
        }
    }
}

/// Trait for result sinks
///
/// Sinks receive one record per input URL, in processing order, and group
/// them by domain for downstream reporting.
pub trait ResultSink {
    /// Appends one outcome record
    fn record(&mut self, outcome: &Outcome) -> ReportResult<()>;

    /// Flushes any buffered state; called once after the last record
    fn finalize(&mut self) -> ReportResult<()>;
}

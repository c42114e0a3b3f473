//! Batch runner - main submission orchestration logic
//!
//! This module contains the single pass over the input list that ties the
//! other components together:
//! - Probing each URL (or consuming its status hint)
//! - Classifying the observed status into an action
//! - Submitting update/delete notifications under quota accounting
//! - Rotating credentials on exhaustion or rejection
//! - Recording exactly one outcome per input URL
//!
//! URLs are processed strictly in input order on a single logical task.
//! The pool is the only quota mutator and is owned here, so no submission
//! can race the accounting.

use crate::classify::{classify, Action};
use crate::input::UrlEntry;
use crate::pool::CredentialPool;
use crate::report::{CredentialUsage, Outcome, OutcomeKind, ResultSink, RunSummary};
use crate::submit::client::{IndexingApi, NotifyResult};
use crate::submit::prober::Prober;
use crate::url::extract_domain;
use crate::HeraldError;
use chrono::Utc;
use std::collections::HashMap;
use url::Url;

/// How one submission attempt (with its single retry) ended
enum SubmitDisposition {
    /// The API accepted the notification
    Accepted { credential: String },

    /// The API rejected the submission; the URL keeps a failure record
    Rejected {
        credential: Option<String>,
        detail: String,
    },

    /// No credential had quota left; the URL was never submitted
    PoolExhausted,
}

/// Main batch orchestrator
///
/// Generic over its collaborators so the submission state machine can be
/// exercised against in-memory fakes in tests.
pub struct BatchRunner<P, A, S> {
    prober: P,
    api: A,
    sink: S,
    pool: CredentialPool,
    submissions_by_credential: HashMap<String, u32>,
}

impl<P, A, S> BatchRunner<P, A, S>
where
    P: Prober,
    A: IndexingApi,
    S: ResultSink,
{
    /// Creates a runner over the given collaborators and credential pool
    pub fn new(prober: P, api: A, sink: S, pool: CredentialPool) -> Self {
        Self {
            prober,
            api,
            sink,
            pool,
            submissions_by_credential: HashMap::new(),
        }
    }

    /// The credential pool, for end-of-run inspection
    pub fn pool(&self) -> &CredentialPool {
        &self.pool
    }

    /// Processes every entry in input order
    ///
    /// Produces exactly one outcome record per entry. When the credential
    /// pool runs dry mid-run, the remaining entries are force-terminated
    /// with `Unsubmitted` records without further probing, and the summary
    /// reports the exhaustion.
    pub async fn run(&mut self, entries: &[UrlEntry]) -> Result<RunSummary, HeraldError> {
        let mut summary = RunSummary::new();
        let total = entries.len();
        let mut exhausted = false;

        tracing::info!("Processing {} URLs", total);
        let start_time = std::time::Instant::now();

        for (idx, entry) in entries.iter().enumerate() {
            let domain =
                extract_domain(&entry.url).unwrap_or_else(|| "unknown".to_string());

            if exhausted {
                self.emit(
                    &mut summary,
                    Outcome {
                        url: entry.url.to_string(),
                        domain,
                        http_status: 0,
                        action: None,
                        kind: OutcomeKind::Unsubmitted,
                        error_detail: Some("credential pool exhausted".to_string()),
                        credential: None,
                        timestamp: Utc::now(),
                    },
                )?;
                continue;
            }

            // A status hint short-circuits the probe.
            let (http_status, action) = match entry.hint {
                Some(hint) => {
                    tracing::debug!("Using status hint for {}", entry.url);
                    (hint.http_status(), hint.action())
                }
                None => {
                    tracing::info!("[{}/{}] Probing {}", idx + 1, total, entry.url);
                    let probe = self.prober.probe(&entry.url).await;
                    (probe.http_status, classify(probe.http_status))
                }
            };

            let (kind, error_detail, credential) = match action {
                Action::Skip => {
                    tracing::info!("Status {} - skipping {}", http_status, entry.url);
                    (OutcomeKind::Skipped, None, None)
                }

                Action::Unreachable => {
                    tracing::warn!("Could not reach {}", entry.url);
                    (
                        OutcomeKind::Unreachable,
                        Some("probe failed".to_string()),
                        None,
                    )
                }

                Action::Update | Action::Delete => {
                    tracing::info!(
                        "Status {} - submitting {} for {}",
                        http_status,
                        action,
                        entry.url
                    );
                    match self.submit(&entry.url, action).await {
                        SubmitDisposition::Accepted { credential } => {
                            (OutcomeKind::Submitted, None, Some(credential))
                        }
                        SubmitDisposition::Rejected { credential, detail } => {
                            tracing::error!("Submission failed for {}: {}", entry.url, detail);
                            (OutcomeKind::SubmitFailed, Some(detail), credential)
                        }
                        SubmitDisposition::PoolExhausted => {
                            tracing::error!(
                                "Credential pool exhausted at {} ({} URLs remaining)",
                                entry.url,
                                total - idx - 1
                            );
                            exhausted = true;
                            (
                                OutcomeKind::Unsubmitted,
                                Some("credential pool exhausted".to_string()),
                                None,
                            )
                        }
                    }
                }
            };

            self.emit(
                &mut summary,
                Outcome {
                    url: entry.url.to_string(),
                    domain,
                    http_status,
                    action: Some(action),
                    kind,
                    error_detail,
                    credential,
                    timestamp: Utc::now(),
                },
            )?;
        }

        self.sink.finalize()?;

        summary.pool_exhausted = exhausted;
        summary.credential_usage = self
            .pool
            .credentials()
            .iter()
            .map(|c| CredentialUsage {
                name: c.identifier().to_string(),
                submissions: self
                    .submissions_by_credential
                    .get(c.identifier())
                    .copied()
                    .unwrap_or(0),
                quota_remaining: c.quota_remaining(),
            })
            .collect();

        tracing::info!(
            "Run finished: {} URLs in {:?} ({} submitted, {} failed, {} unsubmitted)",
            summary.total,
            start_time.elapsed(),
            summary.submitted,
            summary.failed,
            summary.unsubmitted
        );

        Ok(summary)
    }

    /// Submits one URL with the single credential-failure retry
    ///
    /// Quota is consumed only on acceptance: a rejected submission had no
    /// indexing effect, so it costs nothing. A credential-level rejection
    /// exhausts the credential and the attempt repeats once against the
    /// newly-current one; a second rejection is terminal for this URL.
    async fn submit(&mut self, url: &Url, action: Action) -> SubmitDisposition {
        let mut attempts = 0;

        loop {
            let credential = match self.pool.current() {
                Ok(credential) => credential.clone(),
                Err(_) => return SubmitDisposition::PoolExhausted,
            };
            attempts += 1;

            match self.api.notify(url, action, &credential).await {
                NotifyResult::Success => {
                    self.pool.consume(1);
                    *self
                        .submissions_by_credential
                        .entry(credential.identifier().to_string())
                        .or_insert(0) += 1;
                    return SubmitDisposition::Accepted {
                        credential: credential.identifier().to_string(),
                    };
                }

                NotifyResult::CredentialRejected(detail) => {
                    self.pool.mark_exhausted(credential.identifier());
                    if attempts >= 2 {
                        return SubmitDisposition::Rejected {
                            credential: Some(credential.identifier().to_string()),
                            detail: format!("credential rejected after rotation: {}", detail),
                        };
                    }
                    // Retry once against the next credential in order.
                }

                NotifyResult::Transient(detail) => {
                    return SubmitDisposition::Rejected {
                        credential: Some(credential.identifier().to_string()),
                        detail,
                    };
                }
            }
        }
    }

    /// Records one outcome in both the sink and the running summary
    fn emit(&mut self, summary: &mut RunSummary, outcome: Outcome) -> Result<(), HeraldError> {
        summary.record(&outcome);
        self.sink.record(&outcome)?;
        Ok(())
    }
}

//! Credential pool
//!
//! This module owns the set of credentials used against the indexing API,
//! including:
//! - Per-credential quota accounting
//! - Deterministic failover in declaration order
//! - Terminal exhaustion once the last credential is spent
//!
//! The pool is the single owner and mutator of quota counters. Credentials
//! are never revisited once exhausted, even when the remote service and the
//! local counter disagree about how much quota was left.

mod material;

pub use material::{load_credentials, CredentialError, KeyFile};

use thiserror::Error;

/// Error returned when every credential in the pool is exhausted
#[derive(Debug, Clone, Copy, Error)]
#[error("all credentials exhausted")]
pub struct PoolExhausted;

/// An authenticated identity with its own submission quota
#[derive(Debug, Clone)]
pub struct Credential {
    /// Display name, taken from the credential's config entry
    identifier: String,

    /// Opaque bearer token presented to the indexing API
    token: String,

    /// Submissions left before rotation is required
    quota_remaining: u32,

    /// Set when the quota hits zero or the remote service rejects the
    /// credential outright
    exhausted: bool,
}

impl Credential {
    /// Creates a credential with the given identity and per-run quota
    pub fn new(identifier: impl Into<String>, token: impl Into<String>, quota: u32) -> Self {
        let quota_remaining = quota;
        Self {
            identifier: identifier.into(),
            token: token.into(),
            quota_remaining,
            exhausted: quota_remaining == 0,
        }
    }

    /// The credential's display name
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The bearer token presented to the indexing API
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Submissions left before this credential rotates out
    pub fn quota_remaining(&self) -> u32 {
        self.quota_remaining
    }

    /// Returns true if this credential can no longer be used this run
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// An ordered sequence of credentials with a cursor on the active one
///
/// Declaration order is the failover order: operators list credentials in
/// the sequence they want them tried, and the pool walks that list exactly
/// once. There is no wraparound; when the cursor moves past the last
/// non-exhausted credential the pool is terminal.
#[derive(Debug)]
pub struct CredentialPool {
    credentials: Vec<Credential>,
    cursor: usize,
}

impl CredentialPool {
    /// Creates a pool from credentials in declaration order
    pub fn new(credentials: Vec<Credential>) -> Self {
        let mut pool = Self {
            credentials,
            cursor: 0,
        };
        // A leading zero-quota credential must not become current.
        pool.advance_past_exhausted();
        pool
    }

    /// Returns the active credential
    ///
    /// Fails with [`PoolExhausted`] once every credential in the pool has
    /// been spent or rejected.
    pub fn current(&self) -> Result<&Credential, PoolExhausted> {
        self.credentials
            .get(self.cursor)
            .filter(|c| !c.is_exhausted())
            .ok_or(PoolExhausted)
    }

    /// Consumes `n` units of the active credential's quota
    ///
    /// Driving the quota to zero exhausts the credential and advances the
    /// cursor to the next non-exhausted credential in declaration order.
    /// Consuming from an already-exhausted pool is a no-op.
    pub fn consume(&mut self, n: u32) {
        let Some(credential) = self
            .credentials
            .get_mut(self.cursor)
            .filter(|c| !c.is_exhausted())
        else {
            return;
        };

        credential.quota_remaining = credential.quota_remaining.saturating_sub(n);
        if credential.quota_remaining == 0 {
            credential.exhausted = true;
            tracing::info!(
                "Credential '{}' quota spent, rotating",
                credential.identifier
            );
            self.advance_past_exhausted();
        }
    }

    /// Forces a credential into the exhausted state
    ///
    /// Used when the remote API reports a quota or auth failure for the
    /// credential independent of the local counter. The cursor advances the
    /// same way as on local quota exhaustion; the credential is never
    /// returned to within this run.
    pub fn mark_exhausted(&mut self, identifier: &str) {
        if let Some(credential) = self
            .credentials
            .iter_mut()
            .find(|c| c.identifier == identifier)
        {
            if !credential.exhausted {
                credential.exhausted = true;
                tracing::warn!(
                    "Credential '{}' rejected by the remote service, rotating",
                    credential.identifier
                );
            }
        }
        self.advance_past_exhausted();
    }

    /// Returns true once no credential has quota left
    pub fn is_exhausted(&self) -> bool {
        self.current().is_err()
    }

    /// All credentials in declaration order, for end-of-run reporting
    pub fn credentials(&self) -> &[Credential] {
        &self.credentials
    }

    /// Moves the cursor forward to the next non-exhausted credential.
    /// Leaves the cursor past the end when none remains.
    fn advance_past_exhausted(&mut self) {
        while self
            .credentials
            .get(self.cursor)
            .is_some_and(|c| c.is_exhausted())
        {
            self.cursor += 1;
        }
    }
}

//! Credential material resolution
//!
//! Resolves the ordered `[[credential]]` config entries into authenticated
//! [`Credential`] objects before the run starts. Key files are small JSON
//! documents holding the account name and the bearer token for one identity.
//!
//! Declaration order is load-bearing: the order of entries in the config
//! file is the failover order the pool walks during the run.

use crate::config::CredentialEntry;
use crate::pool::Credential;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors raised while resolving credential key files
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Failed to read key file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse key file '{path}': {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Key file '{path}' has an empty token")]
    EmptyToken { path: String },
}

/// On-disk shape of a credential key file
#[derive(Debug, Deserialize)]
pub struct KeyFile {
    /// Account the token belongs to (informational, logged at startup)
    pub account: String,

    /// Bearer token presented to the indexing API
    pub token: String,
}

/// Resolves config credential entries to pool credentials, in order
///
/// Every entry must resolve; a missing or malformed key file aborts the run
/// before any submission is made. `quota` is the per-credential submission
/// limit for this run.
pub fn load_credentials(
    entries: &[CredentialEntry],
    quota: u32,
) -> Result<Vec<Credential>, CredentialError> {
    let mut credentials = Vec::with_capacity(entries.len());

    for entry in entries {
        let key = load_key_file(Path::new(&entry.key_file))?;
        tracing::info!(
            "Loaded credential '{}' (account: {})",
            entry.name,
            key.account
        );
        credentials.push(Credential::new(entry.name.clone(), key.token, quota));
    }

    Ok(credentials)
}

/// Reads and parses a single key file
fn load_key_file(path: &Path) -> Result<KeyFile, CredentialError> {
    let display = path.display().to_string();

    let content = std::fs::read_to_string(path).map_err(|source| CredentialError::Io {
        path: display.clone(),
        source,
    })?;

    let key: KeyFile =
        serde_json::from_str(&content).map_err(|source| CredentialError::Parse {
            path: display.clone(),
            source,
        })?;

    if key.token.is_empty() {
        return Err(CredentialError::EmptyToken { path: display });
    }

    Ok(key)
}

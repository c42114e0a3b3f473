//! Herald: a credential-rotating URL indexing submitter
//!
//! This crate probes the live HTTP status of each input URL, derives the
//! indexing action to take (update, delete, or neither), and submits those
//! actions to a remote indexing API while rotating through a pool of
//! credentials to stay under per-credential quotas.

pub mod classify;
pub mod config;
pub mod input;
pub mod pool;
pub mod report;
pub mod submit;
pub mod url;

use thiserror::Error;

/// Main error type for Herald operations
#[derive(Debug, Error)]
pub enum HeraldError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] input::InputError),

    #[error("Credential error: {0}")]
    Credential(#[from] pool::CredentialError),

    #[error("Report error: {0}")]
    Report(#[from] report::ReportError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Herald operations
pub type Result<T> = std::result::Result<T, HeraldError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use classify::{classify, Action};
pub use config::Config;
pub use pool::{Credential, CredentialPool, PoolExhausted};
pub use report::{Outcome, OutcomeKind, RunSummary};
pub use url::extract_domain;

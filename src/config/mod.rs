//! Configuration module for Herald
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use herald::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Per-credential quota: {}", config.submission.per_credential_quota);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CredentialEntry, InputConfig, ProbeConfig, ReportConfig, SubmissionConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

//! Input source
//!
//! Reads the ordered URL list the run processes. Two shapes are supported:
//! - a plain list, one URL per line
//! - a tabular `URL,Status` file (selected by the `.csv` extension) whose
//!   optional `Status` column carries a pre-computed hint, either a numeric
//!   HTTP status code or one of the report action tokens
//!
//! The hint vocabulary matches the report files this tool writes, so a
//! previous run's per-domain report can be fed straight back as input.
//!
//! Input order is load-bearing: entries are processed in the order they
//! appear here.

use crate::classify::{classify, Action};
use std::path::Path;
use thiserror::Error;
use url::Url;

/// Errors raised while reading the input list
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read input file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Input file '{path}' contains no valid URLs")]
    Empty { path: String },
}

/// A pre-computed status hint from the CSV input variant
///
/// A hint short-circuits the live probe: the runner derives the action from
/// it directly instead of fetching the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusHint {
    /// A numeric HTTP status code, classified through the normal table
    Code(u16),

    /// A pre-computed action token such as `URL_DELETED`
    Action(Action),
}

impl StatusHint {
    /// The action this hint resolves to
    pub fn action(&self) -> Action {
        match self {
            Self::Code(code) => classify(*code),
            Self::Action(action) => *action,
        }
    }

    /// The HTTP status recorded in the outcome for this hint
    ///
    /// Token hints carry no status code; the record keeps 0 to show no
    /// probe was made.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Code(code) => *code,
            Self::Action(_) => 0,
        }
    }
}

/// A single input item, immutable once read
#[derive(Debug, Clone)]
pub struct UrlEntry {
    /// The absolute URL to process
    pub url: Url,

    /// Optional pre-computed status hint (CSV variant only)
    pub hint: Option<StatusHint>,
}

/// Reads the ordered URL list from the given path
///
/// The `.csv` extension selects the tabular variant; anything else is read
/// as a plain one-URL-per-line list. Blank lines are ignored. Lines whose
/// URL does not parse as an absolute URL are logged and dropped.
pub fn read_entries(path: &Path) -> Result<Vec<UrlEntry>, InputError> {
    let path_display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path_display.clone(),
        source,
    })?;

    let csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let entries = if csv {
        parse_csv(&content)
    } else {
        parse_plain(&content)
    };

    if entries.is_empty() {
        return Err(InputError::Empty { path: path_display });
    }

    tracing::info!("Read {} URLs from {}", entries.len(), path_display);
    Ok(entries)
}

/// Parses the plain one-URL-per-line variant
fn parse_plain(content: &str) -> Vec<UrlEntry> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            parse_url(line).map(|url| UrlEntry { url, hint: None })
        })
        .collect()
}

/// Parses the tabular `URL,Status` variant
fn parse_csv(content: &str) -> Vec<UrlEntry> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }

            let (url_field, status_field) = match line.split_once(',') {
                Some((u, s)) => (u.trim(), s.trim()),
                None => (line, ""),
            };

            // Optional header row
            if url_field.eq_ignore_ascii_case("url") {
                return None;
            }

            let url = parse_url(url_field)?;
            let hint = parse_hint(status_field);
            Some(UrlEntry { url, hint })
        })
        .collect()
}

/// Parses a single URL field, logging and dropping anything invalid
fn parse_url(field: &str) -> Option<Url> {
    match Url::parse(field) {
        Ok(url) if url.host_str().is_some() => Some(url),
        Ok(_) => {
            tracing::warn!("Skipping URL without a host: {}", field);
            None
        }
        Err(e) => {
            tracing::warn!("Skipping unparseable URL '{}': {}", field, e);
            None
        }
    }
}

/// Parses the optional status column of the CSV variant
///
/// Empty and unrecognized values fall back to live probing.
fn parse_hint(field: &str) -> Option<StatusHint> {
    if field.is_empty() {
        return None;
    }

    if let Ok(code) = field.parse::<u16>() {
        return Some(StatusHint::Code(code));
    }

    match Action::from_report_str(field) {
        Some(action) => Some(StatusHint::Action(action)),
        None => {
            tracing::warn!("Unknown status hint '{}', will probe instead", field);
            None
        }
    }
}

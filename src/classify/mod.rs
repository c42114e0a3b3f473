//! Status classification
//!
//! Maps the HTTP status observed for a URL to the indexing action to take.
//! The boundary table is a compatibility contract with downstream report
//! consumers: 2xx means the page is live and should be (re)indexed, 4xx
//! means it is gone and should be removed from the index, status 0 marks a
//! probe that never reached the server, and everything else (1xx, 3xx, 5xx)
//! is left alone.

use std::fmt;

/// The indexing directive derived from a URL's probe status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Page is live (2xx) - submit an update notification
    Update,

    /// Page is gone (4xx) - submit a removal notification
    Delete,

    /// Ambiguous status (1xx, 3xx, 5xx) - do not touch the index
    Skip,

    /// Probe never reached the server (status 0)
    Unreachable,
}

impl Action {
    /// Returns true if this action results in an indexing-API submission
    pub fn is_submittable(&self) -> bool {
        matches!(self, Self::Update | Self::Delete)
    }

    /// Converts the action to its report string representation
    ///
    /// These strings appear in the per-domain report files and are accepted
    /// back as status hints in CSV input.
    pub fn as_report_str(&self) -> &'static str {
        match self {
            Self::Update => "URL_UPDATED",
            Self::Delete => "URL_DELETED",
            Self::Skip => "URL_SKIPPED",
            Self::Unreachable => "UNREACHABLE",
        }
    }

    /// Parses an action from its report string representation
    ///
    /// Returns None if the string doesn't match any known action.
    pub fn from_report_str(s: &str) -> Option<Self> {
        match s {
            "URL_UPDATED" => Some(Self::Update),
            "URL_DELETED" => Some(Self::Delete),
            "URL_SKIPPED" => Some(Self::Skip),
            "UNREACHABLE" => Some(Self::Unreachable),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_report_str())
    }
}

/// Classifies an HTTP status code into an indexing action
///
/// This is a total, pure function over all status values:
///
/// | Status | Action |
/// |--------|--------|
/// | 200..=299 | Update |
/// | 400..=499 | Delete |
/// | 0 | Unreachable |
/// | anything else | Skip |
///
/// # Examples
///
/// ```
/// use herald::classify::{classify, Action};
///
/// assert_eq!(classify(200), Action::Update);
/// assert_eq!(classify(404), Action::Delete);
/// assert_eq!(classify(0), Action::Unreachable);
/// assert_eq!(classify(301), Action::Skip);
/// ```
pub fn classify(http_status: u16) -> Action {
    match http_status {
        0 => Action::Unreachable,
        200..=299 => Action::Update,
        400..=499 => Action::Delete,
        _ => Action::Skip,
    }
}

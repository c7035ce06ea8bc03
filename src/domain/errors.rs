//! Domain Errors
//!
//! Error kinds shared by the core and its adapters.

use serde::{Deserialize, Serialize};

/// Errors raised inside the locator core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocatorError {
    /// Malformed coordinate, or non-numeric input where a selection was required.
    #[error("parse error: {0}")]
    Parse(String),
    /// Selection index outside the candidate bounds.
    #[error("selection {index} is outside 1..={max}")]
    OutOfRange { index: i64, max: usize },
    /// Network or service failure from an upstream dependency.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    /// Selection attempted with an empty candidate list.
    #[error("no candidates to select from")]
    NoCandidates,
    /// Outlet id not present in the directory.
    #[error("outlet not found: {0}")]
    OutletNotFound(i64),
}

impl LocatorError {
    /// The stable kind reported to clients.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) => ErrorKind::ParseError,
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
            Self::NoCandidates => ErrorKind::NoCandidates,
            Self::OutletNotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Serializable error kind carried by error results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ParseError,
    OutOfRange,
    UpstreamUnavailable,
    NoCandidates,
    NotFound,
    /// A newer request for the same session committed first.
    Superseded,
}

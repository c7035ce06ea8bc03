//! Resolution results emitted by the conversational flow.

use crate::domain::errors::{ErrorKind, LocatorError};
use serde::Serialize;

/// Shown when an upstream call fails; details stay in the logs.
pub const RETRY_MESSAGE: &str =
    "Sorry, the outlet assistant is unavailable right now. Please try again.";

/// Outcome of one user turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolutionResult {
    /// A single outlet was identified.
    Resolved {
        outlet: Option<String>,
        operating_hours: Option<String>,
        message: String,
    },
    /// Several outlets matched; the user must reply with a number.
    Ambiguous {
        candidates: Vec<String>,
        prompt: String,
    },
    NotFound {
        message: String,
    },
    InvalidSelection {
        message: String,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
}

impl ResolutionResult {
    /// Error result for a failed or stale turn.
    pub fn error(err: &LocatorError) -> Self {
        let message = match err {
            LocatorError::UpstreamUnavailable(_) => RETRY_MESSAGE.to_string(),
            LocatorError::NoCandidates => {
                "There is no pending list of outlets. Please search again.".to_string()
            }
            other => other.to_string(),
        };
        Self::Error {
            kind: err.kind(),
            message,
        }
    }

    /// Error result for a reply that lost the race to a newer request.
    pub fn superseded() -> Self {
        Self::Error {
            kind: ErrorKind::Superseded,
            message: "This request was replaced by a newer one.".to_string(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Render candidates as a 1-indexed prompt.
pub fn render_prompt(message: &str, candidates: &[String]) -> String {
    let header = if message.trim().is_empty() {
        "Multiple outlets match your query:"
    } else {
        message.trim()
    };

    let mut prompt = String::from(header);
    for (i, name) in candidates.iter().enumerate() {
        prompt.push_str(&format!("\n{}. {}", i + 1, name));
    }
    prompt.push_str("\nReply with the number of your choice.");
    prompt
}

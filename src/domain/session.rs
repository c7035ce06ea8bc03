//! Conversation Session
//!
//! Per-user state machine for the two-step chat flow: a free-text search
//! that may produce several candidates, then a numeric reply that picks one.
//!
//! The session itself performs no I/O. The dispatcher feeds it upstream
//! replies and commits the resulting state.

use crate::domain::entities::{SearchResponse, SearchStatus, SelectionResponse, SelectionStatus};
use crate::domain::errors::LocatorError;
use crate::domain::resolution::{render_prompt, ResolutionResult};
use crate::domain::value_objects::SelectionIndex;
use serde::Serialize;
use std::time::Instant;

/// Where a user is in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// No outstanding candidates.
    #[default]
    Idle,
    /// Candidates recorded; valid replies are 1..=candidates.len().
    AwaitingSelection { candidates: Vec<String> },
}

/// Conversation state for one user id.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    state: SessionState,
    /// Bumped by the session store on every committed transition
    generation: u64,
    last_seen: Instant,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            generation: 0,
            last_seen: Instant::now(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_seen(&self) -> Instant {
        self.last_seen
    }

    pub fn is_awaiting_selection(&self) -> bool {
        matches!(self.state, SessionState::AwaitingSelection { .. })
    }

    /// Outstanding candidates, empty when idle.
    pub fn candidates(&self) -> &[String] {
        match &self.state {
            SessionState::AwaitingSelection { candidates } => candidates,
            SessionState::Idle => &[],
        }
    }

    /// Mark the session as used now.
    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    /// Record that this state has been committed.
    pub fn advance_generation(&mut self) {
        self.generation += 1;
    }

    #[cfg(test)]
    pub(crate) fn set_last_seen(&mut self, at: Instant) {
        self.last_seen = at;
    }

    fn reset(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Apply the reply of a free-text search.
    ///
    /// An `error` status is an upstream failure and leaves the state as it was.
    pub fn apply_search(&mut self, response: SearchResponse) -> ResolutionResult {
        match response.status {
            SearchStatus::Single => {
                self.reset();
                let outlet = response
                    .outlet
                    .or_else(|| response.options.and_then(|o| o.into_iter().next()));
                ResolutionResult::Resolved {
                    outlet,
                    operating_hours: response.operating_hours,
                    message: response.message,
                }
            }
            SearchStatus::Multiple => {
                let candidates = response.options.unwrap_or_default();
                if candidates.is_empty() {
                    self.reset();
                    return not_found(response.message);
                }
                let prompt = render_prompt(&response.message, &candidates);
                self.state = SessionState::AwaitingSelection {
                    candidates: candidates.clone(),
                };
                ResolutionResult::Ambiguous { candidates, prompt }
            }
            SearchStatus::None => {
                self.reset();
                not_found(response.message)
            }
            SearchStatus::Error => ResolutionResult::error(&LocatorError::UpstreamUnavailable(
                response.message,
            )),
        }
    }

    /// Validate a selection reply before the upstream call.
    ///
    /// Out-of-range numbers abort the session: the candidates are cleared
    /// and a fresh search is needed. Unparsable replies leave it untouched.
    pub fn check_selection(&mut self, raw: &str) -> Result<SelectionIndex, ResolutionResult> {
        let len = self.candidates().len();
        if len == 0 {
            return Err(ResolutionResult::error(&LocatorError::NoCandidates));
        }

        let index = SelectionIndex::parse(raw).map_err(|_| ResolutionResult::InvalidSelection {
            message: format!("Please reply with a number between 1 and {}.", len),
        })?;

        match index.within(len) {
            Ok(_) => Ok(index),
            Err(e) => {
                tracing::debug!("aborting selection: {}", e);
                self.reset();
                Err(ResolutionResult::InvalidSelection {
                    message: format!(
                        "{} is not one of the listed options. Please start a new search.",
                        index
                    ),
                })
            }
        }
    }

    /// Apply the reply of the upstream selection call for `index`.
    ///
    /// Only a success that carries operating hours resolves the session;
    /// anything else keeps the candidates so the user can pick again.
    pub fn apply_selection(
        &mut self,
        index: SelectionIndex,
        response: SelectionResponse,
    ) -> ResolutionResult {
        let hours = response
            .operating_hours
            .filter(|h| !h.trim().is_empty());

        match (response.status, hours) {
            (SelectionStatus::Success, Some(hours)) => {
                let outlet = response.outlet.or_else(|| self.candidate(index));
                self.reset();
                let message = if response.message.is_empty() {
                    match &outlet {
                        Some(name) => format!("{} operating hours: {}", name, hours),
                        None => format!("Operating hours: {}", hours),
                    }
                } else {
                    response.message
                };
                ResolutionResult::Resolved {
                    outlet,
                    operating_hours: Some(hours),
                    message,
                }
            }
            _ => ResolutionResult::InvalidSelection {
                message: if response.message.is_empty() {
                    "That outlet could not be resolved. Please pick another number.".to_string()
                } else {
                    response.message
                },
            },
        }
    }

    fn candidate(&self, index: SelectionIndex) -> Option<String> {
        let i = usize::try_from(index.get()).ok()?;
        self.candidates().get(i.checked_sub(1)?).cloned()
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(message: String) -> ResolutionResult {
    ResolutionResult::NotFound {
        message: if message.is_empty() {
            "No outlets matched your query.".to_string()
        } else {
            message
        },
    }
}

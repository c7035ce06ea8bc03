//! Query Dispatcher - Conversational use case
//!
//! Routes each chat turn either to the upstream search or to the session's
//! selection path, then commits the resulting session state.

use crate::domain::errors::LocatorError;
use crate::domain::ports::{SearchService, SelectionService, SessionStore};
use crate::domain::resolution::ResolutionResult;
use crate::domain::session::ConversationSession;
use crate::domain::value_objects::{is_numeric, UserId};
use std::sync::Arc;
use std::time::Duration;

/// Entry point for chat input.
///
/// Each turn:
/// 1. Takes a snapshot of the user's session
/// 2. Performs at most one upstream call
/// 3. Applies the reply to the snapshot and commits it, unless a newer
///    turn for the same user committed in the meantime
///
/// Upstream failures never touch the stored session.
pub struct QueryDispatcher {
    search: Arc<dyn SearchService>,
    selection: Arc<dyn SelectionService>,
    sessions: Arc<dyn SessionStore>,
}

impl QueryDispatcher {
    pub fn new(
        search: Arc<dyn SearchService>,
        selection: Arc<dyn SelectionService>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            search,
            selection,
            sessions,
        }
    }

    /// Handle one line of user input.
    ///
    /// Returns `None` for blank input, which is ignored entirely.
    pub async fn handle(&self, user_id: &UserId, raw_input: &str) -> Option<ResolutionResult> {
        let input = raw_input.trim();
        if input.is_empty() {
            return None;
        }

        let snapshot = self.sessions.load(user_id).await;

        let result = if is_numeric(input) {
            if snapshot.is_awaiting_selection() {
                self.select(user_id, snapshot, input).await
            } else {
                tracing::debug!("numeric input from {} with no pending candidates", user_id);
                self.sessions.touch(user_id).await;
                ResolutionResult::error(&LocatorError::NoCandidates)
            }
        } else {
            self.search_text(user_id, snapshot, input).await
        };

        Some(result)
    }

    /// Read-only view of a user's session.
    pub async fn session(&self, user_id: &UserId) -> ConversationSession {
        self.sessions.load(user_id).await
    }

    /// Forget a user's session.
    pub async fn reset(&self, user_id: &UserId) {
        self.sessions.remove(user_id).await;
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.count().await
    }

    /// Periodically evict sessions idle for longer than `ttl`.
    pub fn start_session_gc(&self, ttl: Duration, interval: Duration) {
        let sessions = self.sessions.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                let removed = sessions.cleanup_expired(ttl).await;
                if removed > 0 {
                    tracing::debug!("session GC removed {} idle sessions", removed);
                }
            }
        });
    }

    async fn search_text(
        &self,
        user_id: &UserId,
        snapshot: ConversationSession,
        text: &str,
    ) -> ResolutionResult {
        let response = match self.search.search(text, user_id).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("upstream search failed for {}: {}", user_id, e);
                return ResolutionResult::error(&e);
            }
        };

        let mut next = snapshot.clone();
        let result = next.apply_search(response);
        self.finish(user_id, &snapshot, next, result).await
    }

    async fn select(
        &self,
        user_id: &UserId,
        snapshot: ConversationSession,
        input: &str,
    ) -> ResolutionResult {
        let mut next = snapshot.clone();
        let index = match next.check_selection(input) {
            Ok(index) => index,
            Err(result) => return self.finish(user_id, &snapshot, next, result).await,
        };

        let response = match self.selection.select(user_id, index).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("upstream selection failed for {}: {}", user_id, e);
                return ResolutionResult::error(&e);
            }
        };

        let result = next.apply_selection(index, response);
        self.finish(user_id, &snapshot, next, result).await
    }

    async fn finish(
        &self,
        user_id: &UserId,
        snapshot: &ConversationSession,
        next: ConversationSession,
        result: ResolutionResult,
    ) -> ResolutionResult {
        if next.state() == snapshot.state() {
            self.sessions.touch(user_id).await;
            return result;
        }

        let state = next.state().clone();
        if self
            .sessions
            .commit(user_id, snapshot.generation(), next)
            .await
        {
            tracing::debug!("session {} -> {:?}", user_id, state);
            result
        } else {
            tracing::debug!("discarding stale reply for {}", user_id);
            ResolutionResult::superseded()
        }
    }
}

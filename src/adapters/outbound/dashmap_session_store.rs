//! DashMap Session Store
//!
//! Implements SessionStore using DashMap for concurrent per-user access.

use crate::domain::ports::SessionStore;
use crate::domain::session::ConversationSession;
use crate::domain::value_objects::UserId;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// DashMap-backed session store.
///
/// Each user id maps to its own shard entry, so different users never
/// contend on the same lock. Commits for one user are serialized by the
/// entry guard.
pub struct DashMapSessionStore {
    sessions: Arc<DashMap<UserId, ConversationSession>>,
}

impl DashMapSessionStore {
    /// Create a new store.
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }
}

impl Default for DashMapSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for DashMapSessionStore {
    async fn load(&self, user_id: &UserId) -> ConversationSession {
        self.sessions
            .get(user_id)
            .map(|e| e.value().clone())
            .unwrap_or_default()
    }

    async fn commit(&self, user_id: &UserId, expected: u64, mut session: ConversationSession) -> bool {
        match self.sessions.entry(user_id.clone()) {
            Entry::Occupied(mut entry) => {
                if entry.get().generation() != expected {
                    return false;
                }
                session.touch();
                session.advance_generation();
                entry.insert(session);
                true
            }
            Entry::Vacant(entry) => {
                if expected != 0 {
                    return false;
                }
                session.touch();
                session.advance_generation();
                entry.insert(session);
                true
            }
        }
    }

    async fn touch(&self, user_id: &UserId) {
        self.sessions
            .entry(user_id.clone())
            .and_modify(|s| s.touch())
            .or_default();
    }

    async fn remove(&self, user_id: &UserId) {
        self.sessions.remove(user_id);
    }

    async fn cleanup_expired(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| now.duration_since(session.last_seen()) <= ttl);
        before.saturating_sub(self.sessions.len())
    }

    async fn count(&self) -> usize {
        self.sessions.len()
    }
}

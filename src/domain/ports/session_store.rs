//! Session Store Port
//!
//! Defines the interface for keeping conversation sessions per user.

use crate::domain::session::ConversationSession;
use crate::domain::value_objects::UserId;
use async_trait::async_trait;
use std::time::Duration;

/// Mapping from user id to conversation session.
///
/// The store implies no durability. Writes are compare-and-set on the
/// session generation so a slow reply cannot overwrite a newer state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Snapshot of the session for a user, a fresh idle one if none exists.
    async fn load(&self, user_id: &UserId) -> ConversationSession;

    /// Store `session` if the current generation still equals `expected`.
    ///
    /// A missing session counts as generation 0. On success the stored
    /// generation is advanced and `true` is returned.
    async fn commit(&self, user_id: &UserId, expected: u64, session: ConversationSession) -> bool;

    /// Record activity for a user without changing the session state,
    /// creating an idle session if none exists.
    async fn touch(&self, user_id: &UserId);

    /// Drop the session for a user.
    async fn remove(&self, user_id: &UserId);

    /// Remove sessions idle for longer than the TTL.
    async fn cleanup_expired(&self, ttl: Duration) -> usize;

    /// Number of live sessions.
    async fn count(&self) -> usize;
}

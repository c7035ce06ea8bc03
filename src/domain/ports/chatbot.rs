//! Chatbot Backend Ports
//!
//! The natural-language backend is opaque to the core: it turns free text
//! into candidate matches and resolves a numbered choice to an outlet.

use crate::domain::entities::{SearchResponse, SelectionResponse};
use crate::domain::errors::LocatorError;
use crate::domain::value_objects::{SelectionIndex, UserId};
use async_trait::async_trait;

/// Upstream free-text search.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Search outlets matching `text` on behalf of `user_id`.
    ///
    /// Transport failures surface as `LocatorError::UpstreamUnavailable`.
    async fn search(&self, text: &str, user_id: &UserId) -> Result<SearchResponse, LocatorError>;
}

/// Upstream resolution of a numbered choice.
#[async_trait]
pub trait SelectionService: Send + Sync {
    /// Resolve the 1-based `index` from the user's last candidate list.
    async fn select(
        &self,
        user_id: &UserId,
        index: SelectionIndex,
    ) -> Result<SelectionResponse, LocatorError>;
}

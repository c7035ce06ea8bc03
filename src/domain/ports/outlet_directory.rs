//! Outlet Directory Port
//!
//! Defines the interface for fetching outlet records.
//! Implementations may call the directory HTTP API or read a local SQLite copy.

use crate::domain::entities::Outlet;
use crate::domain::errors::LocatorError;
use async_trait::async_trait;

/// Source of outlet records.
///
/// Implementations return only outlets whose coordinates parsed;
/// malformed records are dropped before they reach the core.
#[async_trait]
pub trait OutletDirectory: Send + Sync {
    /// Get every known outlet.
    async fn list_all(&self) -> Result<Vec<Outlet>, LocatorError>;
}

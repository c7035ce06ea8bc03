//! Outlet Locator Library
//!
//! This module exposes the outlet locator components for use in integration
//! tests and as a library.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::{OutletService, QueryDispatcher};
pub use config::{load_config, Config, DirectorySource};
pub use domain::entities::Outlet;
pub use domain::ports::{OutletDirectory, SearchService, SelectionService, SessionStore};
pub use domain::resolution::ResolutionResult;
pub use domain::value_objects::{Coordinate, UserId};

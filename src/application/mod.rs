//! Application Layer
//!
//! Use cases that wire domain logic to the ports.

mod outlet_service;
mod query_dispatcher;

pub use outlet_service::{Catchment, NearbyOutlet, OutletService, PointCatchment};
pub use query_dispatcher::QueryDispatcher;

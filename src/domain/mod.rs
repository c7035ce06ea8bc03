//! Domain Layer
//!
//! Outlets, coordinates, the conversation state machine and the ports
//! through which the core reaches its collaborators.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod resolution;
pub mod services;
pub mod session;
pub mod value_objects;

pub use entities::{Outlet, RawOutlet, SearchResponse, SearchStatus, SelectionResponse, SelectionStatus};
pub use errors::{ErrorKind, LocatorError};
pub use resolution::ResolutionResult;
pub use session::{ConversationSession, SessionState};
pub use value_objects::{Coordinate, SelectionIndex, UserId};

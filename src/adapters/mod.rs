//! Adapters Layer
//!
//! Inbound adapters drive the application (HTTP API); outbound adapters
//! implement the domain ports (directory, chatbot, session store).

pub mod inbound;
pub mod outbound;

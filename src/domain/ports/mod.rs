mod chatbot;
mod outlet_directory;
mod session_store;

pub use chatbot::{SearchService, SelectionService};
pub use outlet_directory::OutletDirectory;
pub use session_store::SessionStore;

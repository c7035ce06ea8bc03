mod dashmap_session_store;
mod http_chatbot_client;
mod http_outlet_directory;
mod sqlite_outlet_directory;

pub use dashmap_session_store::DashMapSessionStore;
pub use http_chatbot_client::HttpChatbotClient;
pub use http_outlet_directory::HttpOutletDirectory;
pub use sqlite_outlet_directory::SqliteOutletDirectory;

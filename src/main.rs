//! outlet-locator - Outlet map and chat assistant backend
//!
//! This is the composition root that wires together all the components.

use outlet_locator::adapters::inbound::{ApiServer, ApiState};
use outlet_locator::adapters::outbound::{
    DashMapSessionStore, HttpChatbotClient, HttpOutletDirectory, SqliteOutletDirectory,
};
use outlet_locator::config::{load_config, ConfigError, DirectorySource};
use outlet_locator::domain::ports::OutletDirectory;
use outlet_locator::{OutletService, QueryDispatcher};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    cfg.validate()?;

    tracing::info!(
        "starting outlet-locator listen={} radius={}km",
        cfg.listen_addr,
        cfg.radius_km
    );

    // ===== COMPOSITION ROOT =====

    let upstream_timeout = Duration::from_secs(cfg.upstream_timeout_secs);

    // 1. Outlet directory (HTTP or SQLite)
    let directory: Arc<dyn OutletDirectory> = match cfg.directory_source()? {
        DirectorySource::Http(url) => {
            tracing::info!("outlet directory: {}", url);
            Arc::new(HttpOutletDirectory::new(url, upstream_timeout)?)
        }
        DirectorySource::Sqlite(path) => {
            let repo = SqliteOutletDirectory::new();
            match repo.reload(&path).await {
                Ok(count) => tracing::info!("loaded {} outlets from {}", count, path),
                Err(e) => tracing::error!("failed to load outlets from {}: {:?}", path, e),
            }
            repo.start_sync(path, cfg.db_reload_secs);
            Arc::new(repo)
        }
    };

    // 2. Chatbot backend
    let chatbot_url = cfg.chatbot_url.clone().ok_or(ConfigError::MissingChatbotUrl)?;
    let chatbot = Arc::new(HttpChatbotClient::new(chatbot_url, upstream_timeout)?);

    // 3. Session store (DashMap)
    let sessions = Arc::new(DashMapSessionStore::new());

    // 4. Application services
    let outlets = Arc::new(OutletService::new(
        directory,
        cfg.radius_km,
        cfg.suggestion_limit,
    ));
    let dispatcher = Arc::new(QueryDispatcher::new(chatbot.clone(), chatbot, sessions));
    dispatcher.start_session_gc(
        Duration::from_secs(cfg.session_ttl_secs),
        Duration::from_secs(cfg.session_gc_interval_secs),
    );

    // 5. Inbound adapter
    let server = ApiServer::new(cfg.listen_addr.clone(), ApiState::new(outlets, dispatcher));

    server.run().await
}

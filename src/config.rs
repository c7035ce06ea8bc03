use crate::domain::services::{DEFAULT_RADIUS_KM, DEFAULT_SUGGESTION_LIMIT};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("no outlet directory configured: set OUTLET_LOCATOR_DIRECTORY_URL or OUTLET_LOCATOR_DB_PATH")]
    NoDirectorySource,
    #[error("both OUTLET_LOCATOR_DIRECTORY_URL and OUTLET_LOCATOR_DB_PATH are set; pick one")]
    ConflictingDirectorySources,
    #[error("OUTLET_LOCATOR_CHATBOT_URL is required")]
    MissingChatbotUrl,
    #[error("invalid radius: {0} km")]
    InvalidRadius(f64),
    #[error("{0} must be at least 1 second")]
    ZeroInterval(&'static str),
}

/// Where outlet records come from.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectorySource {
    Http(String),
    Sqlite(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub directory_url: Option<String>,
    pub db_path: Option<String>,
    pub db_reload_secs: u64,
    pub chatbot_url: Option<String>,
    pub upstream_timeout_secs: u64,
    pub radius_km: f64,
    pub suggestion_limit: usize,
    pub session_ttl_secs: u64,
    pub session_gc_interval_secs: u64,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            directory_url: None,
            db_path: None,
            db_reload_secs: 30,
            chatbot_url: None,
            upstream_timeout_secs: 10,
            radius_km: DEFAULT_RADIUS_KM,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            session_ttl_secs: 1800,
            session_gc_interval_secs: 60,
            debug: false,
        }
    }
}

impl Config {
    /// The single configured outlet source.
    pub fn directory_source(&self) -> Result<DirectorySource, ConfigError> {
        match (&self.directory_url, &self.db_path) {
            (Some(url), None) => Ok(DirectorySource::Http(url.clone())),
            (None, Some(path)) => Ok(DirectorySource::Sqlite(path.clone())),
            (Some(_), Some(_)) => Err(ConfigError::ConflictingDirectorySources),
            (None, None) => Err(ConfigError::NoDirectorySource),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.directory_source()?;

        if self.chatbot_url.is_none() {
            return Err(ConfigError::MissingChatbotUrl);
        }

        if !self.radius_km.is_finite() || self.radius_km < 0.0 {
            return Err(ConfigError::InvalidRadius(self.radius_km));
        }

        if self.db_reload_secs == 0 {
            return Err(ConfigError::ZeroInterval("OUTLET_LOCATOR_DB_RELOAD_SECS"));
        }
        if self.session_gc_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval(
                "OUTLET_LOCATOR_SESSION_GC_INTERVAL_SECS",
            ));
        }

        Ok(())
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    Ok(load_config_from(|key| std::env::var(key).ok()))
}

/// Build the configuration from an arbitrary variable lookup.
///
/// Unparsable numbers fall back to their defaults and empty strings count
/// as unset.
pub fn load_config_from<F>(lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Config::default();
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let listen_addr = var("OUTLET_LOCATOR_LISTEN_ADDR").unwrap_or(defaults.listen_addr);

    let directory_url = var("OUTLET_LOCATOR_DIRECTORY_URL");
    let db_path = var("OUTLET_LOCATOR_DB_PATH");

    let db_reload_secs = var("OUTLET_LOCATOR_DB_RELOAD_SECS")
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.db_reload_secs);

    let chatbot_url = var("OUTLET_LOCATOR_CHATBOT_URL");

    let upstream_timeout_secs = var("OUTLET_LOCATOR_UPSTREAM_TIMEOUT_SECS")
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.upstream_timeout_secs);

    let radius_km = var("OUTLET_LOCATOR_RADIUS_KM")
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.radius_km);

    let suggestion_limit = var("OUTLET_LOCATOR_SUGGESTION_LIMIT")
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.suggestion_limit);

    let session_ttl_secs = var("OUTLET_LOCATOR_SESSION_TTL_SECS")
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.session_ttl_secs);

    let session_gc_interval_secs = var("OUTLET_LOCATOR_SESSION_GC_INTERVAL_SECS")
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.session_gc_interval_secs);

    let debug = lookup("DEBUG").is_some();

    Config {
        listen_addr,
        directory_url,
        db_path,
        db_reload_secs,
        chatbot_url,
        upstream_timeout_secs,
        radius_km,
        suggestion_limit,
        session_ttl_secs,
        session_gc_interval_secs,
        debug,
    }
}

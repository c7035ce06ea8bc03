//! SQLite Outlet Directory
//!
//! Implements OutletDirectory over a local SQLite copy of the scraped
//! `subway_outlets` table. Supports periodic reloading.

use crate::domain::entities::{parse_outlets, Outlet, RawDegrees, RawOutlet};
use crate::domain::errors::LocatorError;
use crate::domain::ports::OutletDirectory;
use anyhow::Result;
use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{Connection, Row};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{sleep, Duration};

/// SQLite-backed outlet directory.
///
/// Outlets are cached in memory and refreshed from the database file
/// by a background task.
pub struct SqliteOutletDirectory {
    outlets: Arc<RwLock<Vec<Outlet>>>,
    version: Arc<AtomicU64>,
}

impl SqliteOutletDirectory {
    /// Create a new directory (empty until the first load).
    pub fn new() -> Self {
        Self {
            outlets: Arc::new(RwLock::new(Vec::new())),
            version: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Load the database once, replacing the cached outlets.
    pub async fn reload(&self, db_path: &str) -> Result<usize> {
        Self::reload_into(&self.outlets, &self.version, db_path.to_string()).await
    }

    /// Start the background sync task.
    pub fn start_sync(&self, db_path: String, interval_secs: u64) {
        let outlets = self.outlets.clone();
        let version = self.version.clone();

        tokio::spawn(async move {
            loop {
                sleep(Duration::from_secs(interval_secs)).await;
                if let Err(e) = Self::reload_into(&outlets, &version, db_path.clone()).await {
                    tracing::error!("error reading outlets from {}: {:?}", db_path, e);
                }
            }
        });
    }

    /// Number of completed reloads.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    async fn reload_into(
        outlets: &RwLock<Vec<Outlet>>,
        version: &AtomicU64,
        db_path: String,
    ) -> Result<usize> {
        let loaded = tokio::task::spawn_blocking(move || Self::load_from_sqlite(&db_path)).await??;
        let count = loaded.len();
        {
            let mut guard = outlets.write().await;
            *guard = loaded;
        }
        let new_version = version.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!("outlet reload ok, version={} outlets={}", new_version, count);
        Ok(count)
    }

    /// Load outlets from the SQLite database file.
    fn load_from_sqlite(db_path: &str) -> Result<Vec<Outlet>> {
        let conn = Connection::open(db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, name, address, operating_hours, latitude, longitude, waze_link
             FROM subway_outlets
             ORDER BY id",
        )?;

        let raw = stmt
            .query_map([], |row| Self::row_to_raw(row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(parse_outlets(raw))
    }

    /// Convert a SQLite row to an unvalidated outlet record.
    fn row_to_raw(row: &Row) -> rusqlite::Result<RawOutlet> {
        Ok(RawOutlet {
            id: row.get(0)?,
            name: row.get(1)?,
            address: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            operating_hours: row.get(3)?,
            latitude: Self::degrees(row.get(4)?),
            longitude: Self::degrees(row.get(5)?),
            waze_link: row.get(6)?,
        })
    }

    /// Coordinates were scraped as TEXT, but REAL columns are accepted too.
    fn degrees(value: Value) -> Option<RawDegrees> {
        match value {
            Value::Text(s) => Some(RawDegrees::Text(s)),
            Value::Real(f) => Some(RawDegrees::Number(f)),
            Value::Integer(i) => Some(RawDegrees::Number(i as f64)),
            Value::Null | Value::Blob(_) => None,
        }
    }
}

impl Default for SqliteOutletDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutletDirectory for SqliteOutletDirectory {
    async fn list_all(&self) -> Result<Vec<Outlet>, LocatorError> {
        Ok(self.outlets.read().await.clone())
    }
}

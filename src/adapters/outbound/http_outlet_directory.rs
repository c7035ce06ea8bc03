//! HTTP Outlet Directory
//!
//! Implements OutletDirectory against the backend's `GET /outlets/`
//! endpoint. Every call fetches a fresh list.

use crate::domain::entities::{parse_outlets, Outlet, RawOutlet};
use crate::domain::errors::LocatorError;
use crate::domain::ports::OutletDirectory;
use async_trait::async_trait;
use std::time::Duration;

pub struct HttpOutletDirectory {
    base_url: String,
    client: reqwest::Client,
}

impl HttpOutletDirectory {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn fetch_outlets(&self) -> anyhow::Result<Vec<RawOutlet>> {
        let url = format!("{}/outlets/", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("outlet directory returned {} - {}", status, body);
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl OutletDirectory for HttpOutletDirectory {
    async fn list_all(&self) -> Result<Vec<Outlet>, LocatorError> {
        match self.fetch_outlets().await {
            Ok(raw) => Ok(parse_outlets(raw)),
            Err(e) => {
                tracing::warn!("outlet directory fetch failed: {:#}", e);
                Err(LocatorError::UpstreamUnavailable(e.to_string()))
            }
        }
    }
}

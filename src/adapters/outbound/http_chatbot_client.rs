//! HTTP Chatbot Client
//!
//! Implements SearchService and SelectionService against the chatbot
//! backend's `GET /search/` and `GET /select/` endpoints.

use crate::domain::entities::{SearchResponse, SelectionResponse};
use crate::domain::errors::LocatorError;
use crate::domain::ports::{SearchService, SelectionService};
use crate::domain::value_objects::{SelectionIndex, UserId};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the upstream chatbot backend.
///
/// Any transport failure, timeout, non-2xx status or undecodable body is
/// reported as `UpstreamUnavailable`.
pub struct HttpChatbotClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpChatbotClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> anyhow::Result<T> {
        let url = format!("{}/{}/", self.base_url, endpoint);
        let response = self.client.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("{} returned {} - {}", endpoint, status, body);
        }

        Ok(response.json().await?)
    }
}

fn unavailable(e: anyhow::Error) -> LocatorError {
    LocatorError::UpstreamUnavailable(e.to_string())
}

#[async_trait]
impl SearchService for HttpChatbotClient {
    async fn search(&self, text: &str, user_id: &UserId) -> Result<SearchResponse, LocatorError> {
        self.get_json("search", &[("query", text), ("user_id", user_id.as_str())])
            .await
            .map_err(unavailable)
    }
}

#[async_trait]
impl SelectionService for HttpChatbotClient {
    async fn select(
        &self,
        user_id: &UserId,
        index: SelectionIndex,
    ) -> Result<SelectionResponse, LocatorError> {
        let choice = index.get().to_string();
        self.get_json("select", &[("user_id", user_id.as_str()), ("choice", choice.as_str())])
            .await
            .map_err(unavailable)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::entities::{SearchStatus, SelectionStatus};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> HttpChatbotClient {
        HttpChatbotClient::new(server.uri(), Duration::from_secs(2)).unwrap()
    }

    // ===== Search Tests =====

    #[tokio::test]
    async fn test_search_sends_query_and_user() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/"))
            .and(query_param("query", "subway klcc"))
            .and(query_param("user_id", "u-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "multiple",
                "message": "Multiple outlets found. Please select one:",
                "options": ["Subway KLCC", "Subway KLCC 2"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .search("subway klcc", &UserId::new("u-1"))
            .await
            .unwrap();

        assert_eq!(response.status, SearchStatus::Multiple);
        assert_eq!(response.options.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_search_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = client(&server).search("klcc", &UserId::new("u-1")).await;
        assert!(matches!(result, Err(LocatorError::UpstreamUnavailable(_))));
    }

    #[tokio::test]
    async fn test_search_unknown_status_is_unavailable() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "maybe"})),
            )
            .mount(&server)
            .await;

        let result = client(&server).search("klcc", &UserId::new("u-1")).await;
        assert!(matches!(result, Err(LocatorError::UpstreamUnavailable(_))));
    }

    #[tokio::test]
    async fn test_search_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "none"}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = HttpChatbotClient::new(server.uri(), Duration::from_millis(200)).unwrap();
        let result = client.search("klcc", &UserId::new("u-1")).await;

        assert!(matches!(result, Err(LocatorError::UpstreamUnavailable(_))));
    }

    // ===== Selection Tests =====

    #[tokio::test]
    async fn test_select_sends_one_based_choice() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/select/"))
            .and(query_param("user_id", "u-1"))
            .and(query_param("choice", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "outlet": "Subway KLCC 2",
                "operating_hours": "24 hours"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let index = SelectionIndex::parse("2").unwrap();
        let response = client(&server)
            .select(&UserId::new("u-1"), index)
            .await
            .unwrap();

        assert_eq!(response.status, SelectionStatus::Success);
        assert_eq!(response.operating_hours.as_deref(), Some("24 hours"));
    }

    #[tokio::test]
    async fn test_select_unreachable() {
        let client = HttpChatbotClient::new("http://127.0.0.1:1", Duration::from_millis(500)).unwrap();

        let index = SelectionIndex::parse("1").unwrap();
        let result = client.select(&UserId::new("u-1"), index).await;

        assert!(matches!(result, Err(LocatorError::UpstreamUnavailable(_))));
    }
}

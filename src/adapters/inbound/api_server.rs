//! Outlet Locator API Server
//!
//! HTTP API behind the map view and the chat widget: outlet listing,
//! type-ahead, nearby catchments, and the conversational endpoint.

use crate::application::{Catchment, OutletService, PointCatchment, QueryDispatcher};
use crate::domain::entities::Outlet;
use crate::domain::errors::LocatorError;
use crate::domain::resolution::RETRY_MESSAGE;
use crate::domain::session::SessionState;
use crate::domain::value_objects::UserId;
use crate::infrastructure::shutdown_signal;
use axum::{
    extract::{Path, Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Filters for the outlet listing.
#[derive(Debug, Default, Deserialize)]
pub struct OutletFilter {
    pub name: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub radius_km: Option<f64>,
}

/// A map point and optional radius.
#[derive(Debug, Deserialize)]
pub struct PointQuery {
    pub lat: f64,
    pub lon: f64,
    pub radius_km: Option<f64>,
}

/// One chat turn from the widget.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
}

/// Listing response.
#[derive(Debug, Serialize)]
pub struct OutletsResponse {
    pub outlets: Vec<Outlet>,
    pub total: usize,
}

/// Session snapshot as exposed to clients.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub user_id: UserId,
    #[serde(flatten)]
    pub state: SessionState,
    pub generation: u64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub active_sessions: usize,
}

/// API Server state.
#[derive(Clone)]
pub struct ApiState {
    pub outlets: Arc<OutletService>,
    pub dispatcher: Arc<QueryDispatcher>,
}

impl ApiState {
    pub fn new(outlets: Arc<OutletService>, dispatcher: Arc<QueryDispatcher>) -> Self {
        Self {
            outlets,
            dispatcher,
        }
    }
}

/// Domain error carried out of a handler.
#[derive(Debug)]
pub struct ApiError(LocatorError);

impl From<LocatorError> for ApiError {
    fn from(err: LocatorError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            LocatorError::OutletNotFound(_) => StatusCode::NOT_FOUND,
            LocatorError::Parse(_) | LocatorError::OutOfRange { .. } => StatusCode::BAD_REQUEST,
            LocatorError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            LocatorError::NoCandidates => StatusCode::CONFLICT,
        };
        let message = match &self.0 {
            LocatorError::UpstreamUnavailable(detail) => {
                tracing::warn!("upstream unavailable: {}", detail);
                RETRY_MESSAGE.to_string()
            }
            other => other.to_string(),
        };
        let body = serde_json::json!({
            "error": self.0.kind(),
            "message": message,
        });
        (status, Json(body)).into_response()
    }
}

/// Build the API router.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/outlets", get(list_outlets_handler))
        .route("/api/v1/outlets/suggest", get(suggest_handler))
        .route("/api/v1/outlets/nearby", get(near_point_handler))
        .route("/api/v1/outlets/:id", get(get_outlet_handler))
        .route("/api/v1/outlets/:id/nearby", get(nearby_handler))
        .route("/api/v1/sessions", post(create_session_handler))
        .route(
            "/api/v1/sessions/:user_id",
            get(get_session_handler).delete(reset_session_handler),
        )
        .route("/api/v1/chat", post(chat_handler))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors())
        .with_state(state)
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// HTTP front end for the locator.
pub struct ApiServer {
    listen_addr: String,
    state: ApiState,
}

impl ApiServer {
    pub fn new(listen_addr: String, state: ApiState) -> Self {
        Self { listen_addr, state }
    }

    /// Run the API server until a shutdown signal arrives.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run(&self) -> anyhow::Result<()> {
        let app = router(self.state.clone());

        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!("outlet locator API listening on {}", self.listen_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("outlet locator API stopped");
        Ok(())
    }
}

// Handler functions

async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        active_sessions: state.dispatcher.active_sessions().await,
    })
}

async fn list_outlets_handler(
    State(state): State<ApiState>,
    Query(filter): Query<OutletFilter>,
) -> Result<Json<OutletsResponse>, ApiError> {
    let outlets = state
        .outlets
        .search(filter.name.as_deref(), filter.city.as_deref())
        .await?;

    let total = outlets.len();
    Ok(Json(OutletsResponse { outlets, total }))
}

async fn suggest_handler(
    State(state): State<ApiState>,
    Query(query): Query<SuggestQuery>,
) -> Result<Json<Vec<Outlet>>, ApiError> {
    Ok(Json(state.outlets.suggest(&query.q).await?))
}

async fn get_outlet_handler(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<Outlet>, ApiError> {
    Ok(Json(state.outlets.get(id).await?))
}

async fn nearby_handler(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<Catchment>, ApiError> {
    Ok(Json(state.outlets.nearby(id, query.radius_km).await?))
}

async fn near_point_handler(
    State(state): State<ApiState>,
    Query(query): Query<PointQuery>,
) -> Result<Json<PointCatchment>, ApiError> {
    Ok(Json(
        state
            .outlets
            .near_point(query.lat, query.lon, query.radius_km)
            .await?,
    ))
}

async fn create_session_handler() -> impl IntoResponse {
    let user_id = UserId::generate();
    tracing::debug!("minted user id {}", user_id);
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "user_id": user_id })),
    )
}

async fn get_session_handler(
    State(state): State<ApiState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let user_id = UserId::new(user_id);
    let session = state.dispatcher.session(&user_id).await;
    Json(SessionView {
        user_id,
        state: session.state().clone(),
        generation: session.generation(),
    })
}

async fn reset_session_handler(
    State(state): State<ApiState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    state.dispatcher.reset(&UserId::new(user_id)).await;
    StatusCode::NO_CONTENT
}

async fn chat_handler(State(state): State<ApiState>, Json(req): Json<ChatRequest>) -> Response {
    let user_id = UserId::new(req.user_id);
    match state.dispatcher.handle(&user_id, &req.message).await {
        Some(result) => Json(result).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

//! System endpoints: health check and category catalog.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::KeywordInfo;
use crate::app_state::AppState;
use crate::domain::Keyword;
use crate::domain::listing::TIMESTAMP_FORMAT;

/// Service liveness plus a snapshot of the listing store.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `healthy` when the server answers.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Listings held in memory.
    pub listings: usize,
    /// Batches appended since startup.
    pub batches: usize,
    /// Capture time of the newest listing, `YYYY-MM-DD HH:MM:SS`.
    pub latest_fetch: Option<String>,
}

/// `GET /health`: Liveness and store status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Reports liveness, version, and how many listings and batches the store holds.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.research_service.status().await;
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        listings: store.listings,
        batches: store.batches,
        latest_fetch: store
            .latest_fetch
            .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string()),
    })
}

/// `GET /config/keywords`: Supported search categories.
#[utoipa::path(
    get,
    path = "/config/keywords",
    tag = "System",
    summary = "List search categories",
    description = "Returns every keyword the service can fetch, with its marketplace search term.",
    responses(
        (status = 200, description = "Keyword catalog", body = Vec<KeywordInfo>),
    )
)]
pub async fn keywords_handler() -> impl IntoResponse {
    let keywords: Vec<KeywordInfo> = Keyword::ALL
        .into_iter()
        .map(|keyword| KeywordInfo {
            keyword,
            search_term: keyword.search_term(),
            food: keyword.is_food(),
        })
        .collect();
    Json(keywords)
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/keywords", get(keywords_handler))
}

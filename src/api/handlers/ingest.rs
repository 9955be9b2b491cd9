//! Ingestion handler: fetch and append a new batch.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::RefreshRequest;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, ResearchError};
use crate::service::RefreshReport;

/// `POST /refresh`: Fetch a new batch.
///
/// # Errors
///
/// Returns [`ResearchError::Persistence`] if the history file cannot be
/// appended.
#[utoipa::path(
    post,
    path = "/api/v1/refresh",
    tag = "Ingestion",
    summary = "Refresh listings",
    description = "Fetches every requested keyword through the selected source chain, appends the batch to the history file and to the store.",
    request_body = RefreshRequest,
    responses(
        (status = 201, description = "Batch appended", body = RefreshReport),
        (status = 500, description = "Persistence failure", body = ErrorResponse),
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<impl IntoResponse, ResearchError> {
    let report = state
        .research_service
        .refresh(req.mode, &req.keywords)
        .await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// Ingestion routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/refresh", post(refresh))
}

//! Parameter handlers: read and replace the session's parameter set.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::domain::ParameterSet;
use crate::error::{ErrorResponse, ResearchError};

/// `GET /parameters`: Active parameter set.
#[utoipa::path(
    get,
    path = "/api/v1/parameters",
    tag = "Parameters",
    summary = "Get parameters",
    responses(
        (status = 200, description = "Active parameters", body = ParameterSet),
    )
)]
pub async fn get_parameters(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.research_service.parameters().await)
}

/// `PUT /parameters`: Replace the parameter set and recompute.
///
/// # Errors
///
/// Returns [`ResearchError::Parameter`] if any value is out of domain; the
/// active set is unchanged in that case.
#[utoipa::path(
    put,
    path = "/api/v1/parameters",
    tag = "Parameters",
    summary = "Replace parameters",
    description = "Validates the whole set, then recomputes every derived field. All or nothing.",
    request_body = ParameterSet,
    responses(
        (status = 200, description = "Parameters applied", body = ParameterSet),
        (status = 400, description = "Parameter out of domain", body = ErrorResponse),
    )
)]
pub async fn put_parameters(
    State(state): State<AppState>,
    Json(params): Json<ParameterSet>,
) -> Result<impl IntoResponse, ResearchError> {
    let applied = state.research_service.set_parameters(params).await?;
    Ok(Json(applied))
}

/// Parameter routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/parameters", get(get_parameters).put(put_parameters))
}

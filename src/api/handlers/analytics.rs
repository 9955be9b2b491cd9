//! Analytics handlers: aggregates, category summaries, dashboard metrics
//! and treasures.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    AggregateParams, AggregateResponse, CategoryListResponse, LatestParams, ListingFilterParams,
    ListingListResponse, ParameterOverrideParams,
};
use crate::app_state::AppState;
use crate::domain::DashboardMetrics;
use crate::error::{ErrorResponse, ResearchError};

/// `GET /analytics/aggregate`: Per-keyword sum or mean of a metric.
///
/// # Errors
///
/// Returns [`ResearchError`] on an unknown keyword or invalid overrides.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/aggregate",
    tag = "Analytics",
    summary = "Aggregate by keyword",
    description = "Groups the filtered listings by keyword and reduces the chosen metric. Keywords with no listings are omitted.",
    params(AggregateParams, ListingFilterParams, ParameterOverrideParams),
    responses(
        (status = 200, description = "Keyword to value map", body = AggregateResponse),
        (status = 400, description = "Invalid filter or parameter", body = ErrorResponse),
    )
)]
pub async fn aggregate(
    State(state): State<AppState>,
    Query(selection): Query<AggregateParams>,
    Query(filter): Query<ListingFilterParams>,
    Query(overrides): Query<ParameterOverrideParams>,
) -> Result<impl IntoResponse, ResearchError> {
    let criteria = filter.criteria()?;
    let values = state
        .research_service
        .aggregate(overrides.into(), &criteria, selection.metric, selection.op)
        .await?;
    Ok(Json(AggregateResponse {
        metric: selection.metric,
        op: selection.op,
        values,
    }))
}

/// `GET /analytics/categories`: Category summaries.
///
/// # Errors
///
/// Returns [`ResearchError`] on invalid overrides.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/categories",
    tag = "Analytics",
    summary = "Category summaries",
    description = "Count, averages and sales totals per keyword, highest total sales first.",
    params(LatestParams, ParameterOverrideParams),
    responses(
        (status = 200, description = "Category summaries", body = CategoryListResponse),
        (status = 400, description = "Invalid parameter", body = ErrorResponse),
    )
)]
pub async fn categories(
    State(state): State<AppState>,
    Query(scope): Query<LatestParams>,
    Query(overrides): Query<ParameterOverrideParams>,
) -> Result<impl IntoResponse, ResearchError> {
    let data = state
        .research_service
        .categories(overrides.into(), scope.latest)
        .await?;
    Ok(Json(CategoryListResponse { data }))
}

/// `GET /analytics/metrics`: Dashboard counters.
///
/// # Errors
///
/// Returns [`ResearchError`] on an unknown keyword or invalid overrides.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/metrics",
    tag = "Analytics",
    summary = "Dashboard metrics",
    description = "Product count, average profit, average sales and treasure count over the filtered listings.",
    params(ListingFilterParams, ParameterOverrideParams),
    responses(
        (status = 200, description = "Dashboard metrics", body = DashboardMetrics),
        (status = 400, description = "Invalid filter or parameter", body = ErrorResponse),
    )
)]
pub async fn metrics(
    State(state): State<AppState>,
    Query(filter): Query<ListingFilterParams>,
    Query(overrides): Query<ParameterOverrideParams>,
) -> Result<impl IntoResponse, ResearchError> {
    let criteria = filter.criteria()?;
    let metrics = state
        .research_service
        .metrics(overrides.into(), &criteria)
        .await?;
    Ok(Json(metrics))
}

/// `GET /treasures`: Treasure listings.
///
/// # Errors
///
/// Returns [`ResearchError`] on invalid overrides.
#[utoipa::path(
    get,
    path = "/api/v1/treasures",
    tag = "Analytics",
    summary = "Treasure listings",
    description = "Listings with profit >= 500, sales >= 100 and rating >= 4.5, most profitable first.",
    params(LatestParams, ParameterOverrideParams),
    responses(
        (status = 200, description = "Treasure listings", body = ListingListResponse),
        (status = 400, description = "Invalid parameter", body = ErrorResponse),
    )
)]
pub async fn treasures(
    State(state): State<AppState>,
    Query(scope): Query<LatestParams>,
    Query(overrides): Query<ParameterOverrideParams>,
) -> Result<impl IntoResponse, ResearchError> {
    let found = state
        .research_service
        .treasures(overrides.into(), scope.latest)
        .await?;
    Ok(Json(ListingListResponse::from(found)))
}

/// Analytics routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/aggregate", get(aggregate))
        .route("/analytics/categories", get(categories))
        .route("/analytics/metrics", get(metrics))
        .route("/treasures", get(treasures))
}

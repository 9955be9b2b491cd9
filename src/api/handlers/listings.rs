//! Listing handlers: filtered view and per-listing assistant.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    AssistantParams, AssistantResponse, ListingFilterParams, ListingListResponse,
    ListingSortParams, ParameterOverrideParams,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, ResearchError};
use crate::service::ListingQuery;

/// `GET /listings`: Filtered and ranked listings.
///
/// # Errors
///
/// Returns [`ResearchError`] on an unknown keyword or invalid overrides.
#[utoipa::path(
    get,
    path = "/api/v1/listings",
    tag = "Listings",
    summary = "List listings",
    description = "Filters listings by keyword, profit, sales and rating, then ranks them. Parameter overrides apply to this request only.",
    params(ListingFilterParams, ListingSortParams, ParameterOverrideParams),
    responses(
        (status = 200, description = "Ranked listings", body = ListingListResponse),
        (status = 400, description = "Invalid filter or parameter", body = ErrorResponse),
    )
)]
pub async fn list_listings(
    State(state): State<AppState>,
    Query(filter): Query<ListingFilterParams>,
    Query(sort): Query<ListingSortParams>,
    Query(overrides): Query<ParameterOverrideParams>,
) -> Result<impl IntoResponse, ResearchError> {
    let query = ListingQuery {
        criteria: filter.criteria()?,
        sort: sort.sort,
        direction: sort.direction,
        limit: sort.limit,
    };
    let listings = state
        .research_service
        .listings(overrides.into(), &query)
        .await?;
    Ok(Json(ListingListResponse::from(listings)))
}

/// `GET /listings/{index}/assistant`: Pricing help and listing copy.
///
/// # Errors
///
/// Returns [`ResearchError::ListingNotFound`] for an unknown index.
#[utoipa::path(
    get,
    path = "/api/v1/listings/{index}/assistant",
    tag = "Listings",
    summary = "Listing assistant",
    description = "Recommends a premium price from the category minimum, simulates profit at that price and generates a description with hashtags.",
    params(
        ("index" = usize, Path, description = "Store index of the listing"),
        AssistantParams,
        ParameterOverrideParams,
    ),
    responses(
        (status = 200, description = "Assistant output", body = AssistantResponse),
        (status = 400, description = "Invalid premium rate or parameter", body = ErrorResponse),
        (status = 404, description = "Listing not found", body = ErrorResponse),
    )
)]
pub async fn listing_assistant(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Query(assistant): Query<AssistantParams>,
    Query(overrides): Query<ParameterOverrideParams>,
) -> Result<impl IntoResponse, ResearchError> {
    let result = state
        .research_service
        .assistant(index, assistant.premium_rate, overrides.into())
        .await?;
    Ok(Json(AssistantResponse::from(result)))
}

/// Listing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/listings", get(list_listings))
        .route("/listings/{index}/assistant", get(listing_assistant))
}

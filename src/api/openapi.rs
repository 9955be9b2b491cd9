//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::dto::{
    AggregateResponse, AssistantResponse, CategoryListResponse, KeywordInfo, ListingDto,
    ListingListResponse, RefreshRequest,
};
use crate::api::handlers::{analytics, ingest, listings, parameters, system};
use crate::domain::pricing::{PremiumQuote, ProfitSimulation};
use crate::domain::{
    AggregateOp, CategorySummary, DashboardMetrics, Keyword, Metric, ParameterSet, SortDirection,
    SortKey,
};
use crate::error::{ErrorBody, ErrorResponse};
use crate::ingest::FetchMode;
use crate::service::RefreshReport;

/// Generated API description, served at `/api-docs/openapi.json`.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "resale-research",
        description = "Marketplace listing research: profit estimates, rankings and treasure detection."
    ),
    paths(
        system::health_handler,
        system::keywords_handler,
        parameters::get_parameters,
        parameters::put_parameters,
        listings::list_listings,
        listings::listing_assistant,
        analytics::aggregate,
        analytics::categories,
        analytics::metrics,
        analytics::treasures,
        ingest::refresh,
    ),
    components(schemas(
        ErrorResponse,
        ErrorBody,
        ParameterSet,
        Keyword,
        SortKey,
        SortDirection,
        Metric,
        AggregateOp,
        FetchMode,
        ListingDto,
        ListingListResponse,
        AssistantResponse,
        PremiumQuote,
        ProfitSimulation,
        AggregateResponse,
        CategorySummary,
        CategoryListResponse,
        DashboardMetrics,
        KeywordInfo,
        RefreshRequest,
        RefreshReport,
        system::HealthResponse,
    )),
    tags(
        (name = "System", description = "Health and catalog"),
        (name = "Parameters", description = "Profit model parameters"),
        (name = "Listings", description = "Listing views and assistant"),
        (name = "Analytics", description = "Aggregates, summaries and treasures"),
        (name = "Ingestion", description = "Fetching new batches"),
    )
)]
pub struct ApiDoc;

//! DTOs for analytics and ingestion endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{AggregateOp, CategorySummary, Keyword, Metric};
use crate::ingest::FetchMode;

/// Aggregate selection.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AggregateParams {
    /// Metric to reduce. Defaults to `profit`.
    #[serde(default)]
    pub metric: Metric,
    /// Reduction. Defaults to `sum`.
    #[serde(default)]
    pub op: AggregateOp,
}

/// Keyword → aggregated value. Keywords absent from the view are omitted.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AggregateResponse {
    /// Metric reduced.
    pub metric: Metric,
    /// Reduction applied.
    pub op: AggregateOp,
    /// One value per keyword present in the view.
    #[schema(value_type = BTreeMap<String, f64>)]
    pub values: BTreeMap<Keyword, f64>,
}

/// Category summaries, highest total sales first.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryListResponse {
    /// Summaries.
    pub data: Vec<CategorySummary>,
}

/// Body of `POST /refresh`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RefreshRequest {
    /// Source chain to use. Defaults to `sample`.
    #[serde(default)]
    pub mode: FetchMode,
    /// Keywords to fetch. Empty or omitted means all.
    #[serde(default)]
    pub keywords: Vec<Keyword>,
}

/// One supported category.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct KeywordInfo {
    /// Identifier used in requests and responses.
    pub keyword: Keyword,
    /// Marketplace search term.
    pub search_term: &'static str,
    /// Whether the category is food.
    pub food: bool,
}

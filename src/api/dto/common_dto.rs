//! Query parameters shared by several endpoints.

use std::collections::BTreeSet;

use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{FilterCriteria, Keyword, ParameterOverrides};
use crate::error::ResearchError;

/// Per-request parameter overrides. Omitted fields keep the session value.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ParameterOverrideParams {
    /// Exchange rate for this request only.
    pub exchange_rate: Option<f64>,
    /// Fee rate for this request only.
    pub fee_rate: Option<f64>,
    /// Fixed cost for this request only.
    pub fixed_cost: Option<f64>,
    /// Cost rate for this request only.
    pub cost_rate: Option<f64>,
}

impl From<ParameterOverrideParams> for ParameterOverrides {
    fn from(params: ParameterOverrideParams) -> Self {
        Self {
            exchange_rate: params.exchange_rate,
            fee_rate: params.fee_rate,
            fixed_cost: params.fixed_cost,
            cost_rate: params.cost_rate,
        }
    }
}

/// Listing filter. Omitted fields do not restrict.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingFilterParams {
    /// Comma-separated keywords (search term or slug). Omit for all;
    /// an empty value selects none.
    pub keywords: Option<String>,
    /// Minimum estimated profit.
    pub min_profit: Option<f64>,
    /// Minimum units sold.
    pub min_sales: Option<u64>,
    /// Minimum shop rating; unknown ratings compare as 0.
    pub min_rating: Option<f64>,
}

impl ListingFilterParams {
    /// Converts to engine criteria.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::InvalidRequest`] for an unknown keyword or a
    /// NaN bound.
    pub fn criteria(&self) -> Result<FilterCriteria, ResearchError> {
        let defaults = FilterCriteria::default();
        let keywords = match &self.keywords {
            None => defaults.keywords,
            Some(list) => parse_keywords(list)?,
        };
        let min_profit = bound("min_profit", self.min_profit, defaults.min_profit)?;
        let min_rating = bound("min_rating", self.min_rating, defaults.min_rating)?;
        Ok(FilterCriteria {
            keywords,
            min_profit,
            min_sales: self.min_sales.unwrap_or(defaults.min_sales),
            min_rating,
        })
    }
}

/// Whether a view covers only the most recent fetch.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LatestParams {
    /// Restrict to the latest batch. Defaults to `false`.
    #[serde(default)]
    pub latest: bool,
}

/// Parses a comma-separated keyword list, ignoring blank entries.
///
/// # Errors
///
/// Returns [`ResearchError::InvalidRequest`] naming the first unknown entry.
pub fn parse_keywords(list: &str) -> Result<BTreeSet<Keyword>, ResearchError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Keyword>()
                .map_err(|err| ResearchError::InvalidRequest(err.to_string()))
        })
        .collect()
}

fn bound(name: &str, value: Option<f64>, default: f64) -> Result<f64, ResearchError> {
    match value {
        Some(v) if v.is_nan() => Err(ResearchError::InvalidRequest(format!(
            "{name} must be a number"
        ))),
        Some(v) => Ok(v),
        None => Ok(default),
    }
}

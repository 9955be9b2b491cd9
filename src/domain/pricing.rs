//! Premium-price recommendation and profit simulation for one listing.

use serde::Serialize;
use utoipa::ToSchema;

use super::Keyword;
use super::listing::{ListingRecord, Price};
use super::params::{ParameterSet, is_unit_interval};
use super::profit;
use crate::error::{ParameterError, SchemaError};

/// Default markup over the category's cheapest competitor.
pub const DEFAULT_PREMIUM_RATE: f64 = 0.08;

/// Competitor price reference for a category, source currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct PremiumQuote {
    /// Cheapest listing in the category.
    pub min: f64,
    /// Mean listing price in the category.
    pub avg: f64,
    /// Recommended price: `min × (1 + premium_rate)`.
    pub premium: f64,
}

/// Prices the category `keyword` across `records`.
///
/// Falls back to `own_price` for `min` and `avg` when the category has no
/// records.
///
/// # Errors
///
/// Returns [`ParameterError::PremiumRate`] if `premium_rate` is outside
/// `[0, 1]`.
#[allow(clippy::cast_precision_loss)]
pub fn premium_quote<'a>(
    records: impl IntoIterator<Item = &'a ListingRecord>,
    keyword: Keyword,
    own_price: f64,
    premium_rate: f64,
) -> Result<PremiumQuote, ParameterError> {
    if !is_unit_interval(premium_rate) {
        return Err(ParameterError::PremiumRate(premium_rate));
    }
    let mut min = f64::INFINITY;
    let mut total = 0.0;
    let mut count = 0usize;
    for record in records.into_iter().filter(|r| r.keyword() == keyword) {
        min = min.min(record.price());
        total += record.price();
        count += 1;
    }
    let (min, avg) = if count == 0 {
        (own_price, own_price)
    } else {
        (min, total / count as f64)
    };
    Ok(PremiumQuote {
        min,
        avg,
        premium: min * (1.0 + premium_rate),
    })
}

/// Estimated profit at the listing's own price versus the recommended one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct ProfitSimulation {
    /// Profit at the current price.
    pub current_profit: f64,
    /// Profit at the premium price.
    pub premium_profit: f64,
    /// `premium_profit − current_profit`.
    pub delta: f64,
}

/// Runs the profit model at both prices.
///
/// # Errors
///
/// Returns a [`SchemaError`] if the quote's premium price is not a valid
/// price.
pub fn simulate_profit(
    quote: &PremiumQuote,
    current_price: Price,
    params: &ParameterSet,
) -> Result<ProfitSimulation, SchemaError> {
    let current_profit = profit::derive(current_price, params).estimated_profit;
    let premium_profit = profit::derive(Price::new(quote.premium)?, params).estimated_profit;
    Ok(ProfitSimulation {
        current_profit,
        premium_profit,
        delta: premium_profit - current_profit,
    })
}

//! Financial assumptions the profit model is evaluated under.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ParameterError;

/// Default TWD → JPY rate.
pub const DEFAULT_EXCHANGE_RATE: f64 = 4.8;
/// Default marketplace sales fee.
pub const DEFAULT_FEE_RATE: f64 = 0.10;
/// Default shipping and packing cost per item, in JPY.
pub const DEFAULT_FIXED_COST: f64 = 200.0;
/// Default cost of goods as a share of the converted price.
pub const DEFAULT_COST_RATE: f64 = 0.50;

/// The four tunable assumptions behind every derived profit figure.
///
/// A plain value: sessions own one, requests may carry their own. Nothing
/// reads it from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParameterSet {
    /// Home-currency units per source-currency unit. Must be > 0.
    pub exchange_rate: f64,
    /// Share of revenue taken by the marketplace, in `[0, 1]`.
    pub fee_rate: f64,
    /// Per-item fixed cost in home currency. Normally ≥ 0.
    pub fixed_cost: f64,
    /// Estimated cost of goods as a share of converted price, in `[0, 1]`.
    pub cost_rate: f64,
}

impl ParameterSet {
    /// Builds and validates a parameter set.
    ///
    /// # Errors
    ///
    /// Returns the [`ParameterError`] for the first out-of-domain value.
    pub fn new(
        exchange_rate: f64,
        fee_rate: f64,
        fixed_cost: f64,
        cost_rate: f64,
    ) -> Result<Self, ParameterError> {
        let params = Self {
            exchange_rate,
            fee_rate,
            fixed_cost,
            cost_rate,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks every value against its domain.
    ///
    /// # Errors
    ///
    /// Returns the [`ParameterError`] for the first out-of-domain value.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !self.exchange_rate.is_finite() || self.exchange_rate <= 0.0 {
            return Err(ParameterError::ExchangeRate(self.exchange_rate));
        }
        if !is_unit_interval(self.fee_rate) {
            return Err(ParameterError::FeeRate(self.fee_rate));
        }
        if !self.fixed_cost.is_finite() {
            return Err(ParameterError::FixedCost(self.fixed_cost));
        }
        if !is_unit_interval(self.cost_rate) {
            return Err(ParameterError::CostRate(self.cost_rate));
        }
        Ok(())
    }

    /// Returns a copy with any provided field replaced, validated.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the merged set is out of domain.
    pub fn with_overrides(
        &self,
        exchange_rate: Option<f64>,
        fee_rate: Option<f64>,
        fixed_cost: Option<f64>,
        cost_rate: Option<f64>,
    ) -> Result<Self, ParameterError> {
        Self::new(
            exchange_rate.unwrap_or(self.exchange_rate),
            fee_rate.unwrap_or(self.fee_rate),
            fixed_cost.unwrap_or(self.fixed_cost),
            cost_rate.unwrap_or(self.cost_rate),
        )
    }
}

/// Optional per-request replacements for individual parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParameterOverrides {
    /// Replacement exchange rate.
    pub exchange_rate: Option<f64>,
    /// Replacement fee rate.
    pub fee_rate: Option<f64>,
    /// Replacement fixed cost.
    pub fixed_cost: Option<f64>,
    /// Replacement cost rate.
    pub cost_rate: Option<f64>,
}

impl ParameterOverrides {
    /// `true` if no field is overridden.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.exchange_rate.is_none()
            && self.fee_rate.is_none()
            && self.fixed_cost.is_none()
            && self.cost_rate.is_none()
    }

    /// `base` with the overridden fields replaced.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the merged set is out of domain.
    pub fn apply(&self, base: &ParameterSet) -> Result<ParameterSet, ParameterError> {
        base.with_overrides(
            self.exchange_rate,
            self.fee_rate,
            self.fixed_cost,
            self.cost_rate,
        )
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            fee_rate: DEFAULT_FEE_RATE,
            fixed_cost: DEFAULT_FIXED_COST,
            cost_rate: DEFAULT_COST_RATE,
        }
    }
}

pub(crate) fn is_unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

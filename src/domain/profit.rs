//! Profit model: price and parameter set in, derived figures out.
//!
//! ```text
//! price_converted   = price × exchange_rate
//! revenue_after_fee = price_converted × (1 − fee_rate)
//! estimated_cost    = price_converted × cost_rate
//! estimated_profit  = revenue_after_fee − estimated_cost − fixed_cost
//! ```
//!
//! Evaluation order is fixed and nothing is rounded, so the same inputs give
//! bit-identical outputs. Rounding is left to whoever displays the numbers.

use serde::Serialize;
use utoipa::ToSchema;

use super::listing::Price;
use super::params::ParameterSet;

/// Derived financial fields for one listing, in home currency.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, ToSchema)]
pub struct ProfitBreakdown {
    /// Price converted to home currency.
    pub price_converted: f64,
    /// Converted price net of the marketplace fee.
    pub revenue_after_fee: f64,
    /// Estimated cost of goods.
    pub estimated_cost: f64,
    /// Revenue after fee minus cost of goods minus fixed cost.
    pub estimated_profit: f64,
}

/// Evaluates the profit model. Total over every valid [`Price`].
#[must_use]
pub fn derive(price: Price, params: &ParameterSet) -> ProfitBreakdown {
    let price_converted = price.get() * params.exchange_rate;
    let revenue_after_fee = price_converted * (1.0 - params.fee_rate);
    let estimated_cost = price_converted * params.cost_rate;
    let estimated_profit = revenue_after_fee - estimated_cost - params.fixed_cost;
    ProfitBreakdown {
        price_converted,
        revenue_after_fee,
        estimated_cost,
        estimated_profit,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn price(v: f64) -> Price {
        let Ok(p) = Price::new(v) else {
            panic!("valid price");
        };
        p
    }

    #[test]
    fn reference_example() {
        let out = derive(price(1000.0), &ParameterSet::default());
        assert!((out.price_converted - 4800.0).abs() < 1e-9);
        assert!((out.revenue_after_fee - 4320.0).abs() < 1e-9);
        assert!((out.estimated_cost - 2400.0).abs() < 1e-9);
        assert!((out.estimated_profit - 1720.0).abs() < 1e-9);
    }

    #[test]
    fn deterministic_bitwise() {
        let params = ParameterSet {
            exchange_rate: 4.73,
            fee_rate: 0.137,
            fixed_cost: 212.5,
            cost_rate: 0.41,
        };
        let a = derive(price(1234.56), &params);
        let b = derive(price(1234.56), &params);
        assert_eq!(
            a.estimated_profit.to_bits(),
            b.estimated_profit.to_bits()
        );
        assert_eq!(a.price_converted.to_bits(), b.price_converted.to_bits());
    }

    #[test]
    fn zero_price_costs_the_fixed_cost() {
        let out = derive(price(0.0), &ParameterSet::default());
        assert_eq!(out.price_converted, 0.0);
        assert!((out.estimated_profit + 200.0).abs() < 1e-9);
    }

    #[test]
    fn no_rounding_applied() {
        let out = derive(price(0.5), &ParameterSet::default());
        // 0.5 × 4.8 = 2.4; 2.4 × 0.9 = 2.16; 2.4 × 0.5 = 1.2
        assert!((out.estimated_profit - (2.16 - 1.2 - 200.0)).abs() < 1e-9);
    }
}

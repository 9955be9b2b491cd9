//! Treasure classifier: fixed thresholds marking high-opportunity listings.

use std::borrow::Borrow;

use super::engine::{self, SortDirection, SortKey};
use super::listing::ListingRecord;

/// Minimum estimated profit, home currency.
pub const TREASURE_MIN_PROFIT: f64 = 500.0;
/// Minimum units sold.
pub const TREASURE_MIN_SALES: u64 = 100;
/// Minimum shop rating.
pub const TREASURE_MIN_RATING: f64 = 4.5;

/// `true` when profit, sales and rating all reach their thresholds.
///
/// Reads the record's derived profit, so it must have been derived under the
/// parameter set the caller cares about.
#[must_use]
pub fn is_treasure(record: &ListingRecord) -> bool {
    record.estimated_profit() >= TREASURE_MIN_PROFIT
        && record.sales() >= TREASURE_MIN_SALES
        && record.rating() >= TREASURE_MIN_RATING
}

/// Treasure records from `subset`, most profitable first.
#[must_use]
pub fn treasures<R: Borrow<ListingRecord>>(subset: impl IntoIterator<Item = R>) -> Vec<R> {
    let found = subset
        .into_iter()
        .filter(|r| is_treasure(r.borrow()))
        .collect();
    engine::rank(found, SortKey::Profit, SortDirection::Descending, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Keyword;
    use crate::domain::test_support::{record, record_with_profit};

    #[test]
    fn boundary_values_are_treasure() {
        let r = record_with_profit(Keyword::Coffee, 500.0, 100, 4.5);
        assert!(is_treasure(&r));
    }

    #[test]
    fn just_below_any_threshold_is_not() {
        assert!(!is_treasure(&record_with_profit(Keyword::Coffee, 499.99, 100, 4.5)));
        assert!(!is_treasure(&record_with_profit(Keyword::Coffee, 500.0, 99, 4.5)));
        assert!(!is_treasure(&record_with_profit(Keyword::Coffee, 500.0, 100, 4.4)));
    }

    #[test]
    fn unknown_rating_is_never_treasure() {
        assert!(!is_treasure(&record_with_profit(Keyword::Coffee, 9000.0, 9000, 0.0)));
    }

    #[test]
    fn coffee_scenario() {
        let records = [
            record(Keyword::Coffee, 300.0, 50, 4.0),
            record(Keyword::Coffee, 500.0, 150, 4.6),
            record(Keyword::Coffee, 800.0, 300, 4.8),
        ];
        let flags: Vec<bool> = records.iter().map(is_treasure).collect();
        assert_eq!(flags, vec![false, true, true]);

        let found = treasures(&records);
        let prices: Vec<f64> = found.iter().map(|r| r.price()).collect();
        assert_eq!(prices, vec![800.0, 500.0]);
    }
}

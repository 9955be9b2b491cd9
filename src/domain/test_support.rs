//! Builders shared by the domain unit tests.

#![allow(clippy::panic)]

use chrono::NaiveDateTime;

use super::listing::{Listing, ListingRecord, Price, ShopRating, TIMESTAMP_FORMAT};
use super::{Keyword, ParameterSet};

pub(crate) fn timestamp(s: &str) -> NaiveDateTime {
    let Ok(ts) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT) else {
        panic!("bad test timestamp {s}");
    };
    ts
}

pub(crate) fn listing_at(
    ts: NaiveDateTime,
    keyword: Keyword,
    price: f64,
    sales: u64,
    rating: f64,
) -> Listing {
    let Ok(price) = Price::new(price) else {
        panic!("bad test price {price}");
    };
    let Ok(rating) = ShopRating::from_reported(rating) else {
        panic!("bad test rating {rating}");
    };
    Listing::new(ts, keyword, "テスト商品", price, sales, rating)
}

pub(crate) fn listing(keyword: Keyword, price: f64, sales: u64, rating: f64) -> Listing {
    listing_at(timestamp("2025-01-15 10:30:00"), keyword, price, sales, rating)
}

pub(crate) fn record(keyword: Keyword, price: f64, sales: u64, rating: f64) -> ListingRecord {
    ListingRecord::new(listing(keyword, price, sales, rating), &ParameterSet::default())
}

/// Parameters under which `estimated_profit == price - 1000` exactly for
/// representable prices.
pub(crate) const PASS_THROUGH: ParameterSet = ParameterSet {
    exchange_rate: 1.0,
    fee_rate: 0.0,
    fixed_cost: 1000.0,
    cost_rate: 0.0,
};

/// Record whose profit is `profit` under [`PASS_THROUGH`]. `profit` must be
/// at least -1000.
pub(crate) fn record_with_profit(
    keyword: Keyword,
    profit: f64,
    sales: u64,
    rating: f64,
) -> ListingRecord {
    ListingRecord::new(listing(keyword, profit + 1000.0, sales, rating), &PASS_THROUGH)
}

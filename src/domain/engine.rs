//! Filter, rank and aggregate over derived listing records.
//!
//! All three are free functions over explicit inputs. They borrow records,
//! never mutate them, and treat an empty input as an ordinary case: the
//! result is simply empty.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Keyword;
use super::listing::ListingRecord;

/// Conjunctive filter predicate.
///
/// `Default` restricts nothing: every keyword, `min_profit = -∞`,
/// `min_sales = 0`, `min_rating = -∞`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Allowed categories. Empty means nothing passes.
    pub keywords: BTreeSet<Keyword>,
    /// Inclusive lower bound on estimated profit.
    pub min_profit: f64,
    /// Inclusive lower bound on units sold.
    pub min_sales: u64,
    /// Inclusive lower bound on rating (unknown compares as 0).
    pub min_rating: f64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            keywords: Keyword::ALL.into_iter().collect(),
            min_profit: f64::NEG_INFINITY,
            min_sales: 0,
            min_rating: f64::NEG_INFINITY,
        }
    }
}

impl FilterCriteria {
    /// `true` iff `record` meets all four conditions.
    #[must_use]
    pub fn matches(&self, record: &ListingRecord) -> bool {
        self.keywords.contains(&record.keyword())
            && record.estimated_profit() >= self.min_profit
            && record.sales() >= self.min_sales
            && record.rating() >= self.min_rating
    }
}

/// Field a ranking sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Estimated profit.
    #[default]
    Profit,
    /// Units sold.
    Sales,
    /// Source-currency price.
    Price,
    /// Shop rating.
    Rating,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Largest first.
    #[default]
    Descending,
    /// Smallest first.
    Ascending,
}

/// Numeric field an aggregate is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Estimated profit.
    #[default]
    Profit,
    /// Units sold.
    Sales,
    /// Source-currency price.
    Price,
    /// Shop rating (unknown counts as 0).
    Rating,
}

impl Metric {
    /// Reads this metric from a record.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(self, record: &ListingRecord) -> f64 {
        match self {
            Self::Profit => record.estimated_profit(),
            Self::Sales => record.sales() as f64,
            Self::Price => record.price(),
            Self::Rating => record.rating(),
        }
    }
}

/// Reduction applied per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AggregateOp {
    /// Sum of the metric.
    #[default]
    Sum,
    /// Arithmetic mean of the metric.
    Mean,
}

/// A record paired with its insertion index in the store.
#[derive(Debug, Clone, Copy)]
pub struct Indexed<'a> {
    /// Position in the store.
    pub index: usize,
    /// The record itself.
    pub record: &'a ListingRecord,
}

impl Borrow<ListingRecord> for Indexed<'_> {
    fn borrow(&self) -> &ListingRecord {
        self.record
    }
}

/// Records that satisfy `criteria`, in input order.
#[must_use]
pub fn filter<'a>(
    records: impl IntoIterator<Item = &'a ListingRecord>,
    criteria: &FilterCriteria,
) -> Vec<&'a ListingRecord> {
    records
        .into_iter()
        .filter(|record| criteria.matches(record))
        .collect()
}

/// Stable sort by `key`, then truncation to `limit`.
///
/// Records with equal keys keep their input order in either direction.
/// A `limit` at or above the input length changes nothing.
#[must_use]
pub fn rank<R: Borrow<ListingRecord>>(
    mut subset: Vec<R>,
    key: SortKey,
    direction: SortDirection,
    limit: Option<usize>,
) -> Vec<R> {
    subset.sort_by(|a, b| {
        let ord = compare_by(key, a.borrow(), b.borrow());
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    if let Some(limit) = limit {
        subset.truncate(limit);
    }
    subset
}

fn compare_by(key: SortKey, a: &ListingRecord, b: &ListingRecord) -> Ordering {
    match key {
        SortKey::Profit => a.estimated_profit().total_cmp(&b.estimated_profit()),
        SortKey::Sales => a.sales().cmp(&b.sales()),
        SortKey::Price => a.price().total_cmp(&b.price()),
        SortKey::Rating => a.rating().total_cmp(&b.rating()),
    }
}

/// Groups by keyword and reduces `metric` with `op`.
///
/// Only keywords present in `subset` appear in the result; absent keywords
/// are missing rather than zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn aggregate<'a>(
    subset: impl IntoIterator<Item = &'a ListingRecord>,
    metric: Metric,
    op: AggregateOp,
) -> BTreeMap<Keyword, f64> {
    let mut groups: BTreeMap<Keyword, (f64, usize)> = BTreeMap::new();
    for record in subset {
        let entry = groups.entry(record.keyword()).or_insert((0.0, 0));
        entry.0 += metric.value(record);
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(keyword, (sum, count))| {
            let value = match op {
                AggregateOp::Sum => sum,
                AggregateOp::Mean => sum / count as f64,
            };
            (keyword, value)
        })
        .collect()
}

//! Per-category statistics and headline dashboard counters.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::Keyword;
use super::listing::ListingRecord;
use super::treasure::is_treasure;

/// Statistics for one category.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategorySummary {
    /// Category.
    pub keyword: Keyword,
    /// Number of records.
    pub count: usize,
    /// Mean source-currency price.
    pub avg_price: f64,
    /// Sum of units sold.
    pub total_sales: u64,
    /// Mean units sold.
    pub avg_sales: f64,
    /// Mean rating, unknown counted as 0.
    pub avg_rating: f64,
    /// Highest units sold.
    pub max_sales: u64,
    /// Mean estimated profit.
    pub avg_profit: f64,
}

#[derive(Default)]
struct Accumulator {
    count: usize,
    price: f64,
    sales: u64,
    rating: f64,
    max_sales: u64,
    profit: f64,
}

/// One summary per category present in `subset`, best sellers first.
///
/// Categories with equal total sales keep keyword order.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize_categories<'a>(
    subset: impl IntoIterator<Item = &'a ListingRecord>,
) -> Vec<CategorySummary> {
    let mut groups: BTreeMap<Keyword, Accumulator> = BTreeMap::new();
    for record in subset {
        let acc = groups.entry(record.keyword()).or_default();
        acc.count += 1;
        acc.price += record.price();
        acc.sales = acc.sales.saturating_add(record.sales());
        acc.rating += record.rating();
        acc.max_sales = acc.max_sales.max(record.sales());
        acc.profit += record.estimated_profit();
    }

    let mut summaries: Vec<CategorySummary> = groups
        .into_iter()
        .map(|(keyword, acc)| {
            let n = acc.count as f64;
            CategorySummary {
                keyword,
                count: acc.count,
                avg_price: acc.price / n,
                total_sales: acc.sales,
                avg_sales: acc.sales as f64 / n,
                avg_rating: acc.rating / n,
                max_sales: acc.max_sales,
                avg_profit: acc.profit / n,
            }
        })
        .collect();
    summaries.sort_by(|a, b| b.total_sales.cmp(&a.total_sales));
    summaries
}

/// Headline counters for a filtered view.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardMetrics {
    /// Number of records in view.
    pub products: usize,
    /// Mean estimated profit; `None` when the view is empty.
    pub avg_profit: Option<f64>,
    /// Mean units sold; `None` when the view is empty.
    pub avg_sales: Option<f64>,
    /// Records passing the treasure classifier.
    pub treasure_count: usize,
}

impl DashboardMetrics {
    /// Computes the counters over `subset`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute<'a>(subset: impl IntoIterator<Item = &'a ListingRecord>) -> Self {
        let mut products = 0usize;
        let mut profit = 0.0;
        let mut sales = 0.0;
        let mut treasure_count = 0usize;
        for record in subset {
            products += 1;
            profit += record.estimated_profit();
            sales += record.sales() as f64;
            if is_treasure(record) {
                treasure_count += 1;
            }
        }
        let mean = |total: f64| (products > 0).then(|| total / products as f64);
        Self {
            products,
            avg_profit: mean(profit),
            avg_sales: mean(sales),
            treasure_count,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::test_support::record;

    #[test]
    fn summaries_ordered_by_total_sales() {
        let records = [
            record(Keyword::Coffee, 300.0, 50, 4.0),
            record(Keyword::Coffee, 500.0, 150, 4.6),
            record(Keyword::Snacks, 100.0, 1000, 4.2),
            record(Keyword::Beauty, 900.0, 10, 0.0),
        ];
        let summaries = summarize_categories(&records);
        let order: Vec<Keyword> = summaries.iter().map(|s| s.keyword).collect();
        assert_eq!(order, vec![Keyword::Snacks, Keyword::Coffee, Keyword::Beauty]);

        let Some(coffee) = summaries.get(1) else {
            panic!("missing coffee summary");
        };
        assert_eq!(coffee.count, 2);
        assert_eq!(coffee.total_sales, 200);
        assert_eq!(coffee.max_sales, 150);
        assert!((coffee.avg_price - 400.0).abs() < 1e-9);
        assert!((coffee.avg_sales - 100.0).abs() < 1e-9);
        assert!((coffee.avg_rating - 4.3).abs() < 1e-9);
        // (376 + 760) / 2
        assert!((coffee.avg_profit - 568.0).abs() < 1e-9);

        let Some(beauty) = summaries.get(2) else {
            panic!("missing beauty summary");
        };
        assert_eq!(beauty.avg_rating, 0.0);
    }

    #[test]
    fn empty_subset_has_no_summaries() {
        assert!(summarize_categories(&Vec::<ListingRecord>::new()).is_empty());
    }

    #[test]
    fn dashboard_metrics() {
        let records = [
            record(Keyword::Coffee, 300.0, 50, 4.0),
            record(Keyword::Coffee, 500.0, 150, 4.6),
            record(Keyword::Coffee, 800.0, 300, 4.8),
        ];
        let metrics = DashboardMetrics::compute(&records);
        assert_eq!(metrics.products, 3);
        assert_eq!(metrics.treasure_count, 2);
        let Some(avg_profit) = metrics.avg_profit else {
            panic!("expected average profit");
        };
        assert!((avg_profit - 824.0).abs() < 1e-9);
        assert_eq!(metrics.avg_sales, Some(500.0 / 3.0));
    }

    #[test]
    fn dashboard_metrics_empty() {
        let metrics = DashboardMetrics::compute(&Vec::<ListingRecord>::new());
        assert_eq!(metrics.products, 0);
        assert_eq!(metrics.avg_profit, None);
        assert_eq!(metrics.avg_sales, None);
        assert_eq!(metrics.treasure_count, 0);
    }
}

//! Marketplace search payloads captured to disk.
//!
//! The marketplace reports prices in units of 1/100000 TWD and nests the
//! interesting fields under `item_basic` in some API versions.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::source::{ListingSource, SourceError};
use crate::domain::{Keyword, RawListing};

/// Marketplace price scale.
const PRICE_SCALE: f64 = 100_000.0;

/// Placeholder the marketplace uses for an absent title.
const MISSING_NAME: &str = "N/A";

/// Extracts raw listings from one search response.
///
/// Items are read from `items` or `data.items`. Items without a usable name
/// are skipped. Price and sales fall back to their secondary key and stay
/// missing when neither key is present, so admission rejects the item. A
/// missing rating reads as 0, which admission turns into an unknown rating.
/// Prices are rounded to whole dollars and ratings to one decimal.
#[must_use]
pub fn parse_search_response(payload: &Value, keyword: Keyword) -> Vec<RawListing> {
    let items = payload
        .get("items")
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .or_else(|| payload.pointer("/data/items").and_then(Value::as_array));

    let Some(items) = items else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let basic = item.get("item_basic").unwrap_or(item);
            let name = basic.get("name").and_then(Value::as_str)?.trim();
            if name.is_empty() || name == MISSING_NAME {
                return None;
            }

            let price = first_reported(basic, "price", "price_min").map(|p| p / PRICE_SCALE);
            let sales = first_reported(basic, "sold", "historical_sold");
            let rating = non_zero(basic, "shop_rating")
                .or_else(|| {
                    basic
                        .pointer("/item_rating/rating_star")
                        .and_then(Value::as_f64)
                })
                .unwrap_or(0.0);

            Some(RawListing {
                timestamp: None,
                keyword: Some(keyword.search_term().to_string()),
                name: Some(name.to_string()),
                price: price.map(|p| p.round().to_string()),
                sales: sales.map(|s| s.to_string()),
                shop_rating: Some(((rating * 10.0).round() / 10.0).to_string()),
            })
        })
        .collect()
}

/// `primary` when non-zero, else `secondary`, else a reported zero `primary`.
fn first_reported(object: &Value, primary: &str, secondary: &str) -> Option<f64> {
    non_zero(object, primary)
        .or_else(|| object.get(secondary).and_then(Value::as_f64))
        .or_else(|| object.get(primary).and_then(Value::as_f64))
}

fn non_zero(object: &Value, key: &str) -> Option<f64> {
    object
        .get(key)
        .and_then(Value::as_f64)
        .filter(|v| *v != 0.0)
}

/// Reads `<dir>/<slug>.json` search payloads.
#[derive(Debug, Clone)]
pub struct SnapshotDirSource {
    dir: PathBuf,
}

impl SnapshotDirSource {
    /// Source over payloads stored in `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory this source reads from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, keyword: Keyword) -> PathBuf {
        self.dir.join(format!("{}.json", keyword.slug()))
    }
}

impl ListingSource for SnapshotDirSource {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn fetch(&self, keyword: Keyword, limit: usize) -> Result<Vec<RawListing>, SourceError> {
        let path = self.path_for(keyword);
        if !path.exists() {
            return Err(SourceError::Unavailable(keyword));
        }
        let content = std::fs::read_to_string(&path).map_err(|source| SourceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let payload: Value = serde_json::from_str(&content)?;
        let mut raws = parse_search_response(&payload, keyword);
        raws.truncate(limit);
        Ok(raws)
    }
}

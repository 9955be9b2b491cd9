//! Fixed search-category enumeration.
//!
//! Every listing is discovered under exactly one [`Keyword`]. The set is
//! closed: a string that names none of the six categories cannot become a
//! `Keyword`, so downstream lookups are exhaustive matches rather than
//! runtime string tables with a fallback.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Search category a listing was found under.
///
/// Ordering follows declaration order, which is also the order of
/// [`Keyword::ALL`] and of every keyword-keyed map the engine returns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Keyword {
    /// Japanese snacks.
    Snacks,
    /// Japanese instant noodles.
    InstantNoodles,
    /// Japanese seasonings.
    Seasonings,
    /// Japanese coffee.
    Coffee,
    /// Japanese household goods.
    HouseholdGoods,
    /// Japanese beauty products.
    Beauty,
}

impl Keyword {
    /// All categories in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Snacks,
        Self::InstantNoodles,
        Self::Seasonings,
        Self::Coffee,
        Self::HouseholdGoods,
        Self::Beauty,
    ];

    /// Marketplace search term, also the label persisted in the flat file.
    #[must_use]
    pub const fn search_term(self) -> &'static str {
        match self {
            Self::Snacks => "日本 零食",
            Self::InstantNoodles => "日本 泡麵",
            Self::Seasonings => "日本 調味料",
            Self::Coffee => "日本 咖啡",
            Self::HouseholdGoods => "日本 生活用品",
            Self::Beauty => "日本 美容",
        }
    }

    /// ASCII identifier used in URLs, query strings and snapshot file names.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Snacks => "snacks",
            Self::InstantNoodles => "instant_noodles",
            Self::Seasonings => "seasonings",
            Self::Coffee => "coffee",
            Self::HouseholdGoods => "household_goods",
            Self::Beauty => "beauty",
        }
    }

    /// Whether the category sells consumables with an expiry date.
    #[must_use]
    pub const fn is_food(self) -> bool {
        matches!(
            self,
            Self::Snacks | Self::InstantNoodles | Self::Seasonings | Self::Coffee
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Returned when a string names none of the configured categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized keyword: {0:?}")]
pub struct UnknownKeyword(pub String);

impl FromStr for Keyword {
    type Err = UnknownKeyword;

    /// Accepts either the search term or the slug, ignoring surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.search_term() == trimmed || k.slug() == trimmed)
            .ok_or_else(|| UnknownKeyword(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_term_and_slug() {
        assert_eq!("日本 咖啡".parse::<Keyword>().ok(), Some(Keyword::Coffee));
        assert_eq!("coffee".parse::<Keyword>().ok(), Some(Keyword::Coffee));
        assert_eq!(
            " household_goods ".parse::<Keyword>().ok(),
            Some(Keyword::HouseholdGoods)
        );
    }

    #[test]
    fn rejects_unknown_label() {
        let Err(err) = "日本 酒".parse::<Keyword>() else {
            panic!("unknown label must not parse");
        };
        assert_eq!(err, UnknownKeyword("日本 酒".to_string()));
    }

    #[test]
    fn labels_are_unique() {
        let mut terms: Vec<_> = Keyword::ALL.iter().map(|k| k.search_term()).collect();
        terms.sort_unstable();
        terms.dedup();
        assert_eq!(terms.len(), Keyword::ALL.len());
    }

    #[test]
    fn serde_uses_slug() {
        let Ok(json) = serde_json::to_string(&Keyword::InstantNoodles) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "\"instant_noodles\"");
    }

    #[test]
    fn food_categories() {
        assert!(Keyword::Coffee.is_food());
        assert!(!Keyword::Beauty.is_food());
        assert!(!Keyword::HouseholdGoods.is_food());
    }
}

//! Listing records: raw ingestion shape, admitted observation, derived view.
//!
//! A [`RawListing`] carries the six required columns as optional text,
//! exactly as an ingestion source or the flat file hands them over.
//! [`Listing::admit`] validates the schema shape and produces an immutable
//! observation; [`ListingRecord`] pairs it with the profit breakdown for the
//! active parameter set.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

use super::Keyword;
use super::params::ParameterSet;
use super::profit::{self, ProfitBreakdown};
use crate::error::{ListingField, SchemaError};

/// Display titles are cut to this many characters at creation.
pub const NAME_MAX_CHARS: usize = 100;

/// Persisted timestamp layout.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const MAX_RATING: f64 = 5.0;

/// Listing price in the source currency: finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Validates a price.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Invalid`] for negative, NaN or infinite values.
    pub fn new(value: f64) -> Result<Self, SchemaError> {
        if !value.is_finite() {
            return Err(SchemaError::invalid(
                ListingField::Price,
                value.to_string(),
                "price must be a finite number",
            ));
        }
        if value < 0.0 {
            return Err(SchemaError::invalid(
                ListingField::Price,
                value.to_string(),
                "price must not be negative",
            ));
        }
        Ok(Self(value))
    }

    /// Raw value.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

/// Seller rating.
///
/// Sources report `0` both for "no rating yet" and, in principle, for a true
/// zero. A reported zero is read as [`ShopRating::Unknown`]. Comparisons
/// (filters, ranking, aggregates) see an unknown rating as `0.0`, so it
/// passes an unrestricted rating filter and fails any positive threshold.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ShopRating {
    /// No usable rating was reported.
    #[default]
    Unknown,
    /// A rating in `(0, 5]`.
    Rated(f64),
}

impl ShopRating {
    /// Interprets a reported rating.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Invalid`] for values outside `[0, 5]` or NaN.
    pub fn from_reported(value: f64) -> Result<Self, SchemaError> {
        if !(0.0..=MAX_RATING).contains(&value) {
            return Err(SchemaError::invalid(
                ListingField::ShopRating,
                value.to_string(),
                "rating must be within [0, 5]",
            ));
        }
        if value == 0.0 {
            Ok(Self::Unknown)
        } else {
            Ok(Self::Rated(value))
        }
    }

    /// Value used for comparisons and aggregation.
    #[must_use]
    pub const fn comparable(self) -> f64 {
        match self {
            Self::Unknown => 0.0,
            Self::Rated(value) => value,
        }
    }

    /// `Some(rating)` if known.
    #[must_use]
    pub const fn known(self) -> Option<f64> {
        match self {
            Self::Unknown => None,
            Self::Rated(value) => Some(value),
        }
    }
}

impl Serialize for ShopRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.known().serialize(serializer)
    }
}

/// A record as delivered by an ingestion source, before validation.
///
/// Every field is optional text so that missing columns and non-numeric
/// values are detected by [`Listing::admit`] rather than by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawListing {
    /// Capture time, [`TIMESTAMP_FORMAT`] or RFC 3339.
    pub timestamp: Option<String>,
    /// Category search term or slug.
    pub keyword: Option<String>,
    /// Display title.
    pub name: Option<String>,
    /// Decimal price.
    pub price: Option<String>,
    /// Integer unit count.
    pub sales: Option<String>,
    /// Decimal rating.
    pub shop_rating: Option<String>,
}

/// One admitted marketplace observation. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    timestamp: NaiveDateTime,
    keyword: Keyword,
    name: String,
    price: Price,
    sales: u64,
    shop_rating: ShopRating,
}

impl Listing {
    /// Builds an observation from already-typed values, truncating `name`
    /// to [`NAME_MAX_CHARS`].
    #[must_use]
    pub fn new(
        timestamp: NaiveDateTime,
        keyword: Keyword,
        name: &str,
        price: Price,
        sales: u64,
        shop_rating: ShopRating,
    ) -> Self {
        Self {
            timestamp,
            keyword,
            name: name.chars().take(NAME_MAX_CHARS).collect(),
            price,
            sales,
            shop_rating,
        }
    }

    /// Validates the six-field schema shape of a raw record.
    ///
    /// Nothing is coerced: a blank field is missing, a malformed one is
    /// invalid.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found, checking fields in column
    /// order.
    pub fn admit(raw: &RawListing) -> Result<Self, SchemaError> {
        let timestamp = parse_timestamp(required(raw.timestamp.as_deref(), ListingField::Timestamp)?)?;

        let keyword_raw = required(raw.keyword.as_deref(), ListingField::Keyword)?;
        let keyword = keyword_raw.parse::<Keyword>().map_err(|_| {
            SchemaError::invalid(ListingField::Keyword, keyword_raw, "not a configured category")
        })?;

        let name = required(raw.name.as_deref(), ListingField::Name)?;

        let price_raw = required(raw.price.as_deref(), ListingField::Price)?;
        let price = Price::new(parse_number(price_raw, ListingField::Price)?)?;

        let sales = parse_sales(required(raw.sales.as_deref(), ListingField::Sales)?)?;

        let rating_raw = required(raw.shop_rating.as_deref(), ListingField::ShopRating)?;
        let shop_rating =
            ShopRating::from_reported(parse_number(rating_raw, ListingField::ShopRating)?)?;

        Ok(Self::new(timestamp, keyword, name, price, sales, shop_rating))
    }

    /// Capture time.
    #[must_use]
    pub const fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Category.
    #[must_use]
    pub const fn keyword(&self) -> Keyword {
        self.keyword
    }

    /// Truncated display title.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source-currency price.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Reported units sold.
    #[must_use]
    pub const fn sales(&self) -> u64 {
        self.sales
    }

    /// Seller rating.
    #[must_use]
    pub const fn shop_rating(&self) -> ShopRating {
        self.shop_rating
    }

    /// Renders the observation back into raw text columns.
    #[must_use]
    pub fn to_raw(&self) -> RawListing {
        RawListing {
            timestamp: Some(self.timestamp.format(TIMESTAMP_FORMAT).to_string()),
            keyword: Some(self.keyword.search_term().to_string()),
            name: Some(self.name.clone()),
            price: Some(self.price.get().to_string()),
            sales: Some(self.sales.to_string()),
            shop_rating: Some(self.shop_rating.comparable().to_string()),
        }
    }
}

/// An observation together with its derived profit figures.
///
/// The breakdown is only ever replaced as a whole, by
/// [`ListingRecord::rederive`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRecord {
    #[serde(flatten)]
    listing: Listing,
    #[serde(flatten)]
    derived: ProfitBreakdown,
}

impl ListingRecord {
    /// Derives the breakdown for `listing` under `params`.
    #[must_use]
    pub fn new(listing: Listing, params: &ParameterSet) -> Self {
        let derived = profit::derive(listing.price(), params);
        Self { listing, derived }
    }

    /// Replaces the derived breakdown.
    pub(crate) fn rederive(&mut self, params: &ParameterSet) {
        self.derived = profit::derive(self.listing.price(), params);
    }

    /// Observed fields.
    #[must_use]
    pub const fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Derived fields for the parameter set last applied.
    #[must_use]
    pub const fn derived(&self) -> &ProfitBreakdown {
        &self.derived
    }

    /// Shorthand for `derived().estimated_profit`.
    #[must_use]
    pub const fn estimated_profit(&self) -> f64 {
        self.derived.estimated_profit
    }

    /// Shorthand for `listing().keyword()`.
    #[must_use]
    pub const fn keyword(&self) -> Keyword {
        self.listing.keyword
    }

    /// Shorthand for `listing().sales()`.
    #[must_use]
    pub const fn sales(&self) -> u64 {
        self.listing.sales
    }

    /// Shorthand for `listing().price().get()`.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.listing.price.get()
    }

    /// Shorthand for `listing().shop_rating().comparable()`.
    #[must_use]
    pub const fn rating(&self) -> f64 {
        self.listing.shop_rating.comparable()
    }
}

fn required(value: Option<&str>, field: ListingField) -> Result<&str, SchemaError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(SchemaError::Missing(field)),
    }
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, SchemaError> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT)
        .or_else(|_| {
            chrono::DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.naive_local())
        })
        .map_err(|_| SchemaError::invalid(ListingField::Timestamp, raw, "unrecognized timestamp"))
}

fn parse_number(raw: &str, field: ListingField) -> Result<f64, SchemaError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| SchemaError::invalid(field, raw, "not a number"))
}

/// Accepts plain integers and integral decimals such as `"150.0"`, which
/// spreadsheet round-trips tend to produce.
fn parse_sales(raw: &str) -> Result<u64, SchemaError> {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<u64>() {
        return Ok(n);
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| SchemaError::invalid(ListingField::Sales, raw, "not an integer"))?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(SchemaError::invalid(
            ListingField::Sales,
            raw,
            "sales must be a non-negative integer",
        ));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(value as u64)
}

//! DTOs for listing, treasure and assistant endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::listing::TIMESTAMP_FORMAT;
use crate::domain::pricing::{PremiumQuote, ProfitSimulation};
use crate::domain::{Keyword, SortDirection, SortKey};
use crate::service::{ListingAssistant, RankedListing};

/// Ordering and truncation of a listing view.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingSortParams {
    /// Sort key. Defaults to `profit`.
    #[serde(default)]
    pub sort: SortKey,
    /// Sort direction. Defaults to `descending`.
    #[serde(default)]
    pub direction: SortDirection,
    /// Maximum number of results.
    pub limit: Option<usize>,
}

/// Assistant tuning.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssistantParams {
    /// Markup over the category minimum, in `[0, 1]`. Defaults to 0.08.
    pub premium_rate: Option<f64>,
}

/// One listing with its derived figures.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListingDto {
    /// Store index; use it to address the listing.
    pub index: usize,
    /// Capture time, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    /// Category.
    pub keyword: Keyword,
    /// Display title.
    pub name: String,
    /// Listing price, TWD.
    pub price: f64,
    /// Units sold.
    pub sales: u64,
    /// Shop rating; `null` when the marketplace reported none.
    pub shop_rating: Option<f64>,
    /// Price converted to JPY.
    pub price_converted: f64,
    /// Converted price net of the sales fee.
    pub revenue_after_fee: f64,
    /// Estimated cost of goods.
    pub estimated_cost: f64,
    /// Estimated profit per unit.
    pub estimated_profit: f64,
    /// Whether the listing is a treasure.
    pub treasure: bool,
}

impl From<RankedListing> for ListingDto {
    fn from(ranked: RankedListing) -> Self {
        let listing = ranked.record.listing();
        let derived = ranked.record.derived();
        Self {
            index: ranked.index,
            timestamp: listing.timestamp().format(TIMESTAMP_FORMAT).to_string(),
            keyword: listing.keyword(),
            name: listing.name().to_string(),
            price: listing.price().get(),
            sales: listing.sales(),
            shop_rating: listing.shop_rating().known(),
            price_converted: derived.price_converted,
            revenue_after_fee: derived.revenue_after_fee,
            estimated_cost: derived.estimated_cost,
            estimated_profit: derived.estimated_profit,
            treasure: ranked.treasure,
        }
    }
}

/// A list of listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListingListResponse {
    /// Listings in ranked order.
    pub data: Vec<ListingDto>,
    /// Number of listings returned.
    pub count: usize,
}

impl From<Vec<RankedListing>> for ListingListResponse {
    fn from(listings: Vec<RankedListing>) -> Self {
        let data: Vec<ListingDto> = listings.into_iter().map(ListingDto::from).collect();
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Pricing help and generated copy for one listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssistantResponse {
    /// The listing.
    pub listing: ListingDto,
    /// Category price reference.
    pub quote: PremiumQuote,
    /// Profit at the current and recommended price.
    pub simulation: ProfitSimulation,
    /// Product description.
    pub description: String,
    /// Hashtags, base set first.
    pub hashtags: Vec<String>,
}

impl From<ListingAssistant> for AssistantResponse {
    fn from(assistant: ListingAssistant) -> Self {
        Self {
            listing: ListingDto::from(assistant.listing),
            quote: assistant.quote,
            simulation: assistant.simulation,
            description: assistant.description,
            hashtags: assistant
                .hashtags
                .into_iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

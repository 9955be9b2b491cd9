//! Domain layer: listing model, profit model and the analysis engine.
//!
//! Everything here is synchronous and free of I/O. Records enter through
//! [`admit_batch`], live in a [`ListingStore`] owned by a [`Session`], and
//! are analysed by the free functions in [`engine`], [`treasure`],
//! [`summary`], [`pricing`] and [`listing_copy`].

pub mod batch;
pub mod batch_id;
pub mod engine;
pub mod keyword;
pub mod listing;
pub mod listing_copy;
pub mod params;
pub mod pricing;
pub mod profit;
pub mod session;
pub mod store;
pub mod summary;
pub mod treasure;

#[cfg(test)]
pub(crate) mod test_support;

pub use batch::{Admission, FetchBatch, RejectedRecord, admit_batch};
pub use batch_id::BatchId;
pub use engine::{AggregateOp, FilterCriteria, Indexed, Metric, SortDirection, SortKey};
pub use keyword::Keyword;
pub use listing::{Listing, ListingRecord, Price, RawListing, ShopRating};
pub use params::{ParameterOverrides, ParameterSet};
pub use profit::ProfitBreakdown;
pub use session::Session;
pub use store::ListingStore;
pub use summary::{CategorySummary, DashboardMetrics};
pub use treasure::{is_treasure, treasures};

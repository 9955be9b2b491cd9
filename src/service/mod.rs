//! Service layer: use-case orchestration.
//!
//! [`ResearchService`] owns the shared session behind an async lock, runs
//! ingestion off the async executor, and appends fetched batches to the
//! history file.

pub mod research_service;

pub use research_service::{
    HistoryReport, ListingAssistant, ListingQuery, RankedListing, RefreshReport, ResearchService,
    StoreStatus,
};

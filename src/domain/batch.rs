//! Fetch batches: the unit in which listings enter the store.

use chrono::NaiveDateTime;

use super::BatchId;
use super::listing::{Listing, RawListing};
use crate::error::SchemaError;

/// Listings admitted from one ingestion run.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchBatch {
    /// Identity used for append deduplication.
    pub id: BatchId,
    /// When the run happened.
    pub fetched_at: NaiveDateTime,
    /// Admitted listings in source order.
    pub listings: Vec<Listing>,
}

impl FetchBatch {
    /// Wraps already-admitted listings in a fresh batch.
    #[must_use]
    pub fn new(fetched_at: NaiveDateTime, listings: Vec<Listing>) -> Self {
        Self {
            id: BatchId::new(),
            fetched_at,
            listings,
        }
    }

    /// Number of listings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// `true` if the batch carries no listings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

/// A raw record that failed admission.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    /// Position of the record in the input sequence.
    pub index: usize,
    /// Why it was rejected.
    pub error: SchemaError,
}

/// Outcome of admitting a sequence of raw records.
#[derive(Debug, Clone, PartialEq)]
pub struct Admission {
    /// Batch holding every record that passed validation.
    pub batch: FetchBatch,
    /// Records that did not.
    pub rejected: Vec<RejectedRecord>,
}

impl Admission {
    /// Number of rejected records.
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Validates each raw record independently; one bad record never blocks
/// the rest.
#[must_use]
pub fn admit_batch<'a>(
    raws: impl IntoIterator<Item = &'a RawListing>,
    fetched_at: NaiveDateTime,
) -> Admission {
    let mut listings = Vec::new();
    let mut rejected = Vec::new();
    for (index, raw) in raws.into_iter().enumerate() {
        match Listing::admit(raw) {
            Ok(listing) => listings.push(listing),
            Err(error) => rejected.push(RejectedRecord { index, error }),
        }
    }
    if !rejected.is_empty() {
        tracing::warn!(
            admitted = listings.len(),
            rejected = rejected.len(),
            "rejected raw listings during admission"
        );
    }
    Admission {
        batch: FetchBatch::new(fetched_at, listings),
        rejected,
    }
}

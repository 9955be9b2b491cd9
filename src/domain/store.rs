//! Insertion-ordered listing store.
//!
//! [`ListingStore`] only changes in two ways: a whole [`FetchBatch`] is
//! appended, or every record's derived fields are replaced by
//! [`ListingStore::recompute`]. Records are never removed or edited one by
//! one.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use super::BatchId;
use super::batch::FetchBatch;
use super::engine::Indexed;
use super::listing::ListingRecord;
use super::params::ParameterSet;
use crate::error::{ParameterError, StoreError};

/// Ordered collection of listing records.
///
/// No primary key: two identical observations are both kept and addressed
/// by their insertion index.
#[derive(Debug, Clone, Default)]
pub struct ListingStore {
    records: Vec<ListingRecord>,
    batches: HashSet<BatchId>,
}

impl ListingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every listing of `batch`, deriving it under `params`.
    ///
    /// Returns the number of records appended.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateBatch`] if this batch id was
    /// appended before; the store is left untouched.
    pub fn append(
        &mut self,
        batch: FetchBatch,
        params: &ParameterSet,
    ) -> Result<usize, StoreError> {
        if !self.batches.insert(batch.id) {
            return Err(StoreError::DuplicateBatch(batch.id));
        }
        let count = batch.listings.len();
        self.records.reserve(count);
        self.records.extend(
            batch
                .listings
                .into_iter()
                .map(|listing| ListingRecord::new(listing, params)),
        );
        tracing::debug!(batch = %batch.id, count, total = self.records.len(), "batch appended");
        Ok(count)
    }

    /// Replaces the derived fields of every record.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if `params` is out of domain. Validation
    /// happens before any record is touched.
    pub fn recompute(&mut self, params: &ParameterSet) -> Result<(), ParameterError> {
        params.validate()?;
        for record in &mut self.records {
            record.rederive(params);
        }
        Ok(())
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    /// Record at insertion index `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ListingRecord> {
        self.records.get(index)
    }

    /// Every record with its insertion index.
    pub fn indexed(&self) -> impl Iterator<Item = Indexed<'_>> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| Indexed { index, record })
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct batches appended.
    #[must_use]
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// Most recent capture time across all records.
    #[must_use]
    pub fn latest_timestamp(&self) -> Option<NaiveDateTime> {
        self.records.iter().map(|r| r.listing().timestamp()).max()
    }

    /// Records captured at the latest timestamp, in insertion order.
    ///
    /// One fetch run stamps all its listings with the same time, so this is
    /// the most recent run.
    #[must_use]
    pub fn latest_batch(&self) -> Vec<Indexed<'_>> {
        let Some(latest) = self.latest_timestamp() else {
            return Vec::new();
        };
        self.indexed()
            .filter(|i| i.record.listing().timestamp() == latest)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Keyword;
    use crate::domain::test_support::{listing, listing_at, timestamp};

    fn coffee_batch() -> FetchBatch {
        FetchBatch::new(
            timestamp("2025-01-15 10:30:00"),
            vec![
                listing(Keyword::Coffee, 300.0, 50, 4.0),
                listing(Keyword::Coffee, 500.0, 150, 4.6),
                listing(Keyword::Coffee, 800.0, 300, 4.8),
            ],
        )
    }

    #[test]
    fn append_derives_with_given_params() {
        let mut store = ListingStore::new();
        let Ok(count) = store.append(coffee_batch(), &ParameterSet::default()) else {
            panic!("append failed");
        };
        assert_eq!(count, 3);

        let profits: Vec<f64> = store.records().iter().map(|r| r.estimated_profit()).collect();
        let expected = [376.0, 760.0, 1336.0];
        for (got, want) in profits.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
    }

    #[test]
    fn duplicate_batch_rejected_without_mutation() {
        let mut store = ListingStore::new();
        let batch = coffee_batch();
        let _ = store.append(batch.clone(), &ParameterSet::default());

        let result = store.append(batch, &ParameterSet::default());
        assert!(matches!(result, Err(StoreError::DuplicateBatch(_))));
        assert_eq!(store.len(), 3);
        assert_eq!(store.batch_count(), 1);
    }

    #[test]
    fn identical_records_are_both_kept() {
        let mut store = ListingStore::new();
        let ts = timestamp("2025-01-15 10:30:00");
        let same = listing(Keyword::Snacks, 100.0, 10, 4.0);
        let batch = FetchBatch::new(ts, vec![same.clone(), same]);
        let _ = store.append(batch, &ParameterSet::default());
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0), store.get(1));
    }

    #[test]
    fn recompute_replaces_all_derived_fields() {
        let mut store = ListingStore::new();
        let _ = store.append(coffee_batch(), &ParameterSet::default());

        let params = ParameterSet {
            exchange_rate: 5.0,
            fee_rate: 0.0,
            fixed_cost: 0.0,
            cost_rate: 0.0,
        };
        assert!(store.recompute(&params).is_ok());
        for record in store.records() {
            assert!((record.estimated_profit() - record.price() * 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut store = ListingStore::new();
        let _ = store.append(coffee_batch(), &ParameterSet::default());
        let params = ParameterSet::default();

        let _ = store.recompute(&params);
        let first = store.records().to_vec();
        let _ = store.recompute(&params);
        assert_eq!(store.records(), first.as_slice());
    }

    #[test]
    fn invalid_params_leave_store_untouched() {
        let mut store = ListingStore::new();
        let _ = store.append(coffee_batch(), &ParameterSet::default());
        let before = store.records().to_vec();

        let bad = ParameterSet {
            fee_rate: 1.5,
            ..ParameterSet::default()
        };
        assert_eq!(store.recompute(&bad), Err(ParameterError::FeeRate(1.5)));
        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn latest_batch_selects_max_timestamp() {
        let mut store = ListingStore::new();
        let params = ParameterSet::default();
        let old = timestamp("2025-01-14 09:00:00");
        let new = timestamp("2025-01-15 09:00:00");
        let _ = store.append(
            FetchBatch::new(old, vec![listing_at(old, Keyword::Beauty, 100.0, 1, 4.0)]),
            &params,
        );
        let _ = store.append(
            FetchBatch::new(
                new,
                vec![
                    listing_at(new, Keyword::Beauty, 200.0, 1, 4.0),
                    listing_at(new, Keyword::Coffee, 300.0, 1, 4.0),
                ],
            ),
            &params,
        );

        assert_eq!(store.latest_timestamp(), Some(new));
        let latest = store.latest_batch();
        assert_eq!(latest.len(), 2);
        assert!(latest.iter().all(|i| i.record.listing().timestamp() == new));
        let indices: Vec<usize> = latest.iter().map(|i| i.index).collect();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn empty_store_has_no_latest_batch() {
        let store = ListingStore::new();
        assert!(store.latest_timestamp().is_none());
        assert!(store.latest_batch().is_empty());
    }
}

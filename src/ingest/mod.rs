//! Ingestion adapters.
//!
//! A run pulls raw listings for the requested keywords from a
//! [`SourceChain`], stamps them all with one capture time and hands them to
//! [`admit_batch`] so the result is a single [`FetchBatch`](crate::domain::FetchBatch).

pub mod marketplace;
pub mod sample;
pub mod source;

use std::path::PathBuf;

use chrono::NaiveDateTime;

pub use marketplace::{SnapshotDirSource, parse_search_response};
pub use sample::SampleCatalog;
pub use source::{FetchMode, ListingSource, SourceChain, SourceError};

use crate::domain::listing::TIMESTAMP_FORMAT;
use crate::domain::{Admission, Keyword, admit_batch};

/// Default cap on listings taken per keyword in one run.
pub const DEFAULT_PRODUCTS_PER_KEYWORD: usize = 30;

/// Builds source chains and runs ingestion over them.
#[derive(Debug, Clone)]
pub struct Ingestor {
    products_per_keyword: usize,
    snapshot_dir: Option<PathBuf>,
}

impl Ingestor {
    /// Creates an ingestor taking at most `products_per_keyword` listings
    /// per keyword, optionally reading captured payloads from `snapshot_dir`.
    #[must_use]
    pub fn new(products_per_keyword: usize, snapshot_dir: Option<PathBuf>) -> Self {
        Self {
            products_per_keyword,
            snapshot_dir,
        }
    }

    /// Per-keyword cap.
    #[must_use]
    pub const fn products_per_keyword(&self) -> usize {
        self.products_per_keyword
    }

    /// Source chain for `mode`.
    ///
    /// [`FetchMode::Live`] reads captured payloads and uses the sample
    /// catalog only when no keyword yields a live listing. Without a
    /// snapshot directory it degrades to the catalog alone.
    #[must_use]
    pub fn chain(&self, mode: FetchMode) -> SourceChain {
        match (mode, &self.snapshot_dir) {
            (FetchMode::Live, Some(dir)) => SourceChain::new()
                .then(SnapshotDirSource::new(dir.clone()))
                .then(SampleCatalog),
            (FetchMode::Live, None) => {
                tracing::warn!("live mode requested without a snapshot directory, using samples");
                SourceChain::new().then(SampleCatalog)
            }
            (FetchMode::Sample, _) => SourceChain::new().then(SampleCatalog),
        }
    }

    /// Fetches `keywords` from the first productive source and admits the
    /// result as one batch captured at `fetched_at`.
    #[must_use]
    pub fn run(&self, mode: FetchMode, keywords: &[Keyword], fetched_at: NaiveDateTime) -> Admission {
        let chain = self.chain(mode);
        let stamp = fetched_at.format(TIMESTAMP_FORMAT).to_string();

        let raws: Vec<_> = chain
            .fetch(keywords, self.products_per_keyword)
            .into_iter()
            .map(|mut raw| {
                raw.timestamp = Some(stamp.clone());
                raw
            })
            .collect();

        let admission = admit_batch(&raws, fetched_at);
        tracing::info!(
            batch_id = %admission.batch.id,
            ?mode,
            keywords = keywords.len(),
            admitted = admission.batch.len(),
            rejected = admission.rejected_count(),
            "ingestion run complete"
        );
        admission
    }
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new(DEFAULT_PRODUCTS_PER_KEYWORD, None)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::test_support::timestamp;

    #[test]
    fn sample_run_covers_every_keyword() {
        let fetched_at = timestamp("2025-01-15 10:30:00");
        let admission = Ingestor::default().run(FetchMode::Sample, &Keyword::ALL, fetched_at);
        assert_eq!(admission.rejected_count(), 0);
        assert!(!admission.batch.is_empty());
        for keyword in Keyword::ALL {
            assert!(
                admission.batch.listings.iter().any(|l| l.keyword() == keyword),
                "missing {keyword}"
            );
        }
        assert!(
            admission
                .batch
                .listings
                .iter()
                .all(|l| l.timestamp() == fetched_at)
        );
    }

    #[test]
    fn run_respects_per_keyword_cap() {
        let ingestor = Ingestor::new(2, None);
        let admission = ingestor.run(
            FetchMode::Sample,
            &[Keyword::Snacks, Keyword::Coffee],
            timestamp("2025-01-15 10:30:00"),
        );
        assert_eq!(admission.batch.len(), 4);
    }

    #[test]
    fn live_without_snapshots_falls_back_to_samples() {
        let ingestor = Ingestor::default();
        assert_eq!(ingestor.chain(FetchMode::Live).len(), 1);
        let admission = ingestor.run(
            FetchMode::Live,
            &[Keyword::Beauty],
            timestamp("2025-01-15 10:30:00"),
        );
        assert!(!admission.batch.is_empty());
    }

    #[test]
    fn partial_snapshots_never_mix_in_samples() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let payload = serde_json::json!({ "items": [
            { "item_basic": { "name": "snapshot item", "price": 50_000_000, "sold": 300, "shop_rating": 4.8 } }
        ]});
        let path = dir.path().join(format!("{}.json", Keyword::Coffee.slug()));
        let Ok(()) = std::fs::write(&path, payload.to_string()) else {
            panic!("write snapshot");
        };

        let ingestor = Ingestor::new(30, Some(dir.path().to_path_buf()));
        let admission = ingestor.run(
            FetchMode::Live,
            &[Keyword::Coffee, Keyword::Beauty],
            timestamp("2025-01-15 10:30:00"),
        );
        let rows: Vec<(Keyword, &str)> = admission
            .batch
            .listings
            .iter()
            .map(|l| (l.keyword(), l.name()))
            .collect();
        assert_eq!(rows, vec![(Keyword::Coffee, "snapshot item")]);
    }

    #[test]
    fn empty_snapshot_run_falls_back_to_samples() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let ingestor = Ingestor::new(30, Some(dir.path().to_path_buf()));
        assert_eq!(ingestor.chain(FetchMode::Live).len(), 2);
        let admission = ingestor.run(
            FetchMode::Live,
            &[Keyword::Beauty],
            timestamp("2025-01-15 10:30:00"),
        );
        assert!(!admission.batch.is_empty());
        assert!(
            admission
                .batch
                .listings
                .iter()
                .all(|l| l.keyword() == Keyword::Beauty)
        );
    }
}

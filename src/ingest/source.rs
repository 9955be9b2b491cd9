//! Listing sources and the ordered fallback chain over them.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Keyword, RawListing};

/// Why a source produced nothing for a keyword.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A file backing the source could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A payload was not valid JSON.
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The source has nothing for this keyword.
    #[error("no data for {0}")]
    Unavailable(Keyword),
}

/// Anything that can supply raw listings for a keyword.
///
/// Returned records need not carry a timestamp; the ingestor stamps the
/// whole run with one capture time.
pub trait ListingSource: fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetches at most `limit` raw listings for `keyword`.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] when the source cannot serve the keyword.
    fn fetch(&self, keyword: Keyword, limit: usize) -> Result<Vec<RawListing>, SourceError>;
}

/// Which source chain a refresh should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    /// Built-in sample catalog only.
    #[default]
    Sample,
    /// Captured marketplace payloads, falling back to the sample catalog.
    Live,
}

/// Sources tried in order until one yields listings for the run.
///
/// A source serves the whole keyword list before the next one is tried, so
/// one batch never mixes listings from different sources.
#[derive(Debug, Default)]
pub struct SourceChain {
    sources: Vec<Box<dyn ListingSource>>,
}

impl SourceChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a source at the lowest priority.
    #[must_use]
    pub fn then(mut self, source: impl ListingSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Number of sources in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// `true` if the chain has no sources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Listings for every keyword from the first source whose run is
    /// non-empty, at most `limit` per keyword. Empty once every source has
    /// come back with nothing.
    #[must_use]
    pub fn fetch(&self, keywords: &[Keyword], limit: usize) -> Vec<RawListing> {
        for source in &self.sources {
            let raws = run_source(source.as_ref(), keywords, limit);
            if !raws.is_empty() {
                tracing::info!(source = source.name(), count = raws.len(), "fetched listings");
                return raws;
            }
            tracing::warn!(source = source.name(), "source produced no listings, trying next");
        }
        tracing::warn!(keywords = keywords.len(), "every source exhausted");
        Vec::new()
    }
}

fn run_source(source: &dyn ListingSource, keywords: &[Keyword], limit: usize) -> Vec<RawListing> {
    let mut raws = Vec::new();
    for &keyword in keywords {
        match source.fetch(keyword, limit) {
            Ok(mut fetched) => {
                fetched.truncate(limit);
                tracing::debug!(source = source.name(), %keyword, count = fetched.len(), "keyword fetched");
                raws.extend(fetched.into_iter().map(|mut raw| {
                    raw.keyword
                        .get_or_insert_with(|| keyword.search_term().to_string());
                    raw
                }));
            }
            Err(err) => {
                tracing::warn!(source = source.name(), %keyword, error = %err, "keyword fetch failed");
            }
        }
    }
    raws
}

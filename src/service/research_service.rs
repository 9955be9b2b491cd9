//! Research service: owns the shared session and runs every use case.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::domain::engine::{self, Indexed};
use crate::domain::listing_copy;
use crate::domain::pricing::{self, DEFAULT_PREMIUM_RATE, PremiumQuote, ProfitSimulation};
use crate::domain::summary::summarize_categories;
use crate::domain::{
    AggregateOp, BatchId, CategorySummary, DashboardMetrics, FilterCriteria, Keyword,
    ListingRecord, Metric, ParameterOverrides, ParameterSet, Session, SortDirection, SortKey,
    is_treasure, treasures,
};
use crate::error::ResearchError;
use crate::ingest::{FetchMode, Ingestor};
use crate::persistence::CsvStore;

/// Filter, ordering and truncation for a listing view.
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    /// Conjunctive filter.
    pub criteria: FilterCriteria,
    /// Sort key.
    pub sort: SortKey,
    /// Sort direction.
    pub direction: SortDirection,
    /// Maximum number of results.
    pub limit: Option<usize>,
}

/// A record as shown to clients: store index, derived fields, treasure flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedListing {
    /// Insertion index in the store.
    pub index: usize,
    /// Observed and derived fields.
    pub record: ListingRecord,
    /// Whether the record passes the treasure classifier.
    pub treasure: bool,
}

impl From<Indexed<'_>> for RankedListing {
    fn from(indexed: Indexed<'_>) -> Self {
        Self {
            index: indexed.index,
            record: indexed.record.clone(),
            treasure: is_treasure(indexed.record),
        }
    }
}

/// Pricing help and generated copy for one listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingAssistant {
    /// The listing being assisted.
    pub listing: RankedListing,
    /// Category price reference.
    pub quote: PremiumQuote,
    /// Profit at the current and the recommended price.
    pub simulation: ProfitSimulation,
    /// Generated product description.
    pub description: String,
    /// Generated hashtags.
    pub hashtags: Vec<&'static str>,
}

/// Outcome of one refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RefreshReport {
    /// Id of the appended batch.
    #[schema(value_type = String, format = Uuid)]
    pub batch_id: BatchId,
    /// Listings appended to the store.
    pub admitted: usize,
    /// Raw listings rejected at admission.
    pub rejected: usize,
    /// Rows appended to the history file.
    pub persisted: usize,
    /// Store size after the refresh.
    pub total: usize,
}

/// Outcome of loading the history file at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryReport {
    /// Rows appended to the store.
    pub admitted: usize,
    /// Rows rejected at admission.
    pub rejected: usize,
    /// Rows the CSV reader could not tokenize.
    pub unreadable: usize,
}

/// Size and freshness of the listing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStatus {
    /// Records held.
    pub listings: usize,
    /// Batches appended since startup, counting the history load.
    pub batches: usize,
    /// Capture time of the most recent listing.
    pub latest_fetch: Option<NaiveDateTime>,
}

/// Coordinates the shared [`Session`], the ingestor and the history file.
///
/// Reads take the read lock and never mutate the session; a request with
/// parameter overrides works on its own recomputed copy. Parameter updates
/// and refreshes take the write lock.
#[derive(Debug, Clone)]
pub struct ResearchService {
    session: Arc<RwLock<Session>>,
    ingestor: Ingestor,
    history: Option<CsvStore>,
}

impl ResearchService {
    /// Creates a service around `session`.
    ///
    /// With `history` set, refreshed batches are appended to that file.
    #[must_use]
    pub fn new(session: Session, ingestor: Ingestor, history: Option<CsvStore>) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            ingestor,
            history,
        }
    }

    /// Loads the history file into the session as one batch.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Persistence`] if the file cannot be read.
    pub async fn load_history(&self) -> Result<HistoryReport, ResearchError> {
        let Some(history) = self.history.clone() else {
            return Ok(HistoryReport::default());
        };
        let loaded = tokio::task::spawn_blocking(move || history.load())
            .await
            .map_err(|err| ResearchError::Internal(err.to_string()))??;

        let rejected = loaded.admission.rejected_count();
        let admitted = if loaded.admission.batch.is_empty() {
            0
        } else {
            self.session.write().await.ingest(loaded.admission.batch)?
        };
        Ok(HistoryReport {
            admitted,
            rejected,
            unreadable: loaded.unreadable_rows,
        })
    }

    /// Current store size and latest capture time.
    pub async fn status(&self) -> StoreStatus {
        let session = self.session.read().await;
        let store = session.store();
        StoreStatus {
            listings: store.len(),
            batches: store.batch_count(),
            latest_fetch: store.latest_timestamp(),
        }
    }

    /// Active parameters.
    pub async fn parameters(&self) -> ParameterSet {
        *self.session.read().await.params()
    }

    /// Replaces the active parameters and recomputes every record.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Parameter`] if `params` is out of domain;
    /// nothing changes in that case.
    pub async fn set_parameters(&self, params: ParameterSet) -> Result<ParameterSet, ResearchError> {
        let mut session = self.session.write().await;
        session.set_parameters(params)?;
        tracing::info!(
            exchange_rate = params.exchange_rate,
            fee_rate = params.fee_rate,
            fixed_cost = params.fixed_cost,
            cost_rate = params.cost_rate,
            records = session.store().len(),
            "parameters updated"
        );
        Ok(params)
    }

    /// Filtered and ranked listings.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Parameter`] if the overrides are invalid.
    pub async fn listings(
        &self,
        overrides: ParameterOverrides,
        query: &ListingQuery,
    ) -> Result<Vec<RankedListing>, ResearchError> {
        self.read_with(overrides, |session| {
            let matching: Vec<Indexed<'_>> = session
                .store()
                .indexed()
                .filter(|i| query.criteria.matches(i.record))
                .collect();
            engine::rank(matching, query.sort, query.direction, query.limit)
                .into_iter()
                .map(RankedListing::from)
                .collect()
        })
        .await
    }

    /// Per-keyword aggregate over the filtered listings.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Parameter`] if the overrides are invalid.
    pub async fn aggregate(
        &self,
        overrides: ParameterOverrides,
        criteria: &FilterCriteria,
        metric: Metric,
        op: AggregateOp,
    ) -> Result<BTreeMap<Keyword, f64>, ResearchError> {
        self.read_with(overrides, |session| {
            let subset = engine::filter(session.store().records(), criteria);
            engine::aggregate(subset, metric, op)
        })
        .await
    }

    /// Category summaries over the whole store or the latest batch.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Parameter`] if the overrides are invalid.
    pub async fn categories(
        &self,
        overrides: ParameterOverrides,
        latest: bool,
    ) -> Result<Vec<CategorySummary>, ResearchError> {
        self.read_with(overrides, |session| {
            let store = session.store();
            if latest {
                summarize_categories(store.latest_batch().into_iter().map(|i| i.record))
            } else {
                summarize_categories(store.records())
            }
        })
        .await
    }

    /// Dashboard counters over the filtered listings.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Parameter`] if the overrides are invalid.
    pub async fn metrics(
        &self,
        overrides: ParameterOverrides,
        criteria: &FilterCriteria,
    ) -> Result<DashboardMetrics, ResearchError> {
        self.read_with(overrides, |session| {
            DashboardMetrics::compute(engine::filter(session.store().records(), criteria))
        })
        .await
    }

    /// Treasure listings, most profitable first.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Parameter`] if the overrides are invalid.
    pub async fn treasures(
        &self,
        overrides: ParameterOverrides,
        latest: bool,
    ) -> Result<Vec<RankedListing>, ResearchError> {
        self.read_with(overrides, |session| {
            let store = session.store();
            let candidates = if latest {
                store.latest_batch()
            } else {
                store.indexed().collect()
            };
            treasures(candidates)
                .into_iter()
                .map(RankedListing::from)
                .collect()
        })
        .await
    }

    /// Premium quote, profit simulation and listing copy for the record at
    /// `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::ListingNotFound`] for an unknown index and
    /// [`ResearchError::Parameter`] for invalid overrides or premium rate.
    pub async fn assistant(
        &self,
        index: usize,
        premium_rate: Option<f64>,
        overrides: ParameterOverrides,
    ) -> Result<ListingAssistant, ResearchError> {
        let premium_rate = premium_rate.unwrap_or(DEFAULT_PREMIUM_RATE);
        self.read_with(overrides, |session| -> Result<ListingAssistant, ResearchError> {
            let store = session.store();
            let record = store
                .get(index)
                .ok_or(ResearchError::ListingNotFound(index))?;
            let quote = pricing::premium_quote(
                store.records(),
                record.keyword(),
                record.price(),
                premium_rate,
            )?;
            let simulation =
                pricing::simulate_profit(&quote, record.listing().price(), session.params())?;
            Ok(ListingAssistant {
                listing: RankedListing::from(Indexed { index, record }),
                quote,
                simulation,
                description: listing_copy::describe(record),
                hashtags: listing_copy::hashtags(record.keyword()),
            })
        })
        .await?
    }

    /// Fetches `keywords` (all when empty), persists the batch and appends
    /// it to the session.
    ///
    /// The history file is written before the store so a persistence
    /// failure leaves the session unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Persistence`] if the history append fails.
    pub async fn refresh(
        &self,
        mode: FetchMode,
        keywords: &[Keyword],
    ) -> Result<RefreshReport, ResearchError> {
        let keywords = if keywords.is_empty() {
            Keyword::ALL.to_vec()
        } else {
            keywords.to_vec()
        };
        let ingestor = self.ingestor.clone();
        let fetched_at = chrono::Local::now().naive_local();
        let admission =
            tokio::task::spawn_blocking(move || ingestor.run(mode, &keywords, fetched_at))
                .await
                .map_err(|err| ResearchError::Internal(err.to_string()))?;

        let batch_id = admission.batch.id;
        let rejected = admission.rejected_count();

        let mut session = self.session.write().await;
        let persisted = match &self.history {
            Some(history) => {
                let history = history.clone();
                let listings = admission.batch.listings.clone();
                let params = *session.params();
                tokio::task::spawn_blocking(move || history.append(&listings, &params))
                    .await
                    .map_err(|err| ResearchError::Internal(err.to_string()))??
            }
            None => 0,
        };
        let admitted = session.ingest(admission.batch)?;
        let total = session.store().len();
        drop(session);

        tracing::info!(%batch_id, admitted, rejected, persisted, total, "refresh complete");
        Ok(RefreshReport {
            batch_id,
            admitted,
            rejected,
            persisted,
            total,
        })
    }

    /// Runs `f` against the shared session, or against a recomputed copy
    /// when `overrides` is non-empty.
    async fn read_with<T>(
        &self,
        overrides: ParameterOverrides,
        f: impl FnOnce(&Session) -> T,
    ) -> Result<T, ResearchError> {
        let session = self.session.read().await;
        if overrides.is_empty() {
            return Ok(f(&session));
        }
        let params = overrides.apply(session.params())?;
        let scoped = session.with_parameters(params)?;
        drop(session);
        Ok(f(&scoped))
    }
}

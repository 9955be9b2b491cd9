//! A research session: one listing store plus the parameter set it is
//! derived under.

use super::batch::FetchBatch;
use super::params::ParameterSet;
use super::store::ListingStore;
use crate::error::{ParameterError, StoreError};

/// Owns one [`ListingStore`] and its active [`ParameterSet`].
///
/// Every derived field in the store reflects `params`. Both change together
/// or not at all.
#[derive(Debug, Clone)]
pub struct Session {
    store: ListingStore,
    params: ParameterSet,
}

impl Session {
    /// Creates an empty session.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if `params` is out of domain.
    pub fn new(params: ParameterSet) -> Result<Self, ParameterError> {
        params.validate()?;
        Ok(Self {
            store: ListingStore::new(),
            params,
        })
    }

    /// Active parameters.
    #[must_use]
    pub const fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// The record store, derived under [`Session::params`].
    #[must_use]
    pub const fn store(&self) -> &ListingStore {
        &self.store
    }

    /// Switches to `params` and recomputes every record.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if `params` is out of domain; neither
    /// the parameters nor any derived field change in that case.
    pub fn set_parameters(&mut self, params: ParameterSet) -> Result<(), ParameterError> {
        self.store.recompute(&params)?;
        self.params = params;
        tracing::debug!(records = self.store.len(), "derived fields recomputed");
        Ok(())
    }

    /// Copy of this session recomputed under `params`. `self` is untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if `params` is out of domain.
    pub fn with_parameters(&self, params: ParameterSet) -> Result<Self, ParameterError> {
        if params == self.params {
            return Ok(self.clone());
        }
        let mut copy = self.clone();
        copy.set_parameters(params)?;
        Ok(copy)
    }

    /// Appends a batch, deriving it under the active parameters.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateBatch`] if the batch was already
    /// ingested.
    pub fn ingest(&mut self, batch: FetchBatch) -> Result<usize, StoreError> {
        self.store.append(batch, &self.params)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self {
            store: ListingStore::new(),
            params: ParameterSet::default(),
        }
    }
}

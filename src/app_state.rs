//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::ResearchService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Research service for all use cases.
    pub research_service: Arc<ResearchService>,
}

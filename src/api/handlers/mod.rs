//! REST endpoint handlers organized by resource.

pub mod analytics;
pub mod ingest;
pub mod listings;
pub mod parameters;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(listings::routes())
        .merge(analytics::routes())
        .merge(parameters::routes())
        .merge(ingest::routes())
}

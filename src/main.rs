//! resale-research server entry point.
//!
//! Loads the listing history, then starts the Axum HTTP server.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use resale_research::api;
use resale_research::app_state::AppState;
use resale_research::config::ResearchConfig;
use resale_research::domain::Session;
use resale_research::ingest::Ingestor;
use resale_research::persistence::CsvStore;
use resale_research::service::ResearchService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ResearchConfig::from_env()?;
    tracing::info!(
        addr = %config.listen_addr,
        data_file = %config.data_file.display(),
        persistence = config.persistence_enabled,
        "starting resale-research"
    );

    // Build service layer
    let session = Session::new(config.params)?;
    let ingestor = Ingestor::new(config.products_per_keyword, config.snapshot_dir.clone());
    let history = config
        .persistence_enabled
        .then(|| CsvStore::new(config.data_file.clone()));
    let research_service = Arc::new(ResearchService::new(session, ingestor, history));

    let loaded = research_service.load_history().await?;
    tracing::info!(
        admitted = loaded.admitted,
        rejected = loaded.rejected,
        unreadable = loaded.unreadable,
        "history ready"
    );

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { research_service });

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

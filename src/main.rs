// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use air_quality_index::application::aqi_service::AqiService;
use air_quality_index::infrastructure::config::load_settings;
use air_quality_index::presentation::app_state::AppState;
use air_quality_index::presentation::handlers::{
    assess, assess_series, health_check, list_pollutants, stream_series,
};

fn router(state: Arc<AppState>) -> Router {
    // Compression is applied per response in the JSON builders, so no
    // CompressionLayer here.
    Router::new()
        .route("/healthz", get(health_check))
        .route("/pollutants", get(list_pollutants))
        .route("/aqi", post(assess))
        .route("/aqi/series", post(assess_series))
        .route("/aqi/series/stream", post(stream_series))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let settings = load_settings()?;

    // Create services (application layer)
    let aqi_service = AqiService::new(&settings.aqi);

    // Create application state
    let state = Arc::new(AppState {
        aqi_service,
        compression: settings.server.compression,
    });

    // Start server
    let addr: SocketAddr = settings
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address: {}", settings.server.bind))?;
    tracing::info!(
        "Starting air-quality-index service on {} (locale={:?}, out_of_range={:?})",
        addr,
        settings.aqi.locale,
        settings.aqi.out_of_range
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}

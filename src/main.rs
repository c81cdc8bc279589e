// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use fuel_ledger::application::history_service::HistoryService;
use fuel_ledger::application::statistics_service::StatisticsService;
use fuel_ledger::application::vehicle_service::VehicleService;
use fuel_ledger::domain::display::DisplayFormatter;
use fuel_ledger::infrastructure::config::load_app_config;
use fuel_ledger::infrastructure::json_repository::JsonFileRepository;
use fuel_ledger::presentation::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let app_config = load_app_config()?;

    // Create repository (infrastructure layer)
    let today = chrono::Local::now().date_naive();
    let repository = Arc::new(JsonFileRepository::load(&app_config.store.path, today).await?);

    // Create services (application layer)
    let formatter = DisplayFormatter::new(app_config.preferences.clone());
    let vehicle_service = VehicleService::new(repository.clone());
    let history_service = HistoryService::new(
        repository.clone(),
        formatter.clone(),
        app_config.history.page_size,
    );
    let statistics_service =
        StatisticsService::new(repository.clone(), formatter, app_config.charts);

    // Create application state
    let state = Arc::new(AppState {
        vehicle_service,
        history_service,
        statistics_service,
    });

    // Build router (presentation layer)
    let router = fuel_ledger::presentation::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    // Start server
    let addr: SocketAddr = app_config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid server.bind address {:?}", app_config.server.bind))?;
    tracing::info!("Starting fuel-ledger service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}

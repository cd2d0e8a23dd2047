// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use farm_telemetry::application::calibration_service::CalibrationService;
use farm_telemetry::application::dashboard_service::DashboardService;
use farm_telemetry::application::telemetry_service::TelemetryService;
use farm_telemetry::infrastructure::config::load_app_config;
use farm_telemetry::infrastructure::file_repository::FileReadingRepository;
use farm_telemetry::presentation::app_state::AppState;
use farm_telemetry::presentation::handlers::{
    chart_history, chart_range, dashboard, get_calibration, health_check, table, table_export,
    update_calibration,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let app_config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(FileReadingRepository::new(&app_config.store.data_file));

    // Create services (application layer)
    let telemetry_service = TelemetryService::new(repository);
    let dashboard_service = DashboardService::new(telemetry_service.clone());
    let calibration_service = CalibrationService::new();

    // Create application state
    let state = Arc::new(AppState {
        telemetry_service,
        dashboard_service,
        calibration_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/chart", get(chart_history).post(chart_range))
        .route("/dashboard", get(dashboard))
        .route("/table", post(table))
        .route("/table/export", post(table_export))
        .route("/calibration", get(get_calibration).post(update_calibration))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = app_config.server.listen.parse()?;
    println!("Starting farm-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}

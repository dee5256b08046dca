use std::sync::Arc;

use anyhow::Error;
use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{clients::health::HealthChecker, config::Config, models::health::HealthStatus};

/// Liveness surface for the worker: a single route reporting whether the
/// message broker and the document store are reachable.
pub async fn run_api_server(config: Config) -> Result<(), Error> {
    let port = config.server_port;
    let checker = Arc::new(HealthChecker::new(config));

    let app = Router::new()
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(checker);

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;

    info!(port, "Health endpoint listening");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health(State(checker): State<Arc<HealthChecker>>) -> impl IntoResponse {
    let report = checker.check_all().await;

    let status_code = match report.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(report))
}

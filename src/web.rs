use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::StatusCode;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::{TripPlanner, api};

/// The full HTTP application: API routes under `/api` with CORS and a
/// per-request timeout
pub fn app(planner: Arc<TripPlanner>, request_timeout: Duration) -> Router {
    with_layers(Router::new().nest("/api", api::router(planner)), request_timeout)
}

/// Requests still running after `request_timeout` get 408
fn with_layers(router: Router, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(cors)
}

pub async fn run(planner: Arc<TripPlanner>, port: u16) -> Result<()> {
    let request_timeout = Duration::from_secs(planner.config().server.request_timeout_seconds);
    let app = app(planner, request_timeout);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);
    axum::serve(listener, app)
        .await
        .context("Web server stopped unexpectedly")?;
    Ok(())
}

pub mod api;
pub mod config;
pub mod storage;

use crate::api::{health_handler, AppError, AppState};
use axum::{error_handling::HandleErrorLayer, routing::get, BoxError, Router};
use std::time::Duration;
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the full HTTP surface over `state`
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(api::restaurant::routes())
        .merge(api::comment::routes())
        .merge(api::catalog::routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Answer requests still running after `timeout` with a JSON 408
pub fn with_request_timeout(router: Router, timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .layer(TimeoutLayer::new(timeout)),
    )
}

async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        AppError::RequestTimeout
    } else {
        AppError::Internal(format!("Unhandled middleware error: {}", err))
    }
}

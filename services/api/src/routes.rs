use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use fleet_dispatch::workflows::dispatch::{
    directory_router, dispatch_router, DispatcherDirectory, DispatcherService,
    FlightRequestRepository, FlightRequestService,
};
use serde_json::json;
use std::sync::Arc;

/// Compose the dispatch API with the operational endpoints.
pub(crate) fn with_dispatch_routes<R, D>(
    reviews: Arc<FlightRequestService<R, D>>,
    directory: Arc<DispatcherService<D>>,
) -> axum::Router
where
    R: FlightRequestRepository + 'static,
    D: DispatcherDirectory + 'static,
{
    dispatch_router(reviews)
        .merge(directory_router(directory))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

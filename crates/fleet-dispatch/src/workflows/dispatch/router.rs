use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::directory::{DispatcherService, DispatcherServiceError, NewDispatcher};
use super::domain::{DispatcherId, FlightRequestId, FlightRequestStatus};
use super::repository::{DispatcherDirectory, FlightRequestRepository};
use super::service::{FlightRequestService, FlightRequestServiceError};

/// Router builder exposing the review desk endpoints.
pub fn dispatch_router<R, D>(service: Arc<FlightRequestService<R, D>>) -> Router
where
    R: FlightRequestRepository + 'static,
    D: DispatcherDirectory + 'static,
{
    Router::new()
        .route("/api/v1/dispatch/requests", get(list_handler::<R, D>))
        .route(
            "/api/v1/dispatch/requests/:request_id",
            get(request_handler::<R, D>),
        )
        .route(
            "/api/v1/dispatch/requests/:request_id/review",
            post(review_handler::<R, D>),
        )
        .with_state(service)
}

/// Router builder exposing dispatcher account management.
pub fn directory_router<D>(service: Arc<DispatcherService<D>>) -> Router
where
    D: DispatcherDirectory + 'static,
{
    Router::new()
        .route(
            "/api/v1/dispatch/dispatchers",
            get(dispatchers_handler::<D>).post(create_dispatcher_handler::<D>),
        )
        .with_state(service)
}

/// Body of a review decision.
#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    pub dispatcher_id: String,
    pub status: FlightRequestStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    status: Option<String>,
}

pub(crate) async fn review_handler<R, D>(
    State(service): State<Arc<FlightRequestService<R, D>>>,
    Path(request_id): Path<i64>,
    axum::Json(body): axum::Json<ReviewBody>,
) -> Response
where
    R: FlightRequestRepository + 'static,
    D: DispatcherDirectory + 'static,
{
    let dispatcher_id = DispatcherId(body.dispatcher_id);
    match service
        .confirm_request(FlightRequestId(request_id), &dispatcher_id, body.status)
        .await
    {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => review_error_response(&error),
    }
}

pub(crate) async fn request_handler<R, D>(
    State(service): State<Arc<FlightRequestService<R, D>>>,
    Path(request_id): Path<i64>,
) -> Response
where
    R: FlightRequestRepository + 'static,
    D: DispatcherDirectory + 'static,
{
    match service.request_by_id(FlightRequestId(request_id)).await {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => review_error_response(&error),
    }
}

pub(crate) async fn list_handler<R, D>(
    State(service): State<Arc<FlightRequestService<R, D>>>,
    Query(params): Query<ListParams>,
) -> Response
where
    R: FlightRequestRepository + 'static,
    D: DispatcherDirectory + 'static,
{
    let filter = match params.status.as_deref() {
        None => None,
        Some(raw) => match FlightRequestStatus::from_label(raw) {
            Some(status) => Some(status),
            None => {
                let payload = json!({ "error": format!("unknown status '{raw}'") });
                return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
            }
        },
    };

    match service.flight_requests(filter).await {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(error) => review_error_response(&error),
    }
}

pub(crate) async fn create_dispatcher_handler<D>(
    State(service): State<Arc<DispatcherService<D>>>,
    axum::Json(profile): axum::Json<NewDispatcher>,
) -> Response
where
    D: DispatcherDirectory + 'static,
{
    match service.create_dispatcher(profile).await {
        Ok(dispatcher) => (StatusCode::CREATED, axum::Json(dispatcher)).into_response(),
        Err(error) => directory_error_response(&error),
    }
}

pub(crate) async fn dispatchers_handler<D>(
    State(service): State<Arc<DispatcherService<D>>>,
) -> Response
where
    D: DispatcherDirectory + 'static,
{
    match service.dispatchers().await {
        Ok(dispatchers) => (StatusCode::OK, axum::Json(dispatchers)).into_response(),
        Err(error) => directory_error_response(&error),
    }
}

fn review_error_response(error: &FlightRequestServiceError) -> Response {
    let status = match error {
        FlightRequestServiceError::InQueueDecision => StatusCode::UNPROCESSABLE_ENTITY,
        FlightRequestServiceError::RequestMissing(_)
        | FlightRequestServiceError::DispatcherMissing(_) => StatusCode::NOT_FOUND,
        FlightRequestServiceError::NotInQueue { .. } => StatusCode::BAD_REQUEST,
        FlightRequestServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

fn directory_error_response(error: &DispatcherServiceError) -> Response {
    let status = match error {
        DispatcherServiceError::EmailTaken(_) => StatusCode::CONFLICT,
        DispatcherServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

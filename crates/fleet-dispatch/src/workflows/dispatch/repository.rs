use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{
    Dispatcher, DispatcherId, FlightId, FlightRequest, FlightRequestId,
};

/// Storage abstraction over the flight-request table so the services can be
/// exercised against in-memory fakes.
#[async_trait]
pub trait FlightRequestRepository: Send + Sync {
    async fn find(&self, id: FlightRequestId) -> Result<Option<FlightRequest>, RepositoryError>;
    async fn all(&self) -> Result<Vec<FlightRequest>, RepositoryError>;
    async fn update(&self, request: FlightRequest) -> Result<(), RepositoryError>;
    /// Persist the whole batch or nothing at all. Implementations must not
    /// leave a prefix of the batch written when a later element fails.
    async fn update_all(&self, requests: Vec<FlightRequest>) -> Result<(), RepositoryError>;
}

/// Lookup and registration surface of the dispatcher identity collaborator.
#[async_trait]
pub trait DispatcherDirectory: Send + Sync {
    async fn find_by_id(&self, id: &DispatcherId) -> Result<Option<Dispatcher>, RepositoryError>;
    async fn insert(&self, dispatcher: Dispatcher) -> Result<Dispatcher, RepositoryError>;
    async fn all(&self) -> Result<Vec<Dispatcher>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Transport projection of a stored request, exposed by the API layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightRequestView {
    pub request_id: FlightRequestId,
    pub flight_id: FlightId,
    pub route: String,
    pub departs_on: NaiveDate,
    pub flight_status: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatcher_id: Option<DispatcherId>,
    pub submitted_on: NaiveDate,
}

impl FlightRequest {
    /// Lossless projection used by API responses.
    pub fn view(&self) -> FlightRequestView {
        FlightRequestView {
            request_id: self.id,
            flight_id: self.flight.id,
            route: self.flight.route.clone(),
            departs_on: self.flight.departs_on,
            flight_status: self.flight.status.label(),
            status: self.status.label(),
            dispatcher_id: self.dispatcher_id.clone(),
            submitted_on: self.submitted_on,
        }
    }
}

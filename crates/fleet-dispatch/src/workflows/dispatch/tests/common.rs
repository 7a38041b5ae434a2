use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::dispatch::domain::{
    Dispatcher, DispatcherId, FlightId, FlightRequest, FlightRequestId, FlightRequestStatus,
    FlightSnapshot, FlightStatus,
};
use crate::workflows::dispatch::repository::{
    DispatcherDirectory, FlightRequestRepository, RepositoryError,
};
use crate::workflows::dispatch::{dispatch_router, FlightRequestService};

pub(super) fn free_flight(id: i64) -> FlightSnapshot {
    FlightSnapshot {
        id: FlightId(id),
        route: "Depot 4 - Riverside terminal".to_string(),
        departs_on: NaiveDate::from_ymd_opt(2025, 11, 3).expect("valid date"),
        status: FlightStatus::Free,
    }
}

pub(super) fn occupied_flight(id: i64) -> FlightSnapshot {
    FlightSnapshot {
        status: FlightStatus::Occupied,
        ..free_flight(id)
    }
}

pub(super) fn queued_request(id: i64, flight: FlightSnapshot) -> FlightRequest {
    FlightRequest {
        id: FlightRequestId(id),
        flight,
        status: FlightRequestStatus::InQueue,
        dispatcher_id: None,
        submitted_on: NaiveDate::from_ymd_opt(2025, 10, 20).expect("valid date"),
    }
}

pub(super) fn dispatcher(id: &str) -> Dispatcher {
    Dispatcher {
        id: DispatcherId(id.to_string()),
        display_name: "Nadia Orlova".to_string(),
        email: format!("{id}@depot.example"),
    }
}

pub(super) fn build_service(
    requests: Vec<FlightRequest>,
    dispatchers: Vec<Dispatcher>,
) -> (
    FlightRequestService<MemoryRequestStore, MemoryDirectory>,
    MemoryRequestStore,
    MemoryDirectory,
) {
    let store = MemoryRequestStore::with_requests(requests);
    let directory = MemoryDirectory::with_dispatchers(dispatchers);
    let service = FlightRequestService::new(Arc::new(store.clone()), Arc::new(directory.clone()));
    (service, store, directory)
}

pub(super) fn dispatch_router_with_service(
    service: FlightRequestService<MemoryRequestStore, MemoryDirectory>,
) -> axum::Router {
    dispatch_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Vec-backed store so listings keep insertion order.
#[derive(Default, Clone)]
pub(super) struct MemoryRequestStore {
    records: Arc<Mutex<Vec<FlightRequest>>>,
}

impl MemoryRequestStore {
    pub(super) fn with_requests(requests: Vec<FlightRequest>) -> Self {
        Self {
            records: Arc::new(Mutex::new(requests)),
        }
    }

    pub(super) fn snapshot(&self) -> Vec<FlightRequest> {
        self.records.lock().expect("request mutex poisoned").clone()
    }

    pub(super) fn status_of(&self, id: FlightRequestId) -> FlightRequestStatus {
        self.snapshot()
            .into_iter()
            .find(|request| request.id == id)
            .map(|request| request.status)
            .expect("request seeded")
    }

    pub(super) fn dispatcher_of(&self, id: FlightRequestId) -> Option<DispatcherId> {
        self.snapshot()
            .into_iter()
            .find(|request| request.id == id)
            .and_then(|request| request.dispatcher_id)
    }
}

#[async_trait]
impl FlightRequestRepository for MemoryRequestStore {
    async fn find(&self, id: FlightRequestId) -> Result<Option<FlightRequest>, RepositoryError> {
        let guard = self.records.lock().expect("request mutex poisoned");
        Ok(guard.iter().find(|request| request.id == id).cloned())
    }

    async fn all(&self) -> Result<Vec<FlightRequest>, RepositoryError> {
        let guard = self.records.lock().expect("request mutex poisoned");
        Ok(guard.clone())
    }

    async fn update(&self, request: FlightRequest) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("request mutex poisoned");
        match guard.iter_mut().find(|stored| stored.id == request.id) {
            Some(slot) => {
                *slot = request;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn update_all(&self, requests: Vec<FlightRequest>) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("request mutex poisoned");
        if requests
            .iter()
            .any(|request| !guard.iter().any(|stored| stored.id == request.id))
        {
            return Err(RepositoryError::NotFound);
        }
        for request in requests {
            if let Some(slot) = guard.iter_mut().find(|stored| stored.id == request.id) {
                *slot = request;
            }
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryDirectory {
    records: Arc<Mutex<Vec<Dispatcher>>>,
}

impl MemoryDirectory {
    pub(super) fn with_dispatchers(dispatchers: Vec<Dispatcher>) -> Self {
        Self {
            records: Arc::new(Mutex::new(dispatchers)),
        }
    }
}

#[async_trait]
impl DispatcherDirectory for MemoryDirectory {
    async fn find_by_id(&self, id: &DispatcherId) -> Result<Option<Dispatcher>, RepositoryError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.iter().find(|dispatcher| &dispatcher.id == id).cloned())
    }

    async fn insert(&self, dispatcher: Dispatcher) -> Result<Dispatcher, RepositoryError> {
        let mut guard = self.records.lock().expect("directory mutex poisoned");
        if guard.iter().any(|stored| stored.id == dispatcher.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(dispatcher.clone());
        Ok(dispatcher)
    }

    async fn all(&self) -> Result<Vec<Dispatcher>, RepositoryError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.clone())
    }
}

/// Store whose every operation reports the backend as offline.
pub(super) struct UnavailableStore;

#[async_trait]
impl FlightRequestRepository for UnavailableStore {
    async fn find(&self, _id: FlightRequestId) -> Result<Option<FlightRequest>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn all(&self) -> Result<Vec<FlightRequest>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn update(&self, _request: FlightRequest) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn update_all(&self, _requests: Vec<FlightRequest>) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Store that reads fine but refuses the atomic batch, for exercising the
/// all-or-nothing contract from the service side.
#[derive(Clone)]
pub(super) struct BrokenBatchStore {
    pub(super) inner: MemoryRequestStore,
}

#[async_trait]
impl FlightRequestRepository for BrokenBatchStore {
    async fn find(&self, id: FlightRequestId) -> Result<Option<FlightRequest>, RepositoryError> {
        self.inner.find(id).await
    }

    async fn all(&self) -> Result<Vec<FlightRequest>, RepositoryError> {
        self.inner.all().await
    }

    async fn update(&self, request: FlightRequest) -> Result<(), RepositoryError> {
        self.inner.update(request).await
    }

    async fn update_all(&self, _requests: Vec<FlightRequest>) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("batch write refused".to_string()))
    }
}

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use fleet_dispatch::workflows::dispatch::{
    Dispatcher, DispatcherDirectory, DispatcherId, FlightId, FlightRequest, FlightRequestId,
    FlightRequestRepository, FlightRequestStatus, FlightSnapshot, FlightStatus, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Vec-backed request store; listings keep insertion order, and the batch
/// update verifies every id before writing so the batch lands whole or not
/// at all.
#[derive(Default, Clone)]
pub(crate) struct InMemoryFlightRequestRepository {
    records: Arc<Mutex<Vec<FlightRequest>>>,
}

impl InMemoryFlightRequestRepository {
    pub(crate) fn with_requests(requests: Vec<FlightRequest>) -> Self {
        Self {
            records: Arc::new(Mutex::new(requests)),
        }
    }

    pub(crate) fn snapshot(&self) -> Vec<FlightRequest> {
        self.records.lock().expect("request mutex poisoned").clone()
    }
}

#[async_trait]
impl FlightRequestRepository for InMemoryFlightRequestRepository {
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
pub(crate) struct InMemoryDispatcherDirectory {
    records: Arc<Mutex<Vec<Dispatcher>>>,
}

impl InMemoryDispatcherDirectory {
    pub(crate) fn with_dispatchers(dispatchers: Vec<Dispatcher>) -> Self {
        Self {
            records: Arc::new(Mutex::new(dispatchers)),
        }
    }
}

#[async_trait]
impl DispatcherDirectory for InMemoryDispatcherDirectory {
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

fn demo_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn demo_flight(id: i64, route: &str, departs_on: NaiveDate, status: FlightStatus) -> FlightSnapshot {
    FlightSnapshot {
        id: FlightId(id),
        route: route.to_string(),
        departs_on,
        status,
    }
}

fn demo_request(id: i64, flight: FlightSnapshot, submitted_on: NaiveDate) -> FlightRequest {
    FlightRequest {
        id: FlightRequestId(id),
        flight,
        status: FlightRequestStatus::InQueue,
        dispatcher_id: None,
        submitted_on,
    }
}

/// Fixed fleet used by `--seed-demo` and the CLI demo. The service never
/// creates requests itself, so the adapter supplies them.
pub(crate) fn demo_fleet() -> (Vec<FlightRequest>, Vec<Dispatcher>) {
    let northgate = demo_flight(
        101,
        "Depot 2 - Northgate loop",
        demo_date(2025, 11, 12),
        FlightStatus::Free,
    );
    let riverside = demo_flight(
        102,
        "Depot 4 - Riverside terminal",
        demo_date(2025, 11, 14),
        FlightStatus::Free,
    );
    let airfield = demo_flight(
        103,
        "Depot 1 - Airfield shuttle",
        demo_date(2025, 11, 10),
        FlightStatus::Occupied,
    );

    let requests = vec![
        demo_request(1, northgate.clone(), demo_date(2025, 10, 27)),
        demo_request(2, northgate.clone(), demo_date(2025, 10, 28)),
        demo_request(3, northgate, demo_date(2025, 10, 30)),
        demo_request(4, riverside, demo_date(2025, 10, 29)),
        demo_request(5, airfield, demo_date(2025, 10, 31)),
    ];

    let dispatchers = vec![
        Dispatcher {
            id: DispatcherId("disp-000001".to_string()),
            display_name: "Marta Ilyina".to_string(),
            email: "marta@depot.example".to_string(),
        },
        Dispatcher {
            id: DispatcherId("disp-000002".to_string()),
            display_name: "Oleg Danilov".to_string(),
            email: "oleg@depot.example".to_string(),
        },
    ];

    (requests, dispatchers)
}

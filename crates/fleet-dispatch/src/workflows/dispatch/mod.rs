//! Flight-request review workflow for the dispatch desk.
//!
//! Drivers submit requests to take a flight; dispatchers review the queue and
//! accept, reject, or cancel each request. Accepting a request cancels every
//! rival request for the same flight, so a flight is never handed to two
//! drivers. Request submission itself lives outside this crate — storage
//! adapters seed the queue.

pub mod directory;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use directory::{DispatcherService, DispatcherServiceError, NewDispatcher};
pub use domain::{
    Dispatcher, DispatcherId, FlightId, FlightRequest, FlightRequestId, FlightRequestStatus,
    FlightSnapshot, FlightStatus,
};
pub use repository::{
    DispatcherDirectory, FlightRequestRepository, FlightRequestView, RepositoryError,
};
pub use router::{directory_router, dispatch_router};
pub use service::{FlightRequestService, FlightRequestServiceError, ReviewReceipt};

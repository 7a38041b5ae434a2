use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for flight requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlightRequestId(pub i64);

impl fmt::Display for FlightRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for flights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlightId(pub i64);

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for dispatcher accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispatcherId(pub String);

impl fmt::Display for DispatcherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a single flight request.
///
/// `InQueue` is the only state a dispatcher can act on; the other three are
/// terminal by convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightRequestStatus {
    InQueue,
    Accepted,
    Rejected,
    Canceled,
}

impl FlightRequestStatus {
    pub const fn label(self) -> &'static str {
        match self {
            FlightRequestStatus::InQueue => "in_queue",
            FlightRequestStatus::Accepted => "accepted",
            FlightRequestStatus::Rejected => "rejected",
            FlightRequestStatus::Canceled => "canceled",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "in_queue" => Some(Self::InQueue),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            "canceled" => Some(Self::Canceled),
            _ => None,
        }
    }
}

/// Availability of the flight a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightStatus {
    Free,
    Occupied,
    Maintenance,
}

impl FlightStatus {
    pub const fn label(self) -> &'static str {
        match self {
            FlightStatus::Free => "free",
            FlightStatus::Occupied => "occupied",
            FlightStatus::Maintenance => "maintenance",
        }
    }
}

/// Snapshot of the flight a request references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSnapshot {
    pub id: FlightId,
    pub route: String,
    pub departs_on: NaiveDate,
    pub status: FlightStatus,
}

/// A driver's request to take a flight, as stored by the persistence layer.
///
/// `dispatcher_id` stays empty until a dispatcher acts on the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRequest {
    pub id: FlightRequestId,
    pub flight: FlightSnapshot,
    pub status: FlightRequestStatus,
    pub dispatcher_id: Option<DispatcherId>,
    pub submitted_on: NaiveDate,
}

/// Dispatcher account as kept by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispatcher {
    pub id: DispatcherId,
    pub display_name: String,
    pub email: String,
}

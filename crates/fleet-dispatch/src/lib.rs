//! Business-logic layer for the fleet flight-dispatch service.
//!
//! Dispatchers review queued flight requests and accept, reject, or cancel
//! them. The [`workflows::dispatch`] module carries the domain model, the
//! storage abstractions, and the services; persistence itself is an external
//! concern injected through the repository traits.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

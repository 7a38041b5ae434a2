use crate::infra::{demo_fleet, InMemoryDispatcherDirectory, InMemoryFlightRequestRepository};
use clap::Args;
use fleet_dispatch::error::AppError;
use fleet_dispatch::workflows::dispatch::{
    DispatcherId, FlightRequestId, FlightRequestService, FlightRequestStatus,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Request id the demo dispatcher accepts
    #[arg(long, default_value_t = 1)]
    pub(crate) accept: i64,
    /// Dispatcher id acting in the demo
    #[arg(long, default_value = "disp-000001")]
    pub(crate) dispatcher: String,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let (requests, dispatchers) = demo_fleet();
    let store = Arc::new(InMemoryFlightRequestRepository::with_requests(requests));
    let directory = Arc::new(InMemoryDispatcherDirectory::with_dispatchers(dispatchers));
    let service = FlightRequestService::new(store.clone(), directory);

    println!("Fleet dispatch demo");

    println!("\nQueued requests on free flights");
    for view in service
        .flight_requests(Some(FlightRequestStatus::InQueue))
        .await?
    {
        println!(
            "- #{} | {} | departs {} | {}",
            view.request_id, view.route, view.departs_on, view.status
        );
    }

    let acting = DispatcherId(args.dispatcher);
    let receipt = service
        .confirm_request(
            FlightRequestId(args.accept),
            &acting,
            FlightRequestStatus::Accepted,
        )
        .await?;
    println!("\n{} (dispatcher {acting})", receipt.message);

    println!("\nFull queue after the decision");
    for request in store.snapshot() {
        let attribution = match &request.dispatcher_id {
            Some(id) => format!(" (dispatcher {id})"),
            None => String::new(),
        };
        println!(
            "- #{} | {} | {}{}",
            request.id,
            request.flight.route,
            request.status.label(),
            attribution
        );
    }

    Ok(())
}

use crate::cli::ServeArgs;
use crate::infra::{
    demo_fleet, AppState, InMemoryDispatcherDirectory, InMemoryFlightRequestRepository,
};
use crate::routes::with_dispatch_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fleet_dispatch::config::AppConfig;
use fleet_dispatch::error::AppError;
use fleet_dispatch::telemetry;
use fleet_dispatch::workflows::dispatch::{DispatcherService, FlightRequestService};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let (store, directory) = if args.seed_demo {
        let (requests, dispatchers) = demo_fleet();
        (
            InMemoryFlightRequestRepository::with_requests(requests),
            InMemoryDispatcherDirectory::with_dispatchers(dispatchers),
        )
    } else {
        (
            InMemoryFlightRequestRepository::default(),
            InMemoryDispatcherDirectory::default(),
        )
    };
    let store = Arc::new(store);
    let directory = Arc::new(directory);

    let reviews = Arc::new(FlightRequestService::new(store, directory.clone()));
    let accounts = Arc::new(DispatcherService::new(directory));

    let app = with_dispatch_routes(reviews, accounts)
        .layer(prometheus_layer)
        .layer(Extension(app_state));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, seeded = args.seed_demo, "fleet dispatch service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

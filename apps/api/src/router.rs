use std::sync::Arc;

use axum::{routing::get, Router};

use booking_cell::router::booking_routes;
use booking_cell::BookingService;
use dashboard_cell::router::dashboard_routes;
use dashboard_cell::DashboardHandle;
use live_sync_cell::router::sync_routes;
use live_sync_cell::SyncHub;
use location_cell::router::location_routes;
use location_cell::LocationDirectory;
use shared_config::AppConfig;

pub fn create_router(
    config: Arc<AppConfig>,
    directory: Arc<LocationDirectory>,
    booking: Arc<BookingService>,
    hub: Arc<SyncHub>,
    dashboard: DashboardHandle,
) -> Router {
    Router::new()
        .route("/", get(|| async { "HCMS API is running!" }))
        .merge(location_routes(directory))
        .nest("/appointments", booking_routes(booking, config.clone()))
        .nest("/dashboard", dashboard_routes(dashboard))
        .merge(sync_routes(hub))
}

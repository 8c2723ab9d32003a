use axum::{routing::get, Router};

use crate::handlers;
use crate::services::aggregator::DashboardHandle;

pub fn dashboard_routes(handle: DashboardHandle) -> Router {
    Router::new()
        .route("/stats", get(handlers::get_dashboard_stats))
        .with_state(handle)
}

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::*;
pub use router::dashboard_routes;
pub use services::aggregator::{spawn_aggregator, DashboardHandle, RECENT_ACTIVITY_CAPACITY};

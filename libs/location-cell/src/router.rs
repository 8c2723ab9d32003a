use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::directory::LocationDirectory;

/// Public read-only catalog routes. No authentication: the wizard narrows
/// its selection before the caller ever signs in.
pub fn location_routes(directory: Arc<LocationDirectory>) -> Router {
    Router::new()
        .route("/locations/regions", get(handlers::list_regions))
        .route("/locations/cities", get(handlers::list_cities))
        .route("/hospitals", get(handlers::list_hospitals))
        .route("/hospitals/{hospital_id}", get(handlers::get_hospital))
        .route("/hospitals/{hospital_id}/doctors", get(handlers::list_hospital_doctors))
        .route("/doctors/{doctor_id}", get(handlers::get_doctor))
        .with_state(directory)
}

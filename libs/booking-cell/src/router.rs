use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::services::booking::BookingService;

pub fn booking_routes(service: Arc<BookingService>, config: Arc<AppConfig>) -> Router {
    let protected_routes = Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/my", get(handlers::my_appointments))
        .route("/{appointment_id}/cancel", put(handlers::cancel_appointment))
        .route("/{appointment_id}/complete", put(handlers::complete_appointment))
        .layer(middleware::from_fn_with_state(config, auth_middleware));

    // Tracking lookup is deliberately unauthenticated.
    let public_routes = Router::new().route("/track/{tracking_id}", get(handlers::track_appointment));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .with_state(service)
}

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::hub::SyncHub;

pub fn sync_routes(hub: Arc<SyncHub>) -> Router {
    Router::new()
        .route("/ws", get(handlers::ws_handler))
        .with_state(hub)
}

use std::sync::Arc;

use axum::{
    extract::{ws::WebSocketUpgrade, State},
    response::Response,
};

use crate::services::connection::handle_socket;
use crate::services::hub::SyncHub;

/// Upgrades the persistent dashboard connection. Clients subscribe to named
/// topics after each connect; nothing is remembered across reconnects.
pub async fn ws_handler(State(hub): State<Arc<SyncHub>>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

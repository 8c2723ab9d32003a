use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::ClientCommand;
use crate::services::hub::SyncHub;

/// Drives one dashboard session: a writer task drains the connection's
/// bounded queue into the socket while the reader loop handles
/// subscribe/unsubscribe commands. Everything the connection registered is
/// torn down when either side closes.
pub async fn handle_socket(socket: WebSocket, hub: Arc<SyncHub>) {
    let connection_id = Uuid::new_v4();
    info!("Dashboard session {} connected", connection_id);

    let (tx, mut rx) = mpsc::channel(hub.subscriber_buffer_size());
    let (mut sink, mut stream) = socket.split();

    let writer = tokio::spawn(async move {
        while let Some(envelope) = rx.recv().await {
            let text = match serde_json::to_string(&envelope) {
                Ok(text) => text,
                Err(e) => {
                    debug!("Failed to serialize envelope: {}", e);
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(message)) = stream.next().await {
        match message {
            Message::Text(text) => match serde_json::from_str::<ClientCommand>(text.as_str()) {
                Ok(ClientCommand::Subscribe { topic }) => {
                    hub.subscribe(&topic, connection_id, tx.clone()).await;
                }
                Ok(ClientCommand::Unsubscribe { topic }) => {
                    hub.unsubscribe(&topic, connection_id).await;
                }
                Err(e) => {
                    debug!("Ignoring malformed command from {}: {}", connection_id, e);
                }
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    hub.disconnect(connection_id).await;
    drop(tx);
    let _ = writer.await;
    info!("Dashboard session {} disconnected", connection_id);
}

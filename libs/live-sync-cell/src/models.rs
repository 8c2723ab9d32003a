use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Stateful topic: dashboard counters. New subscribers receive the retained
/// snapshot immediately.
pub const TOPIC_DASHBOARD_STATS: &str = "dashboard-stats";

/// Raw stream topic: individual booking events, future events only.
pub const TOPIC_APPOINTMENT_STREAM: &str = "appointment-stream";

/// Fan-out unit. The sequence number is monotonic per topic and defines
/// delivery order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub topic: String,
    pub sequence: u64,
    pub payload: Value,
}

/// Commands a dashboard session sends after connecting. Subscriptions are
/// connection-scoped: they do not survive a reconnect and must be reissued.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ClientCommand {
    Subscribe { topic: String },
    Unsubscribe { topic: String },
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SyncError {
    /// Non-fatal: the subscriber's outbound queue overflowed or its
    /// connection vanished; the client should resubscribe.
    #[error("Subscription dropped for connection {connection_id} on topic {topic}")]
    SubscriptionDropped { topic: String, connection_id: Uuid },
}

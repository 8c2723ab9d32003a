use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{
    EventEnvelope, SyncError, TOPIC_APPOINTMENT_STREAM, TOPIC_DASHBOARD_STATS,
};

struct TopicState {
    sequence: u64,
    stateful: bool,
    retained: Option<EventEnvelope>,
    subscribers: HashMap<Uuid, mpsc::Sender<EventEnvelope>>,
}

impl TopicState {
    fn new(stateful: bool) -> Self {
        Self {
            sequence: 0,
            stateful,
            retained: None,
            subscribers: HashMap::new(),
        }
    }
}

/// Topic-based broker fanning domain events out to dashboard sessions.
///
/// Every subscription delivers through the subscriber's own bounded queue
/// via `try_send`, so publishing never waits on a consumer: a full or closed
/// queue drops that subscription alone. Stateful topics retain the latest
/// envelope and replay it to new subscribers; raw topics only ever deliver
/// future events.
pub struct SyncHub {
    subscriber_buffer_size: usize,
    topics: RwLock<HashMap<String, TopicState>>,
}

impl SyncHub {
    pub fn new(subscriber_buffer_size: usize) -> Self {
        let mut topics = HashMap::new();
        topics.insert(TOPIC_DASHBOARD_STATS.to_string(), TopicState::new(true));
        topics.insert(TOPIC_APPOINTMENT_STREAM.to_string(), TopicState::new(false));

        Self {
            subscriber_buffer_size,
            topics: RwLock::new(topics),
        }
    }

    /// Queue depth a connection should allocate for its outbound channel.
    pub fn subscriber_buffer_size(&self) -> usize {
        self.subscriber_buffer_size
    }

    /// Publishes to every active subscriber in publish order and returns the
    /// assigned sequence number. Slow or dead subscribers are removed here,
    /// never awaited.
    pub async fn publish(&self, topic: &str, payload: Value) -> u64 {
        let mut topics = self.topics.write().await;
        let state = topics
            .entry(topic.to_string())
            .or_insert_with(|| TopicState::new(false));

        state.sequence += 1;
        let envelope = EventEnvelope {
            topic: topic.to_string(),
            sequence: state.sequence,
            payload,
        };

        let mut dropped = Vec::new();
        for (connection_id, sender) in &state.subscribers {
            if sender.try_send(envelope.clone()).is_err() {
                dropped.push(*connection_id);
            }
        }
        for connection_id in dropped {
            state.subscribers.remove(&connection_id);
            // Non-fatal by contract: the client resubscribes after reconnect.
            warn!(
                "{}",
                SyncError::SubscriptionDropped {
                    topic: topic.to_string(),
                    connection_id,
                }
            );
        }

        if state.stateful {
            state.retained = Some(envelope.clone());
        }

        debug!(
            "Published sequence {} on topic {} to {} subscribers",
            envelope.sequence,
            topic,
            state.subscribers.len()
        );
        envelope.sequence
    }

    /// Registers `(topic, connection)`. A stateful topic immediately replays
    /// its retained snapshot so a freshly (re)connected client is current
    /// without waiting for the next event.
    pub async fn subscribe(
        &self,
        topic: &str,
        connection_id: Uuid,
        sender: mpsc::Sender<EventEnvelope>,
    ) {
        let mut topics = self.topics.write().await;
        let state = topics
            .entry(topic.to_string())
            .or_insert_with(|| TopicState::new(false));

        if state.stateful {
            if let Some(retained) = &state.retained {
                if sender.try_send(retained.clone()).is_err() {
                    warn!(
                        "Snapshot replay failed for connection {} on topic {}",
                        connection_id, topic
                    );
                    return;
                }
            }
        }

        state.subscribers.insert(connection_id, sender);
        debug!("Connection {} subscribed to topic {}", connection_id, topic);
    }

    /// Idempotent removal of a single subscription.
    pub async fn unsubscribe(&self, topic: &str, connection_id: Uuid) {
        let mut topics = self.topics.write().await;
        if let Some(state) = topics.get_mut(topic) {
            state.subscribers.remove(&connection_id);
        }
        debug!("Connection {} unsubscribed from topic {}", connection_id, topic);
    }

    /// Idempotent removal of every subscription held by a connection.
    pub async fn disconnect(&self, connection_id: Uuid) {
        let mut topics = self.topics.write().await;
        for state in topics.values_mut() {
            state.subscribers.remove(&connection_id);
        }
        debug!("Connection {} disconnected", connection_id);
    }

    pub async fn subscriber_count(&self, topic: &str) -> usize {
        let topics = self.topics.read().await;
        topics.get(topic).map_or(0, |s| s.subscribers.len())
    }
}

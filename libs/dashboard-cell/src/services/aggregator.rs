use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use live_sync_cell::{SyncHub, TOPIC_APPOINTMENT_STREAM, TOPIC_DASHBOARD_STATS};
use shared_models::events::{DomainEvent, EventKind};

use crate::models::{DashboardSnapshot, DashboardStats};

pub const RECENT_ACTIVITY_CAPACITY: usize = 10;

/// Handle to the running aggregator: the single place booking events enter,
/// and a watch mirror for HTTP reads of the current snapshot.
#[derive(Clone)]
pub struct DashboardHandle {
    events_tx: mpsc::Sender<DomainEvent>,
    snapshot_rx: watch::Receiver<DashboardSnapshot>,
}

impl DashboardHandle {
    pub fn events_sender(&self) -> mpsc::Sender<DomainEvent> {
        self.events_tx.clone()
    }

    pub fn current_snapshot(&self) -> DashboardSnapshot {
        self.snapshot_rx.borrow().clone()
    }
}

/// Counters and the activity feed are owned by one task and mutated only by
/// applying events in arrival order, so they can never diverge mid-update.
struct AggregatorState {
    snapshot: DashboardSnapshot,
    patients: HashSet<String>,
}

impl AggregatorState {
    fn new(hospitals: u64, doctors: u64) -> Self {
        Self {
            snapshot: DashboardSnapshot {
                stats: DashboardStats {
                    total_hospitals: hospitals,
                    total_doctors: doctors,
                    ..DashboardStats::default()
                },
                recent_activity: Vec::new(),
            },
            patients: HashSet::new(),
        }
    }

    /// One atomic unit: counters and activity list move together.
    fn apply(&mut self, event: &DomainEvent) {
        let stats = &mut self.snapshot.stats;
        match event.kind {
            EventKind::BookingCreated => {
                stats.total_appointments += 1;
                stats.booked_appointments += 1;
                self.patients.insert(event.owner_subject.clone());
                stats.total_patients = self.patients.len() as u64;
            }
            EventKind::BookingCancelled => {
                stats.booked_appointments = stats.booked_appointments.saturating_sub(1);
                stats.cancelled_appointments += 1;
            }
            EventKind::BookingCompleted => {
                stats.booked_appointments = stats.booked_appointments.saturating_sub(1);
                stats.completed_appointments += 1;
            }
        }

        // Deduplicated by appointment id: a status update replaces the old
        // entry and moves it to the head.
        let appointment = &event.appointment;
        self.snapshot
            .recent_activity
            .retain(|entry| entry.id != appointment.id);
        self.snapshot.recent_activity.insert(0, appointment.clone());
        self.snapshot.recent_activity.truncate(RECENT_ACTIVITY_CAPACITY);
    }
}

/// Spawns the aggregator task and returns its handle. Hospital/doctor totals
/// are fixed at startup from the reference directory; appointment counters
/// grow from the event stream.
pub fn spawn_aggregator(
    hub: Arc<SyncHub>,
    hospitals: u64,
    doctors: u64,
    event_channel_size: usize,
) -> DashboardHandle {
    let (events_tx, mut events_rx) = mpsc::channel::<DomainEvent>(event_channel_size);

    let mut state = AggregatorState::new(hospitals, doctors);
    let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot.clone());

    tokio::spawn(async move {
        info!("Dashboard aggregator started");
        while let Some(event) = events_rx.recv().await {
            debug!("Applying {:?} for appointment {}", event.kind, event.appointment.id);
            state.apply(&event);

            let _ = snapshot_tx.send(state.snapshot.clone());

            hub.publish(TOPIC_DASHBOARD_STATS, json!(state.snapshot)).await;
            hub.publish(
                TOPIC_APPOINTMENT_STREAM,
                json!({
                    "event": event.kind,
                    "appointment": event.appointment,
                }),
            )
            .await;
        }
        info!("Dashboard aggregator stopped");
    });

    DashboardHandle {
        events_tx,
        snapshot_rx,
    }
}

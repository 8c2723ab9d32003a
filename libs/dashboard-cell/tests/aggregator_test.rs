use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};
use uuid::Uuid;

use dashboard_cell::{spawn_aggregator, DashboardHandle, RECENT_ACTIVITY_CAPACITY};
use live_sync_cell::{SyncHub, TOPIC_APPOINTMENT_STREAM, TOPIC_DASHBOARD_STATS};
use shared_models::events::{AppointmentSnapshot, DomainEvent, EventKind};

fn snapshot(id: i64, status: &str) -> AppointmentSnapshot {
    AppointmentSnapshot {
        id,
        tracking_id: format!("HCMS-2025-{:04}", id),
        patient_name: "Asha".to_string(),
        doctor_id: 5,
        doctor_name: "Dr. Iyer".to_string(),
        doctor_specialization: "General Medicine".to_string(),
        hospital_id: 2,
        hospital_name: "Harbor General".to_string(),
        appointment_date: NaiveDate::from_ymd_opt(2025, 6, 16).unwrap(),
        appointment_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        status: status.to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap(),
    }
}

fn created(id: i64, owner: &str) -> DomainEvent {
    DomainEvent::new(EventKind::BookingCreated, owner, snapshot(id, "BOOKED"))
}

fn cancelled(id: i64, owner: &str) -> DomainEvent {
    DomainEvent::new(EventKind::BookingCancelled, owner, snapshot(id, "CANCELLED"))
}

fn completed(id: i64, owner: &str) -> DomainEvent {
    DomainEvent::new(EventKind::BookingCompleted, owner, snapshot(id, "COMPLETED"))
}

/// Spawns the aggregator plus a stats-topic subscriber used to wait until
/// events have been applied.
async fn aggregator_with_probe(
    hub: Arc<SyncHub>,
) -> (DashboardHandle, mpsc::Receiver<live_sync_cell::EventEnvelope>) {
    let handle = spawn_aggregator(hub.clone(), 12, 20, 64);

    let (tx, rx) = mpsc::channel(64);
    hub.subscribe(TOPIC_DASHBOARD_STATS, Uuid::new_v4(), tx).await;

    (handle, rx)
}

async fn drain_snapshots(rx: &mut mpsc::Receiver<live_sync_cell::EventEnvelope>, n: usize) {
    for _ in 0..n {
        timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("snapshot published within the window")
            .expect("channel open");
    }
}

#[tokio::test]
async fn initial_snapshot_carries_the_directory_totals() {
    let hub = Arc::new(SyncHub::new(16));
    let (handle, _probe) = aggregator_with_probe(hub).await;

    let snapshot = handle.current_snapshot();
    assert_eq!(snapshot.stats.total_hospitals, 12);
    assert_eq!(snapshot.stats.total_doctors, 20);
    assert_eq!(snapshot.stats.total_appointments, 0);
    assert!(snapshot.recent_activity.is_empty());
}

#[tokio::test]
async fn booking_events_move_the_counters_as_one_unit() {
    let hub = Arc::new(SyncHub::new(16));
    let (handle, mut probe) = aggregator_with_probe(hub).await;
    let events = handle.events_sender();

    events.send(created(1, "patient-1")).await.unwrap();
    events.send(created(2, "patient-2")).await.unwrap();
    events.send(cancelled(1, "patient-1")).await.unwrap();
    events.send(completed(2, "patient-2")).await.unwrap();
    drain_snapshots(&mut probe, 4).await;

    let stats = handle.current_snapshot().stats;
    assert_eq!(stats.total_appointments, 2);
    assert_eq!(stats.booked_appointments, 0);
    assert_eq!(stats.cancelled_appointments, 1);
    assert_eq!(stats.completed_appointments, 1);
    assert_eq!(stats.total_patients, 2);
}

#[tokio::test]
async fn repeat_bookings_by_the_same_patient_count_once() {
    let hub = Arc::new(SyncHub::new(16));
    let (handle, mut probe) = aggregator_with_probe(hub).await;
    let events = handle.events_sender();

    events.send(created(1, "patient-1")).await.unwrap();
    events.send(created(2, "patient-1")).await.unwrap();
    drain_snapshots(&mut probe, 2).await;

    let stats = handle.current_snapshot().stats;
    assert_eq!(stats.total_appointments, 2);
    assert_eq!(stats.total_patients, 1, "Patients are distinct owning subjects");
}

#[tokio::test]
async fn activity_feed_is_capped_and_newest_first() {
    let hub = Arc::new(SyncHub::new(16));
    let (handle, mut probe) = aggregator_with_probe(hub).await;
    let events = handle.events_sender();

    for id in 1..=12 {
        events.send(created(id, "patient-1")).await.unwrap();
    }
    drain_snapshots(&mut probe, 12).await;

    let activity = handle.current_snapshot().recent_activity;
    assert_eq!(activity.len(), RECENT_ACTIVITY_CAPACITY, "The feed never exceeds its cap");
    assert_eq!(activity[0].id, 12, "Newest entry first");
    assert_eq!(activity[RECENT_ACTIVITY_CAPACITY - 1].id, 3, "Oldest surviving entry last");
}

#[tokio::test]
async fn status_updates_replace_the_entry_instead_of_duplicating_it() {
    let hub = Arc::new(SyncHub::new(16));
    let (handle, mut probe) = aggregator_with_probe(hub).await;
    let events = handle.events_sender();

    events.send(created(1, "patient-1")).await.unwrap();
    events.send(created(2, "patient-2")).await.unwrap();
    events.send(cancelled(1, "patient-1")).await.unwrap();
    drain_snapshots(&mut probe, 3).await;

    let activity = handle.current_snapshot().recent_activity;
    assert_eq!(activity.len(), 2, "No duplicate entries for the same appointment id");
    assert_eq!(activity[0].id, 1, "The updated appointment moves to the head");
    assert_eq!(activity[0].status, "CANCELLED");
    assert_eq!(activity[1].id, 2);
}

#[tokio::test]
async fn each_event_publishes_a_snapshot_and_forwards_the_raw_event() {
    let hub = Arc::new(SyncHub::new(16));
    let handle = spawn_aggregator(hub.clone(), 12, 20, 64);

    let (stats_tx, mut stats_rx) = mpsc::channel(16);
    hub.subscribe(TOPIC_DASHBOARD_STATS, Uuid::new_v4(), stats_tx).await;
    let (stream_tx, mut stream_rx) = mpsc::channel(16);
    hub.subscribe(TOPIC_APPOINTMENT_STREAM, Uuid::new_v4(), stream_tx).await;

    handle.events_sender().send(created(7, "patient-7")).await.unwrap();

    let stats_envelope = timeout(Duration::from_millis(500), stats_rx.recv())
        .await
        .expect("stats snapshot within the window")
        .expect("channel open");
    assert_eq!(stats_envelope.payload["stats"]["total_appointments"], 1);
    assert_eq!(stats_envelope.payload["recent_activity"][0]["id"], 7);

    let stream_envelope = timeout(Duration::from_millis(500), stream_rx.recv())
        .await
        .expect("raw event within the window")
        .expect("channel open");
    assert_eq!(stream_envelope.payload["event"], "BookingCreated");
    assert_eq!(stream_envelope.payload["appointment"]["id"], 7);
    assert_eq!(
        stream_envelope.payload.get("owner_subject"),
        None,
        "The owner identity never leaves the aggregator"
    );
}

#[tokio::test]
async fn late_dashboard_subscriber_receives_one_current_snapshot() {
    let hub = Arc::new(SyncHub::new(16));
    let (handle, mut probe) = aggregator_with_probe(hub.clone()).await;
    let events = handle.events_sender();

    for id in 1..=5 {
        events.send(created(id, "patient-1")).await.unwrap();
    }
    drain_snapshots(&mut probe, 5).await;

    // Fresh connection after five events: one snapshot, not five replays.
    let (tx, mut rx) = mpsc::channel(16);
    hub.subscribe(TOPIC_DASHBOARD_STATS, Uuid::new_v4(), tx).await;

    let replay = timeout(Duration::from_millis(500), rx.recv())
        .await
        .expect("replay is immediate")
        .expect("channel open");
    assert_eq!(replay.payload["stats"]["total_appointments"], 5);

    let extra = timeout(Duration::from_millis(100), rx.recv()).await;
    assert!(extra.is_err(), "Exactly one snapshot for a late subscriber");
}

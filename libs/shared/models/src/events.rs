use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire-level view of an appointment, shared by the tracking endpoint,
/// the activity feed, and the appointment-stream topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentSnapshot {
    pub id: i64,
    pub tracking_id: String,
    pub patient_name: String,
    pub doctor_id: i64,
    pub doctor_name: String,
    pub doctor_specialization: String,
    pub hospital_id: i64,
    pub hospital_name: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    BookingCreated,
    BookingCancelled,
    BookingCompleted,
}

/// Booking lifecycle event emitted by the orchestrator and consumed by the
/// dashboard aggregator, which fans it out to connected sessions. The owner
/// subject travels with the event for patient accounting but is never
/// forwarded onto a topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    pub kind: EventKind,
    pub owner_subject: String,
    pub appointment: AppointmentSnapshot,
}

impl DomainEvent {
    pub fn new(kind: EventKind, owner_subject: impl Into<String>, appointment: AppointmentSnapshot) -> Self {
        Self {
            kind,
            owner_subject: owner_subject.into(),
            appointment,
        }
    }
}

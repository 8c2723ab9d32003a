use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::BookingError;
use crate::models::{Appointment, AppointmentStatus};

/// Human-shareable tracking identifier: `HCMS-<year>-<zero-padded sequence>`,
/// allocated from a per-year counter.
pub fn format_tracking_id(year: i32, sequence: u64) -> String {
    format!("HCMS-{}-{:04}", year, sequence)
}

/// Fully validated appointment, ready to persist.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_subject: String,
    pub patient_name: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub mobile_number: String,
    pub age: Option<i32>,
    pub last_visit_date: Option<NaiveDate>,
    pub doctor_id: i64,
    pub doctor_name: String,
    pub doctor_specialization: String,
    pub hospital_id: i64,
    pub hospital_name: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
}

/// Persistence collaborator for committed appointments.
///
/// `insert_booked` must allocate the tracking id and insert inside one
/// critical section so concurrent commits can never observe the same
/// sequence number. `transition_status` must enforce status monotonicity
/// under the same guard.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn insert_booked(
        &self,
        new: NewAppointment,
        booked_at: DateTime<Utc>,
    ) -> Result<Appointment, BookingError>;

    async fn transition_status(
        &self,
        id: i64,
        to: AppointmentStatus,
    ) -> Result<Appointment, BookingError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Appointment>, BookingError>;

    async fn get_by_tracking_id(
        &self,
        tracking_id: &str,
    ) -> Result<Option<Appointment>, BookingError>;

    async fn list_by_owner(&self, subject: &str) -> Result<Vec<Appointment>, BookingError>;
}

#[derive(Default)]
struct StoreInner {
    next_id: i64,
    // Tracking sequences reset each year; the year is embedded in the id.
    sequences: HashMap<i32, u64>,
    by_id: BTreeMap<i64, Appointment>,
    by_tracking: HashMap<String, i64>,
}

/// In-memory store. The single mutex bounds the commit critical section to
/// allocation + insert, exactly the serialization point the booking flow
/// requires.
#[derive(Default)]
pub struct InMemoryAppointmentStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn insert_booked(
        &self,
        new: NewAppointment,
        booked_at: DateTime<Utc>,
    ) -> Result<Appointment, BookingError> {
        let mut inner = self.inner.lock().await;

        let year = booked_at.year();
        let sequence = inner.sequences.entry(year).or_insert(0);
        *sequence += 1;
        let tracking_id = format_tracking_id(year, *sequence);

        if inner.by_tracking.contains_key(&tracking_id) {
            // The counter is the only source of tracking ids; a collision
            // means the store state is corrupt.
            return Err(BookingError::StoreUnavailable(format!(
                "tracking id already allocated: {}",
                tracking_id
            )));
        }

        inner.next_id += 1;
        let appointment = Appointment {
            id: inner.next_id,
            tracking_id: tracking_id.clone(),
            patient_subject: new.patient_subject,
            patient_name: new.patient_name,
            dob: new.dob,
            gender: new.gender,
            mobile_number: new.mobile_number,
            age: new.age,
            last_visit_date: new.last_visit_date,
            doctor_id: new.doctor_id,
            doctor_name: new.doctor_name,
            doctor_specialization: new.doctor_specialization,
            hospital_id: new.hospital_id,
            hospital_name: new.hospital_name,
            appointment_date: new.appointment_date,
            appointment_time: new.appointment_time,
            status: AppointmentStatus::Booked,
            created_at: booked_at,
        };

        inner.by_tracking.insert(tracking_id.clone(), appointment.id);
        inner.by_id.insert(appointment.id, appointment.clone());

        debug!("Appointment {} persisted with tracking id {}", appointment.id, tracking_id);
        Ok(appointment)
    }

    async fn transition_status(
        &self,
        id: i64,
        to: AppointmentStatus,
    ) -> Result<Appointment, BookingError> {
        let mut inner = self.inner.lock().await;

        let appointment = inner
            .by_id
            .get_mut(&id)
            .ok_or(BookingError::AppointmentNotFound(id))?;

        if !appointment.status.can_transition_to(to) {
            return Err(BookingError::InvalidStatusTransition(appointment.status));
        }

        appointment.status = to;
        Ok(appointment.clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Appointment>, BookingError> {
        let inner = self.inner.lock().await;
        Ok(inner.by_id.get(&id).cloned())
    }

    async fn get_by_tracking_id(
        &self,
        tracking_id: &str,
    ) -> Result<Option<Appointment>, BookingError> {
        let inner = self.inner.lock().await;
        let id = inner.by_tracking.get(tracking_id);
        Ok(id.and_then(|id| inner.by_id.get(id).cloned()))
    }

    async fn list_by_owner(&self, subject: &str) -> Result<Vec<Appointment>, BookingError> {
        let inner = self.inner.lock().await;
        let mut appointments: Vec<Appointment> = inner
            .by_id
            .values()
            .filter(|a| a.patient_subject == subject)
            .cloned()
            .collect();

        appointments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(appointments)
    }
}

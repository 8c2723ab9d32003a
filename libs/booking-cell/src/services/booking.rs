use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tokio::sync::mpsc;
use tracing::{info, warn};

use location_cell::LocationDirectory;
use shared_models::auth::User;
use shared_models::events::{AppointmentSnapshot, DomainEvent, EventKind};

use crate::error::BookingError;
use crate::models::{Appointment, AppointmentRequest, AppointmentStatus, BookingConfirmation};
use crate::services::clock::Clock;
use crate::services::draft::{BookingDraft, PatientInfo};
use crate::services::store::{AppointmentStore, NewAppointment};

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d", "%d/%m/%Y"];

fn parse_date_robustly(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Drives a flat booking submission through the wizard guards, commits it
/// with a freshly allocated tracking id, and emits the lifecycle event.
pub struct BookingService {
    directory: Arc<LocationDirectory>,
    store: Arc<dyn AppointmentStore>,
    clock: Arc<dyn Clock>,
    events: mpsc::Sender<DomainEvent>,
}

impl BookingService {
    pub fn new(
        directory: Arc<LocationDirectory>,
        store: Arc<dyn AppointmentStore>,
        clock: Arc<dyn Clock>,
        events: mpsc::Sender<DomainEvent>,
    ) -> Self {
        Self {
            directory,
            store,
            clock,
            events,
        }
    }

    /// Commit path. Validation runs to completion before any side effect, so
    /// a rejected submission consumes no tracking id and persists nothing;
    /// the error names every offending field.
    pub async fn book(
        &self,
        request: AppointmentRequest,
        user: &User,
    ) -> Result<BookingConfirmation, BookingError> {
        info!("Booking request from user {}", user.id);

        let (schedule_date, schedule_time, patient) = self.validate_request(&request)?;

        // Collapsed wizard entry: provider preselected, association and
        // schedule re-validated by the step guards.
        let draft = BookingDraft::enter_at_provider(
            &self.directory,
            request.hospital_id.unwrap_or_default(),
            request.doctor_id.unwrap_or_default(),
        )?;
        let draft = draft.select_schedule(self.clock.as_ref(), schedule_date, schedule_time)?;
        let completed = draft.select_patient_info(patient)?;

        let doctor = self
            .directory
            .get_doctor(completed.provider.doctor_id)
            .map_err(|_| BookingError::DoctorNotFound(completed.provider.doctor_id))?;
        let hospital = self
            .directory
            .get_hospital(completed.provider.hospital_id)
            .map_err(|_| BookingError::HospitalNotFound(completed.provider.hospital_id))?;

        let new = NewAppointment {
            patient_subject: user.id.clone(),
            patient_name: completed.patient.name,
            dob: completed.patient.dob,
            gender: completed.patient.gender,
            mobile_number: completed.patient.mobile_number,
            age: completed.patient.age,
            last_visit_date: completed.patient.last_visit_date,
            doctor_id: doctor.id,
            doctor_name: doctor.name.clone(),
            doctor_specialization: doctor.specialization.clone(),
            hospital_id: hospital.id,
            hospital_name: hospital.name.clone(),
            appointment_date: completed.schedule.appointment_date,
            appointment_time: completed.schedule.appointment_time,
        };

        let appointment = self.store.insert_booked(new, self.clock.now()).await?;

        info!(
            "Appointment {} booked with tracking id {}",
            appointment.id, appointment.tracking_id
        );

        self.emit(EventKind::BookingCreated, &appointment);

        Ok(BookingConfirmation {
            tracking_id: appointment.tracking_id,
        })
    }

    /// Owner or elevated role only, and only out of `Booked`.
    pub async fn cancel(
        &self,
        appointment_id: i64,
        user: &User,
    ) -> Result<AppointmentSnapshot, BookingError> {
        let appointment = self
            .store
            .get_by_id(appointment_id)
            .await?
            .ok_or(BookingError::AppointmentNotFound(appointment_id))?;

        if appointment.patient_subject != user.id && !user.is_elevated() {
            return Err(BookingError::Unauthorized);
        }

        let updated = self
            .store
            .transition_status(appointment_id, AppointmentStatus::Cancelled)
            .await?;

        info!("Appointment {} cancelled by user {}", appointment_id, user.id);
        self.emit(EventKind::BookingCancelled, &updated);

        Ok(updated.to_snapshot())
    }

    /// Marking an appointment completed is a staff operation.
    pub async fn complete(
        &self,
        appointment_id: i64,
        user: &User,
    ) -> Result<AppointmentSnapshot, BookingError> {
        if !user.is_elevated() {
            return Err(BookingError::Unauthorized);
        }

        let updated = self
            .store
            .transition_status(appointment_id, AppointmentStatus::Completed)
            .await?;

        info!("Appointment {} completed by user {}", appointment_id, user.id);
        self.emit(EventKind::BookingCompleted, &updated);

        Ok(updated.to_snapshot())
    }

    /// Unauthenticated tracking lookup.
    pub async fn track(&self, tracking_id: &str) -> Result<AppointmentSnapshot, BookingError> {
        let appointment = self
            .store
            .get_by_tracking_id(tracking_id)
            .await?
            .ok_or_else(|| BookingError::TrackingIdNotFound(tracking_id.to_string()))?;

        Ok(appointment.to_snapshot())
    }

    /// The caller's appointments, newest first.
    pub async fn list_for_owner(
        &self,
        user: &User,
    ) -> Result<Vec<AppointmentSnapshot>, BookingError> {
        let appointments = self.store.list_by_owner(&user.id).await?;
        Ok(appointments.iter().map(Appointment::to_snapshot).collect())
    }

    // Emission is best-effort: a persisted booking stays valid even if the
    // event channel is full or the aggregator is gone. Reconnecting
    // dashboards repair staleness from the stats snapshot.
    fn emit(&self, kind: EventKind, appointment: &Appointment) {
        let event = DomainEvent::new(
            kind,
            appointment.patient_subject.clone(),
            appointment.to_snapshot(),
        );
        if let Err(e) = self.events.try_send(event) {
            warn!("Failed to emit {:?} for appointment {}: {}", kind, appointment.id, e);
        }
    }

    fn validate_request(
        &self,
        request: &AppointmentRequest,
    ) -> Result<(NaiveDate, NaiveTime, PatientInfo), BookingError> {
        let mut fields = Vec::new();

        if request.doctor_id.is_none() {
            fields.push("doctorId".to_string());
        }
        if request.hospital_id.is_none() {
            fields.push("hospitalId".to_string());
        }

        let appointment_date = match request.appointment_date.as_deref() {
            Some(raw) => match parse_date_robustly(raw) {
                Some(date) => {
                    if date <= self.clock.today() {
                        fields.push("appointmentDate (must be later than today)".to_string());
                    }
                    Some(date)
                }
                None => {
                    fields.push("appointmentDate".to_string());
                    None
                }
            },
            None => {
                fields.push("appointmentDate".to_string());
                None
            }
        };

        let appointment_time = match request.appointment_time.as_deref() {
            Some(raw) => match NaiveTime::parse_from_str(raw.trim(), "%H:%M") {
                Ok(time) => Some(time),
                Err(_) => {
                    fields.push("appointmentTime".to_string());
                    None
                }
            },
            None => {
                fields.push("appointmentTime".to_string());
                None
            }
        };

        let patient_name = request.patient_name.as_deref().unwrap_or("").trim();
        if patient_name.is_empty() {
            fields.push("patientName".to_string());
        }

        let mobile_number = request.mobile_number.as_deref().unwrap_or("").trim();
        if mobile_number.is_empty() {
            fields.push("mobileNumber".to_string());
        } else if !crate::services::draft::is_valid_mobile(mobile_number) {
            fields.push("mobileNumber (10-15 digits)".to_string());
        }

        // Optional fields still have to parse when present.
        let dob = match request.dob.as_deref() {
            Some(raw) if !raw.trim().is_empty() => match parse_date_robustly(raw) {
                Some(date) => Some(date),
                None => {
                    fields.push("dob".to_string());
                    None
                }
            },
            _ => None,
        };
        let last_visit_date = match request.last_appointment.as_deref() {
            Some(raw) if !raw.trim().is_empty() => match parse_date_robustly(raw) {
                Some(date) => Some(date),
                None => {
                    fields.push("lastAppointment".to_string());
                    None
                }
            },
            _ => None,
        };

        match (appointment_date, appointment_time) {
            (Some(date), Some(time)) if fields.is_empty() => Ok((
                date,
                time,
                PatientInfo {
                    name: patient_name.to_string(),
                    dob,
                    gender: request.gender.clone(),
                    mobile_number: mobile_number.to_string(),
                    age: request.age,
                    last_visit_date,
                },
            )),
            _ => Err(BookingError::Validation { fields }),
        }
    }
}

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use shared_models::events::AppointmentSnapshot;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub tracking_id: String,
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
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn to_snapshot(&self) -> AppointmentSnapshot {
        AppointmentSnapshot {
            id: self.id,
            tracking_id: self.tracking_id.clone(),
            patient_name: self.patient_name.clone(),
            doctor_id: self.doctor_id,
            doctor_name: self.doctor_name.clone(),
            doctor_specialization: self.doctor_specialization.clone(),
            hospital_id: self.hospital_id,
            hospital_name: self.hospital_name.clone(),
            appointment_date: self.appointment_date,
            appointment_time: self.appointment_time,
            status: self.status.to_string(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Booked,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }

    /// Booked may move to either terminal state; terminal states are final.
    pub fn can_transition_to(&self, target: AppointmentStatus) -> bool {
        matches!(
            (self, target),
            (AppointmentStatus::Booked, AppointmentStatus::Completed)
                | (AppointmentStatus::Booked, AppointmentStatus::Cancelled)
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Booked => write!(f, "BOOKED"),
            AppointmentStatus::Completed => write!(f, "COMPLETED"),
            AppointmentStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// Flat booking submission. Every field is optional at the type level so a
/// single validation pass can report all missing or malformed fields at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentRequest {
    pub doctor_id: Option<i64>,
    pub hospital_id: Option<i64>,
    pub appointment_date: Option<String>,
    pub appointment_time: Option<String>,
    pub patient_name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub mobile_number: Option<String>,
    pub age: Option<i32>,
    pub last_appointment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub tracking_id: String,
}

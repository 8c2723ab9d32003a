use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use location_cell::LocationDirectory;

use crate::error::BookingError;
use crate::services::clock::Clock;

fn mobile_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{10,15}$").expect("valid mobile pattern"))
}

pub fn is_valid_mobile(value: &str) -> bool {
    mobile_pattern().is_match(value)
}

// ==============================================================================
// STEP PAYLOADS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSelection {
    pub region_id: i64,
    pub city: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProviderSelection {
    pub hospital_id: i64,
    pub doctor_id: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScheduleSelection {
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientInfo {
    pub name: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub mobile_number: String,
    pub age: Option<i32>,
    pub last_visit_date: Option<NaiveDate>,
}

// ==============================================================================
// WIZARD STATE MACHINE
// ==============================================================================

/// Client-held wizard state. Each variant carries exactly the fields that are
/// valid at that step; transitions consume the draft and re-validate their
/// inputs, so a later step can never observe a selection its guards did not
/// admit. Drafts are never persisted server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BookingDraft {
    SelectLocation,
    SelectProvider {
        location: LocationSelection,
    },
    SelectSchedule {
        location: Option<LocationSelection>,
        provider: ProviderSelection,
    },
    SelectPatientInfo {
        location: Option<LocationSelection>,
        provider: ProviderSelection,
        schedule: ScheduleSelection,
    },
}

/// All steps passed; ready for commit.
#[derive(Debug, Clone)]
pub struct CompletedDraft {
    pub provider: ProviderSelection,
    pub schedule: ScheduleSelection,
    pub patient: PatientInfo,
}

impl BookingDraft {
    pub fn new() -> Self {
        BookingDraft::SelectLocation
    }

    /// Picking a region/city restarts the cascade: any previously chosen
    /// hospital, doctor or schedule is discarded.
    pub fn select_location(
        self,
        directory: &LocationDirectory,
        region_id: i64,
        city: &str,
    ) -> Result<Self, BookingError> {
        let cities = directory
            .list_cities(region_id)
            .map_err(|_| BookingError::invalid_field("regionId"))?;

        if !cities.iter().any(|c| c.name.eq_ignore_ascii_case(city)) {
            return Err(BookingError::invalid_field("city"));
        }

        Ok(BookingDraft::SelectProvider {
            location: LocationSelection {
                region_id,
                city: city.to_string(),
            },
        })
    }

    /// Direct entry with a preselected hospital/doctor. The location steps
    /// collapse, but existence and association are still checked.
    pub fn enter_at_provider(
        directory: &LocationDirectory,
        hospital_id: i64,
        doctor_id: i64,
    ) -> Result<Self, BookingError> {
        let provider = validate_provider(directory, hospital_id, doctor_id)?;
        Ok(BookingDraft::SelectSchedule {
            location: None,
            provider,
        })
    }

    pub fn select_provider(
        self,
        directory: &LocationDirectory,
        hospital_id: i64,
        doctor_id: i64,
    ) -> Result<Self, BookingError> {
        let location = match self {
            BookingDraft::SelectProvider { location } => location,
            // Re-selection from a later step discards the schedule.
            BookingDraft::SelectSchedule {
                location: Some(location),
                ..
            }
            | BookingDraft::SelectPatientInfo {
                location: Some(location),
                ..
            } => location,
            _ => return Err(BookingError::OutOfOrder("location not selected")),
        };

        let hospital = directory
            .get_hospital(hospital_id)
            .map_err(|_| BookingError::HospitalNotFound(hospital_id))?;

        if !hospital.city.eq_ignore_ascii_case(&location.city) {
            return Err(BookingError::invalid_field("hospitalId"));
        }

        let provider = validate_provider(directory, hospital_id, doctor_id)?;

        Ok(BookingDraft::SelectSchedule {
            location: Some(location),
            provider,
        })
    }

    pub fn select_schedule(
        self,
        clock: &dyn Clock,
        appointment_date: NaiveDate,
        appointment_time: NaiveTime,
    ) -> Result<Self, BookingError> {
        let (location, provider) = match self {
            BookingDraft::SelectSchedule { location, provider } => (location, provider),
            BookingDraft::SelectPatientInfo {
                location, provider, ..
            } => (location, provider),
            _ => return Err(BookingError::OutOfOrder("provider not selected")),
        };

        if appointment_date <= clock.today() {
            return Err(BookingError::invalid_field(
                "appointmentDate (must be later than today)",
            ));
        }

        Ok(BookingDraft::SelectPatientInfo {
            location,
            provider,
            schedule: ScheduleSelection {
                appointment_date,
                appointment_time,
            },
        })
    }

    pub fn select_patient_info(self, patient: PatientInfo) -> Result<CompletedDraft, BookingError> {
        let (provider, schedule) = match self {
            BookingDraft::SelectPatientInfo {
                provider, schedule, ..
            } => (provider, schedule),
            _ => return Err(BookingError::OutOfOrder("schedule not selected")),
        };

        let mut fields = Vec::new();
        if patient.name.trim().is_empty() {
            fields.push("patientName".to_string());
        }
        if !mobile_pattern().is_match(patient.mobile_number.trim()) {
            fields.push("mobileNumber".to_string());
        }
        if !fields.is_empty() {
            return Err(BookingError::Validation { fields });
        }

        Ok(CompletedDraft {
            provider,
            schedule,
            patient,
        })
    }
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_provider(
    directory: &LocationDirectory,
    hospital_id: i64,
    doctor_id: i64,
) -> Result<ProviderSelection, BookingError> {
    directory
        .get_hospital(hospital_id)
        .map_err(|_| BookingError::HospitalNotFound(hospital_id))?;

    let doctor = directory
        .get_doctor(doctor_id)
        .map_err(|_| BookingError::DoctorNotFound(doctor_id))?;

    if doctor.hospital_id != hospital_id {
        return Err(BookingError::invalid_field(
            "doctorId (doctor is not associated with the selected hospital)",
        ));
    }

    Ok(ProviderSelection {
        hospital_id,
        doctor_id,
    })
}

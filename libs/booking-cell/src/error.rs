use thiserror::Error;

use shared_models::error::AppError;

use crate::models::AppointmentStatus;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid or missing fields: {}", .fields.join(", "))]
    Validation { fields: Vec<String> },

    #[error("Wizard step out of order: {0}")]
    OutOfOrder(&'static str),

    #[error("Doctor not found with id: {0}")]
    DoctorNotFound(i64),

    #[error("Hospital not found with id: {0}")]
    HospitalNotFound(i64),

    #[error("Appointment not found with id: {0}")]
    AppointmentNotFound(i64),

    #[error("Appointment not found with tracking ID: {0}")]
    TrackingIdNotFound(String),

    #[error("Appointment cannot be modified in current status: {0}")]
    InvalidStatusTransition(AppointmentStatus),

    #[error("Unauthorized access to appointment")]
    Unauthorized,

    #[error("Booking storage unavailable: {0}")]
    StoreUnavailable(String),
}

impl BookingError {
    pub fn invalid_field(field: &str) -> Self {
        BookingError::Validation {
            fields: vec![field.to_string()],
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match &err {
            BookingError::Validation { .. } => AppError::ValidationError(err.to_string()),
            BookingError::OutOfOrder(_) => AppError::Conflict(err.to_string()),
            BookingError::DoctorNotFound(_)
            | BookingError::HospitalNotFound(_)
            | BookingError::AppointmentNotFound(_)
            | BookingError::TrackingIdNotFound(_) => AppError::NotFound(err.to_string()),
            BookingError::InvalidStatusTransition(_) => AppError::Conflict(err.to_string()),
            BookingError::Unauthorized => AppError::Forbidden(err.to_string()),
            BookingError::StoreUnavailable(_) => AppError::TransientInfra(err.to_string()),
        }
    }
}

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::BookingError;
pub use models::*;
pub use router::booking_routes;
pub use services::booking::BookingService;
pub use services::clock::{Clock, FixedClock, SystemClock};
pub use services::draft::{BookingDraft, CompletedDraft, PatientInfo};
pub use services::store::{format_tracking_id, AppointmentStore, InMemoryAppointmentStore, NewAppointment};

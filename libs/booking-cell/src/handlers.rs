use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use serde_json::{json, Value};
use tracing::info;

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::AppointmentRequest;
use crate::services::booking::BookingService;

/// Book an appointment for the authenticated user.
pub async fn book_appointment(
    State(service): State<Arc<BookingService>>,
    Extension(user): Extension<User>,
    Json(request): Json<AppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let confirmation = service.book(request, &user).await?;

    Ok(Json(json!({
        "trackingId": confirmation.tracking_id
    })))
}

/// Public tracking lookup by the human-shareable tracking id.
pub async fn track_appointment(
    State(service): State<Arc<BookingService>>,
    Path(tracking_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let snapshot = service.track(&tracking_id).await?;
    Ok(Json(json!(snapshot)))
}

/// The authenticated user's appointments, newest first.
pub async fn my_appointments(
    State(service): State<Arc<BookingService>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let appointments = service.list_for_owner(&user).await?;
    Ok(Json(json!(appointments)))
}

pub async fn cancel_appointment(
    State(service): State<Arc<BookingService>>,
    Extension(user): Extension<User>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    info!("Cancel request for appointment {} from user {}", appointment_id, user.id);

    let snapshot = service.cancel(appointment_id, &user).await?;
    Ok(Json(json!(snapshot)))
}

pub async fn complete_appointment(
    State(service): State<Arc<BookingService>>,
    Extension(user): Extension<User>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    info!("Complete request for appointment {} from user {}", appointment_id, user.id);

    let snapshot = service.complete(appointment_id, &user).await?;
    Ok(Json(json!(snapshot)))
}

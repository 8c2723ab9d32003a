use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::services::aggregator::DashboardHandle;

/// Current dashboard snapshot. Same data the stats topic pushes, for clients
/// that poll instead of subscribing.
pub async fn get_dashboard_stats(
    State(handle): State<DashboardHandle>,
) -> Result<Json<Value>, AppError> {
    let snapshot = handle.current_snapshot();
    Ok(Json(json!(snapshot)))
}

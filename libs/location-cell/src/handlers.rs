use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::{json, Value};
use tracing::info;

use shared_models::error::AppError;

use crate::models::{CityQuery, HospitalFilters, HospitalQuery};
use crate::services::directory::LocationDirectory;

pub async fn list_regions(
    State(directory): State<Arc<LocationDirectory>>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(json!(directory.list_regions())))
}

pub async fn list_cities(
    State(directory): State<Arc<LocationDirectory>>,
    Query(query): Query<CityQuery>,
) -> Result<Json<Value>, AppError> {
    let cities = directory.list_cities(query.region_id)?;
    Ok(Json(json!(cities)))
}

pub async fn list_hospitals(
    State(directory): State<Arc<LocationDirectory>>,
    Query(query): Query<HospitalQuery>,
) -> Result<Json<Value>, AppError> {
    info!(
        "Hospital listing request: city={:?} type={:?} page={}",
        query.city, query.hospital_type, query.page
    );

    let filters = HospitalFilters {
        hospital_type: query.hospital_type,
        search: query.search,
    };
    let page = directory.list_hospitals(query.city.as_deref(), &filters, query.page, query.size);

    Ok(Json(json!(page)))
}

pub async fn get_hospital(
    State(directory): State<Arc<LocationDirectory>>,
    Path(hospital_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let hospital = directory.get_hospital(hospital_id)?;
    Ok(Json(json!(hospital)))
}

pub async fn list_hospital_doctors(
    State(directory): State<Arc<LocationDirectory>>,
    Path(hospital_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let doctors = directory.list_doctors(hospital_id)?;
    Ok(Json(json!(doctors)))
}

pub async fn get_doctor(
    State(directory): State<Arc<LocationDirectory>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let doctor = directory.get_doctor(doctor_id)?;
    Ok(Json(json!(doctor)))
}

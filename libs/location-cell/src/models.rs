use serde::{Deserialize, Serialize};

// ==============================================================================
// REFERENCE ENTITIES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub region_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hospital {
    pub id: i64,
    pub name: String,
    pub region: String,
    pub city: String,
    pub hospital_type: String,
    pub rating: Option<f32>,
    pub emergency_24x7: bool,
    pub insurance_supported: bool,
    pub website_url: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub degree: String,
    pub specialization: String,
    pub experience_years: i32,
    pub hospital_id: i64,
    pub rating: Option<f32>,
    pub past_experience: Option<String>,
    pub image_url: Option<String>,
}

// ==============================================================================
// QUERY MODELS
// ==============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HospitalFilters {
    pub hospital_type: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HospitalQuery {
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub hospital_type: Option<String>,
    pub search: Option<String>,
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub size: usize,
}

fn default_page_size() -> usize {
    20
}

#[derive(Debug, Clone, Deserialize)]
pub struct CityQuery {
    pub region_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn slice(mut items: Vec<T>, page: usize, size: usize) -> Self {
        let size = size.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(size);
        let start = page.saturating_mul(size).min(total_items);
        let end = (start + size).min(total_items);
        let items = items.drain(start..end).collect();

        Self {
            items,
            page,
            size,
            total_items,
            total_pages,
        }
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum LocationError {
    #[error("Region not found with id: {0}")]
    RegionNotFound(i64),

    #[error("Hospital not found with id: {0}")]
    HospitalNotFound(i64),

    #[error("Doctor not found with id: {0}")]
    DoctorNotFound(i64),
}

impl From<LocationError> for shared_models::error::AppError {
    fn from(err: LocationError) -> Self {
        shared_models::error::AppError::NotFound(err.to_string())
    }
}

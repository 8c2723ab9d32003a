use std::collections::HashMap;

use tracing::info;

use crate::models::{
    City, Doctor, Hospital, HospitalFilters, LocationError, Paginated, Region,
};

/// Read-only catalog of regions, cities, hospitals and doctors.
///
/// The directory is immutable after construction, so lookups are lock-free
/// and safe to share behind an `Arc` across every request handler. Reference
/// data editing happens outside this system.
pub struct LocationDirectory {
    regions: Vec<Region>,
    cities: Vec<City>,
    hospitals: Vec<Hospital>,
    doctors: Vec<Doctor>,
    hospitals_by_id: HashMap<i64, usize>,
    doctors_by_id: HashMap<i64, usize>,
}

impl LocationDirectory {
    pub fn new(
        regions: Vec<Region>,
        cities: Vec<City>,
        hospitals: Vec<Hospital>,
        doctors: Vec<Doctor>,
    ) -> Self {
        let hospitals_by_id = hospitals
            .iter()
            .enumerate()
            .map(|(idx, h)| (h.id, idx))
            .collect();
        let doctors_by_id = doctors
            .iter()
            .enumerate()
            .map(|(idx, d)| (d.id, idx))
            .collect();

        info!(
            "Location directory loaded: {} regions, {} cities, {} hospitals, {} doctors",
            regions.len(),
            cities.len(),
            hospitals.len(),
            doctors.len()
        );

        Self {
            regions,
            cities,
            hospitals,
            doctors,
            hospitals_by_id,
            doctors_by_id,
        }
    }

    pub fn list_regions(&self) -> Vec<Region> {
        self.regions.clone()
    }

    pub fn list_cities(&self, region_id: i64) -> Result<Vec<City>, LocationError> {
        if !self.regions.iter().any(|r| r.id == region_id) {
            return Err(LocationError::RegionNotFound(region_id));
        }

        Ok(self
            .cities
            .iter()
            .filter(|c| c.region_id == region_id)
            .cloned()
            .collect())
    }

    /// Hospitals physically located in the given city, filtered and paginated,
    /// name ascending.
    pub fn list_hospitals(
        &self,
        city: Option<&str>,
        filters: &HospitalFilters,
        page: usize,
        size: usize,
    ) -> Paginated<Hospital> {
        let mut matches: Vec<Hospital> = self
            .hospitals
            .iter()
            .filter(|h| city.is_none_or(|c| h.city.eq_ignore_ascii_case(c)))
            .filter(|h| {
                filters
                    .hospital_type
                    .as_deref()
                    .is_none_or(|t| h.hospital_type.eq_ignore_ascii_case(t))
            })
            .filter(|h| {
                filters.search.as_deref().is_none_or(|s| {
                    let needle = s.to_lowercase();
                    h.name.to_lowercase().contains(&needle)
                        || h.city.to_lowercase().contains(&needle)
                        || h.region.to_lowercase().contains(&needle)
                })
            })
            .cloned()
            .collect();

        matches.sort_by(|a, b| a.name.cmp(&b.name));

        Paginated::slice(matches, page, size)
    }

    pub fn list_doctors(&self, hospital_id: i64) -> Result<Vec<Doctor>, LocationError> {
        if !self.hospitals_by_id.contains_key(&hospital_id) {
            return Err(LocationError::HospitalNotFound(hospital_id));
        }

        Ok(self
            .doctors
            .iter()
            .filter(|d| d.hospital_id == hospital_id)
            .cloned()
            .collect())
    }

    pub fn get_hospital(&self, id: i64) -> Result<&Hospital, LocationError> {
        self.hospitals_by_id
            .get(&id)
            .map(|&idx| &self.hospitals[idx])
            .ok_or(LocationError::HospitalNotFound(id))
    }

    pub fn get_doctor(&self, id: i64) -> Result<&Doctor, LocationError> {
        self.doctors_by_id
            .get(&id)
            .map(|&idx| &self.doctors[idx])
            .ok_or(LocationError::DoctorNotFound(id))
    }

    pub fn hospital_count(&self) -> usize {
        self.hospitals.len()
    }

    pub fn doctor_count(&self) -> usize {
        self.doctors.len()
    }
}

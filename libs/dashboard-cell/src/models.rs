use serde::{Deserialize, Serialize};

use shared_models::events::AppointmentSnapshot;

/// Rolling counters shown on the operator dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_hospitals: u64,
    pub total_doctors: u64,
    pub total_appointments: u64,
    pub total_patients: u64,
    pub booked_appointments: u64,
    pub completed_appointments: u64,
    pub cancelled_appointments: u64,
}

/// What the stats topic carries: counters plus the bounded activity feed,
/// newest first. Retained by the hub so a reconnecting dashboard is current
/// after a single message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub recent_activity: Vec<AppointmentSnapshot>,
}

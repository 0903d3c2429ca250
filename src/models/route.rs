//! Route summary between two cities

use serde::{Deserialize, Serialize};

use super::TravelMode;

/// Distance and duration for one leg in one mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub mode: TravelMode,
    /// Straight-line distance in kilometers
    pub great_circle_km: f64,
    /// Distance actually travelled in this mode, in kilometers
    pub distance_km: f64,
    /// Estimated door-to-door duration in hours
    pub duration_hours: f64,
}

impl RouteInfo {
    /// Format duration as "20h 9m"
    #[must_use]
    pub fn format_duration(&self) -> String {
        let total_minutes = (self.duration_hours * 60.0).round() as u64;
        format!("{}h {}m", total_minutes / 60, total_minutes % 60)
    }
}

//! Route distance and duration estimates
//!
//! Distances are great-circle approximations, not road-network shortest
//! paths. Road distance scales the straight line by a circuity factor.

use crate::config::RouteConfig;
use crate::models::{City, RouteInfo, TravelMode};

/// Great-circle distance between two cities in kilometers
#[must_use]
pub fn great_circle_km(from: &City, to: &City) -> f64 {
    haversine::distance(
        haversine::Location {
            latitude: from.latitude,
            longitude: from.longitude,
        },
        haversine::Location {
            latitude: to.latitude,
            longitude: to.longitude,
        },
        haversine::Units::Kilometers,
    )
}

/// Pure route calculator parameterised by configured speeds
#[derive(Debug, Clone)]
pub struct DistanceEngine {
    config: RouteConfig,
}

impl DistanceEngine {
    #[must_use]
    pub fn new(config: RouteConfig) -> Self {
        Self { config }
    }

    /// Distance and duration between two cities for one mode
    #[must_use]
    pub fn compute_route(&self, origin: &City, destination: &City, mode: TravelMode) -> RouteInfo {
        let great_circle = great_circle_km(origin, destination);

        let (distance_km, duration_hours) = match mode {
            TravelMode::Road => {
                let distance = great_circle * self.config.road_circuity;
                (distance, distance / self.config.road_speed_kmh)
            }
            TravelMode::Flight => (
                great_circle,
                great_circle / self.config.flight_speed_kmh + self.config.flight_overhead_hours,
            ),
        };

        RouteInfo {
            mode,
            great_circle_km: great_circle,
            distance_km,
            duration_hours,
        }
    }
}

impl Default for DistanceEngine {
    fn default() -> Self {
        Self::new(RouteConfig::default())
    }
}

//! `TripPlanner` - Trip planning aggregation engine
//!
//! This library resolves city names to coordinates, estimates routes and
//! budgets, and combines weather, safety and place recommendations into a
//! single trip plan. Every external service has a bundled fallback so a plan
//! can always be produced offline.

pub mod api;
pub mod budget;
pub mod conditions;
pub mod config;
pub mod distance;
pub mod error;
pub mod fallback;
pub mod geo;
pub mod logging;
pub mod models;
pub mod places;
pub mod planner;
pub mod reference;
pub mod web;

// Re-export core types for public API
pub use budget::BudgetEstimator;
pub use conditions::{ConditionsProvider, OpenWeatherMapClient, WeatherProvider};
pub use config::TripPlannerConfig;
pub use distance::DistanceEngine;
pub use error::TripPlannerError;
pub use geo::{GeoResolver, GeocodingProvider, NominatimGeocoder, OfflineGeocoder};
pub use models::{
    BudgetBreakdown, City, ConditionsReport, DataSource, PlaceCatalogEntry, PlaceCategory,
    PriceTier, RouteInfo, Sourced, TravelMode, TripPlan, TripRequest,
};
pub use places::PlaceCatalog;
pub use planner::TripPlanner;
pub use reference::ReferenceData;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripPlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

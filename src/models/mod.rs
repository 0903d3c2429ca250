//! Data models for the trip planner
//!
//! This module contains the core domain models organized by concern:
//! - City: Geographic coordinates and name normalization
//! - Trip: Requests and travel modes
//! - Route, Budget, Conditions, Place: the sections of a plan
//! - Plan: the aggregate returned to callers

pub mod budget;
pub mod city;
pub mod conditions;
pub mod place;
pub mod plan;
pub mod route;
pub mod source;
pub mod trip;

// Re-export all public types for convenient access
pub use budget::{BudgetBreakdown, BudgetCategory};
pub use city::{City, normalize_city_name};
pub use conditions::{
    AdvisoryCategory, AdvisorySource, AreaGuide, ConditionsReport, EmergencyContacts,
    SafetyAdvisory, WeatherSnapshot,
};
pub use place::{PlaceCatalogEntry, PlaceCategory, PriceTier};
pub use plan::{DestinationPlaces, TripPlan};
pub use route::RouteInfo;
pub use source::{DataSource, Sourced};
pub use trip::{TravelMode, TripRequest};

//! City model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};

use crate::{Result, TripPlannerError};

/// A named city with coordinates in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct City {
    /// Display name
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Province or state, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    /// Country name, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Normalize a city name for lookups: trimmed, inner whitespace collapsed, lowercased
#[must_use]
pub fn normalize_city_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl City {
    /// Create a new city, rejecting out-of-range coordinates
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self> {
        let city = Self {
            name: name.into(),
            latitude,
            longitude,
            province: None,
            country: None,
        };
        city.validate()?;
        Ok(city)
    }

    /// Attach a country name
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Check the name and coordinate invariants
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TripPlannerError::invalid_request("City name cannot be empty"));
        }
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(TripPlannerError::invalid_request(format!(
                "Latitude {} of '{}' must be between -90 and 90 degrees",
                self.latitude, self.name
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(TripPlannerError::invalid_request(format!(
                "Longitude {} of '{}' must be between -180 and 180 degrees",
                self.longitude, self.name
            )));
        }
        Ok(())
    }

    /// Lookup key for this city
    #[must_use]
    pub fn key(&self) -> String {
        normalize_city_name(&self.name)
    }

    /// Format city as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

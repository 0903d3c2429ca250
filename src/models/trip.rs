//! Trip request model and travel modes

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use super::city::normalize_city_name;
use crate::config::LimitsConfig;
use crate::{Result, TripPlannerError};

/// How the traveler gets from origin to destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Road,
    Flight,
}

impl TravelMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Road => "road",
            TravelMode::Flight => "flight",
        }
    }
}

impl FromStr for TravelMode {
    type Err = TripPlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "road" => Ok(TravelMode::Road),
            "flight" => Ok(TravelMode::Flight),
            _ => Err(TripPlannerError::invalid_mode(s.trim())),
        }
    }
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single planning request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,
    pub nights: u32,
    pub travelers: u32,
    pub mode: TravelMode,
}

impl TripRequest {
    #[must_use]
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        nights: u32,
        travelers: u32,
        mode: TravelMode,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            nights,
            travelers,
            mode,
        }
    }

    /// Build a request from loosely typed input, parsing the mode string
    pub fn parse(
        origin: impl Into<String>,
        destination: impl Into<String>,
        nights: u32,
        travelers: u32,
        mode: &str,
    ) -> Result<Self> {
        Ok(Self::new(origin, destination, nights, travelers, mode.parse()?))
    }

    /// Check every request constraint, naming the first one violated
    pub fn validate(&self, limits: &LimitsConfig) -> Result<()> {
        let origin = normalize_city_name(&self.origin);
        let destination = normalize_city_name(&self.destination);

        if origin.is_empty() {
            return Err(TripPlannerError::invalid_request("Origin city cannot be empty"));
        }
        if destination.is_empty() {
            return Err(TripPlannerError::invalid_request(
                "Destination city cannot be empty",
            ));
        }
        if origin == destination {
            return Err(TripPlannerError::invalid_request(format!(
                "Origin and destination must be different cities (both are '{}')",
                self.destination.trim()
            )));
        }
        if self.nights < 1 {
            return Err(TripPlannerError::invalid_request("Nights must be at least 1"));
        }
        if self.nights > limits.max_nights {
            return Err(TripPlannerError::invalid_request(format!(
                "Nights cannot exceed {}",
                limits.max_nights
            )));
        }
        if self.travelers < 1 {
            return Err(TripPlannerError::invalid_request(
                "Travelers must be at least 1",
            ));
        }
        if self.travelers > limits.max_travelers {
            return Err(TripPlannerError::invalid_request(format!(
                "Travelers cannot exceed {}",
                limits.max_travelers
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn limits() -> LimitsConfig {
        LimitsConfig::default()
    }

    #[rstest]
    #[case("road", TravelMode::Road)]
    #[case("ROAD", TravelMode::Road)]
    #[case(" flight ", TravelMode::Flight)]
    fn test_parse_mode(#[case] input: &str, #[case] expected: TravelMode) {
        assert_eq!(input.parse::<TravelMode>().unwrap(), expected);
    }

    #[rstest]
    #[case("boat")]
    #[case("")]
    #[case("teleport")]
    fn test_parse_invalid_mode(#[case] input: &str) {
        let err = input.parse::<TravelMode>().unwrap_err();
        assert!(matches!(err, TripPlannerError::InvalidMode { .. }));
    }

    #[test]
    fn test_request_parse_propagates_invalid_mode() {
        let result = TripRequest::parse("Lahore", "Karachi", 3, 2, "hovercraft");
        assert!(matches!(result, Err(TripPlannerError::InvalidMode { .. })));
    }

    #[test]
    fn test_valid_request() {
        let request = TripRequest::new("Lahore", "Karachi", 3, 2, TravelMode::Road);
        assert!(request.validate(&limits()).is_ok());
    }

    #[rstest]
    #[case("", "Karachi", 3, 2, "Origin")]
    #[case("Lahore", "   ", 3, 2, "Destination")]
    #[case("Lahore", " lahore ", 3, 2, "must be different")]
    #[case("Lahore", "Karachi", 0, 2, "Nights must be at least 1")]
    #[case("Lahore", "Karachi", 91, 2, "Nights cannot exceed")]
    #[case("Lahore", "Karachi", 3, 0, "Travelers must be at least 1")]
    #[case("Lahore", "Karachi", 3, 51, "Travelers cannot exceed")]
    fn test_invalid_requests(
        #[case] origin: &str,
        #[case] destination: &str,
        #[case] nights: u32,
        #[case] travelers: u32,
        #[case] expected: &str,
    ) {
        let request = TripRequest::new(origin, destination, nights, travelers, TravelMode::Road);
        let err = request.validate(&limits()).unwrap_err();
        assert!(matches!(err, TripPlannerError::InvalidRequest { .. }));
        assert!(err.to_string().contains(expected), "got: {err}");
    }

    #[test]
    fn test_mode_serde_is_lowercase() {
        let json = serde_json::to_string(&TravelMode::Flight).unwrap();
        assert_eq!(json, "\"flight\"");
    }
}

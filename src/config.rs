//! Configuration management for the trip planner
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings. Every costing
//! rate, speed and timeout used by the engine lives here.

use crate::TripPlannerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable consulted for the weather API key
pub const WEATHER_API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Root configuration structure for the trip planner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TripPlannerConfig {
    /// Live geocoding settings
    pub geocoding: GeocodingConfig,
    /// Weather API configuration
    pub weather: WeatherConfig,
    /// Route speed and distance model
    pub route: RouteConfig,
    /// Budget rates
    pub budget: BudgetConfig,
    /// Place catalog settings
    pub places: PlacesConfig,
    /// Request limits
    pub limits: LimitsConfig,
    /// Reference data location
    pub data: DataConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// HTTP server settings
    pub server: ServerConfig,
}

/// Live geocoding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    /// Query the live provider at all; when false the static table is used directly
    pub enabled: bool,
    /// Base URL for the Nominatim-compatible search API
    pub base_url: String,
    /// Country used to qualify city queries
    pub country: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key; falls back to `OPENWEATHER_API_KEY`
    pub api_key: Option<String>,
    /// Base URL for weather API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

/// Mode-specific speeds and distance adjustments
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Effective average road speed in km/h
    pub road_speed_kmh: f64,
    /// Effective average cruise speed in km/h
    pub flight_speed_kmh: f64,
    /// Fixed airport overhead added to every flight, in hours
    pub flight_overhead_hours: f64,
    /// Ratio of road distance to great-circle distance
    pub road_circuity: f64,
}

/// Budget rates, all in `currency` units
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Currency code reported with every breakdown
    pub currency: String,
    /// Road fare per km per traveler
    pub road_rate_per_km: f64,
    /// Flight fare per km per traveler
    pub flight_rate_per_km: f64,
    /// Multiplier applied to one-way transport cost
    pub round_trip_factor: f64,
    /// Travelers per room
    pub room_capacity: u32,
    /// Nightly room rate when the destination has no entry
    pub default_nightly_rate: f64,
    /// Food cost per person per day
    pub food_per_person_per_day: f64,
    /// Activities cost per person (per day when scaled by nights)
    pub activities_per_person: f64,
    /// Multiply the activities line by the number of nights
    pub scale_activities_by_nights: bool,
}

/// Place catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacesConfig {
    /// Number of entries returned per category
    pub default_limit: usize,
}

/// Upper bounds on request parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_nights: u32,
    pub max_travelers: u32,
}

/// Reference data location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding replacement dataset files; bundled data when unset
    pub directory: Option<PathBuf>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Per-request timeout in seconds
    pub request_timeout_seconds: u64,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            country: Some("Pakistan".to_string()),
            timeout_seconds: 3,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            timeout_seconds: 3,
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            road_speed_kmh: 60.0,
            flight_speed_kmh: 700.0,
            flight_overhead_hours: 2.0,
            road_circuity: 1.17,
        }
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            currency: "PKR".to_string(),
            road_rate_per_km: 2.5,
            flight_rate_per_km: 15.0,
            round_trip_factor: 2.0,
            room_capacity: 2,
            default_nightly_rate: 5000.0,
            food_per_person_per_day: 2000.0,
            activities_per_person: 1500.0,
            scale_activities_by_nights: true,
        }
    }
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self { default_limit: 5 }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_nights: 90,
            max_travelers: 50,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            request_timeout_seconds: 15,
        }
    }
}

impl GeocodingConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl WeatherConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// The configured key, or the one from the environment
    #[must_use]
    pub fn resolved_api_key(&self) -> Option<String> {
        let usable = |key: &String| !key.trim().is_empty();
        self.api_key
            .clone()
            .filter(usable)
            .or_else(|| std::env::var(WEATHER_API_KEY_ENV).ok().filter(usable))
    }
}

impl TripPlannerConfig {
    /// Default configuration file name looked up in the working directory
    pub const DEFAULT_FILE: &'static str = "tripplanner.toml";

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_FILE));

        if config_path.is_some() && !config_file.exists() {
            return Err(TripPlannerError::config(format!(
                "Config file not found: {}",
                config_file.display()
            ))
            .into());
        }

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TRIPPLANNER_WEATHER__TIMEOUT_SECONDS=5 and friends
        builder = builder.add_source(
            Environment::with_prefix("TRIPPLANNER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: TripPlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> std::result::Result<(), TripPlannerError> {
        self.validate_timeouts()?;
        self.validate_rates()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_timeouts(&self) -> std::result::Result<(), TripPlannerError> {
        for (name, seconds) in [
            ("Geocoding", self.geocoding.timeout_seconds),
            ("Weather", self.weather.timeout_seconds),
        ] {
            if !(1..=30).contains(&seconds) {
                return Err(TripPlannerError::config(format!(
                    "{name} timeout must be between 1 and 30 seconds"
                )));
            }
        }
        if self.server.request_timeout_seconds == 0 {
            return Err(TripPlannerError::config(
                "Server request timeout must be at least 1 second",
            ));
        }
        Ok(())
    }

    fn validate_rates(&self) -> std::result::Result<(), TripPlannerError> {
        let route = &self.route;
        if route.road_speed_kmh <= 0.0 || route.flight_speed_kmh <= 0.0 {
            return Err(TripPlannerError::config("Travel speeds must be positive"));
        }
        if route.flight_overhead_hours < 0.0 {
            return Err(TripPlannerError::config(
                "Flight overhead cannot be negative",
            ));
        }
        if route.road_circuity < 1.0 {
            return Err(TripPlannerError::config(
                "Road circuity cannot be below 1.0",
            ));
        }

        let budget = &self.budget;
        let rates = [
            ("road_rate_per_km", budget.road_rate_per_km),
            ("flight_rate_per_km", budget.flight_rate_per_km),
            ("round_trip_factor", budget.round_trip_factor),
            ("default_nightly_rate", budget.default_nightly_rate),
            ("food_per_person_per_day", budget.food_per_person_per_day),
            ("activities_per_person", budget.activities_per_person),
        ];
        if let Some((name, _)) = rates
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(TripPlannerError::config(format!(
                "Budget rate '{name}' must be a non-negative number"
            )));
        }
        if budget.room_capacity == 0 {
            return Err(TripPlannerError::config("Room capacity must be at least 1"));
        }

        if self.places.default_limit == 0 {
            return Err(TripPlannerError::config("Place limit must be at least 1"));
        }
        if self.limits.max_nights == 0 || self.limits.max_travelers == 0 {
            return Err(TripPlannerError::config(
                "Request limits must allow at least one night and one traveler",
            ));
        }
        Ok(())
    }

    fn validate_string_values(&self) -> std::result::Result<(), TripPlannerError> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripPlannerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripPlannerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        for (name, url) in [
            ("Geocoding", &self.geocoding.base_url),
            ("Weather", &self.weather.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TripPlannerError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                )));
            }
        }

        if self.budget.currency.trim().is_empty() {
            return Err(TripPlannerError::config("Currency code cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = TripPlannerConfig::default();
        assert_eq!(config.route.road_speed_kmh, 60.0);
        assert_eq!(config.route.flight_speed_kmh, 700.0);
        assert_eq!(config.route.flight_overhead_hours, 2.0);
        assert_eq!(config.budget.round_trip_factor, 2.0);
        assert_eq!(config.budget.room_capacity, 2);
        assert_eq!(config.budget.currency, "PKR");
        assert_eq!(config.places.default_limit, 5);
        assert_eq!(config.logging.level, "info");
        assert!(config.weather.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = TripPlannerConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = TripPlannerConfig::default();
        config.weather.timeout_seconds = 120;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Weather timeout"));

        let mut config = TripPlannerConfig::default();
        config.geocoding.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rates() {
        let mut config = TripPlannerConfig::default();
        config.budget.food_per_person_per_day = -1.0;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("food_per_person_per_day"));

        let mut config = TripPlannerConfig::default();
        config.budget.room_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = TripPlannerConfig::default();
        config.route.road_circuity = 0.8;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = TripPlannerConfig::default();
        config.geocoding.base_url = "nominatim.local".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Geocoding base URL"));
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = std::env::temp_dir().join(format!("tripplanner-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("custom.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[budget]\nfood_per_person_per_day = 2500.0\n\n[route]\nroad_speed_kmh = 55.0\n\n[geocoding]\nenabled = false"
        )
        .unwrap();

        let config = TripPlannerConfig::load_from_path(Some(&path)).unwrap();
        assert_eq!(config.budget.food_per_person_per_day, 2500.0);
        assert_eq!(config.route.road_speed_kmh, 55.0);
        assert!(!config.geocoding.enabled);
        // untouched sections keep their defaults
        assert_eq!(config.budget.flight_rate_per_km, 15.0);
        assert_eq!(config.places.default_limit, 5);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let result = TripPlannerConfig::load_from_path(Some(Path::new("/nonexistent/trip.toml")));
        assert!(result.unwrap_err().to_string().contains("Config file not found"));
    }

    #[test]
    fn test_resolved_api_key_prefers_config() {
        let config = WeatherConfig {
            api_key: Some("configured_key_123".to_string()),
            ..WeatherConfig::default()
        };
        assert_eq!(
            config.resolved_api_key(),
            Some("configured_key_123".to_string())
        );

        let blank = WeatherConfig {
            api_key: Some("   ".to_string()),
            ..WeatherConfig::default()
        };
        // a blank configured key never wins; the environment may or may not supply one
        assert_ne!(blank.resolved_api_key(), Some("   ".to_string()));
    }
}

//! Live geocoding providers

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::config::GeocodingConfig;
use crate::models::City;
use crate::{Result, TripPlannerError};

/// Looks up coordinates for a free-form city name.
///
/// `Ok(None)` means the provider answered but has no match.
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    async fn geocode(&self, query: &str) -> Result<Option<City>>;
}

/// One hit from the Nominatim search API; coordinates arrive as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// OpenStreetMap Nominatim client
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    country: Option<String>,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("TripPlanner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripPlannerError::api(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            country: config.country.clone().filter(|c| !c.trim().is_empty()),
        })
    }

    fn search_url(&self, query: &str) -> String {
        let qualified = match &self.country {
            Some(country) => format!("{query}, {country}"),
            None => query.to_string(),
        };
        format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(&qualified)
        )
    }

    /// Build a city named after the query, not after Nominatim's OSM default name
    fn to_city(&self, query: &str, place: NominatimPlace) -> Result<City> {
        let parse = |value: &str, axis: &str| {
            value.trim().parse::<f64>().map_err(|_| {
                TripPlannerError::api(format!("Nominatim returned a non-numeric {axis} '{value}'"))
            })
        };
        let latitude = parse(&place.lat, "latitude")?;
        let longitude = parse(&place.lon, "longitude")?;

        if let Some(display_name) = &place.display_name {
            debug!("Nominatim matched '{}' for '{}'", display_name, query);
        }

        let city = City::new(query.trim(), latitude, longitude)
            .map_err(|e| TripPlannerError::api(format!("Nominatim returned invalid coordinates: {e}")))?;
        Ok(match &self.country {
            Some(country) => city.with_country(country.as_str()),
            None => city,
        })
    }
}

#[async_trait]
impl GeocodingProvider for NominatimGeocoder {
    fn name(&self) -> &str {
        "nominatim"
    }

    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Option<City>> {
        info!("Geocoding location: '{}'", query);
        let start_time = Instant::now();

        let response = self
            .client
            .get(self.search_url(query))
            .send()
            .await
            .map_err(|e| TripPlannerError::api(format!("Geocoding request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Geocoding request for '{}' returned HTTP {}", query, status);
            return Err(TripPlannerError::api(format!(
                "Geocoding service returned HTTP {status}"
            )));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| TripPlannerError::api(format!("Invalid geocoding response: {e}")))?;

        let Some(place) = places.into_iter().next() else {
            warn!("No results found for location '{}'", query);
            return Ok(None);
        };

        let city = self.to_city(query, place)?;
        info!(
            "Geocoded '{}' to ({}) in {:.3}s",
            query,
            city.format_coordinates(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(Some(city))
    }
}

/// Provider used when live geocoding is disabled; it always fails so
/// resolution goes straight to the static table.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineGeocoder;

#[async_trait]
impl GeocodingProvider for OfflineGeocoder {
    fn name(&self) -> &str {
        "offline"
    }

    async fn geocode(&self, _query: &str) -> Result<Option<City>> {
        Err(TripPlannerError::api("Live geocoding is disabled"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geocoder(country: Option<&str>) -> NominatimGeocoder {
        let config = GeocodingConfig {
            base_url: "https://nominatim.example.org/".to_string(),
            country: country.map(str::to_string),
            ..GeocodingConfig::default()
        };
        NominatimGeocoder::new(&config).unwrap()
    }

    fn place(lat: &str, lon: &str) -> NominatimPlace {
        NominatimPlace {
            lat: lat.to_string(),
            lon: lon.to_string(),
            display_name: None,
        }
    }

    #[test]
    fn test_search_url_with_country_hint() {
        let url = geocoder(Some("Pakistan")).search_url("Lahore");
        assert_eq!(
            url,
            "https://nominatim.example.org/search?q=Lahore%2C%20Pakistan&format=json&limit=1"
        );
    }

    #[test]
    fn test_search_url_without_country() {
        let url = geocoder(None).search_url("Dera Ghazi Khan");
        assert!(url.contains("q=Dera%20Ghazi%20Khan&"));
    }

    #[test]
    fn test_parse_place() {
        let city = geocoder(Some("Pakistan"))
            .to_city("Lahore", place("31.5204", "74.3587"))
            .unwrap();
        assert_eq!(city.name, "Lahore");
        assert_eq!(city.country.as_deref(), Some("Pakistan"));
        assert!((city.latitude - 31.5204).abs() < 1e-9);
    }

    #[test]
    fn test_local_script_name_ignored() {
        let places: Vec<NominatimPlace> = serde_json::from_str(
            r#"[{"lat": "31.5204", "lon": "74.3587", "name": "لاہور", "display_name": "لاہور, پنجاب, پاکستان"}]"#,
        )
        .unwrap();
        let place = places.into_iter().next().unwrap();

        let city = geocoder(None).to_city("Lahore", place).unwrap();
        assert_eq!(city.name, "Lahore");
        assert_eq!(city.country, None);
    }

    #[test]
    fn test_out_of_range_place_is_failure() {
        let err = geocoder(None)
            .to_city("lahore", place("131.5", "74.3"))
            .unwrap_err();
        assert!(matches!(err, TripPlannerError::Api { .. }));
    }

    #[test]
    fn test_non_numeric_place_is_failure() {
        assert!(geocoder(None).to_city("lahore", place("north", "74.3")).is_err());
    }

    #[test]
    fn test_nominatim_payload_deserializes() {
        let places: Vec<NominatimPlace> = serde_json::from_str(
            r#"[{"place_id": 1, "lat": "24.8607", "lon": "67.0011", "name": "Karachi", "display_name": "Karachi, Sindh, Pakistan"}]"#,
        )
        .unwrap();
        assert_eq!(places[0].lon, "67.0011");
    }

    #[tokio::test]
    async fn test_offline_always_fails() {
        assert!(OfflineGeocoder.geocode("Lahore").await.is_err());
    }
}

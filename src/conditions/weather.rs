//! Live weather providers

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::models::{DataSource, WeatherSnapshot};
use crate::{Result, TripPlannerError};

/// Fetches current weather for a city by name
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot>;
}

#[derive(Debug, Deserialize)]
struct OwmResponse {
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmCondition>,
    #[serde(default)]
    wind: Option<OwmWind>,
    #[serde(default)]
    dt: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    #[serde(default)]
    humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

impl OwmResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot> {
        if !self.main.temp.is_finite() {
            return Err(TripPlannerError::api("Weather response has no usable temperature"));
        }
        let condition = self
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| TripPlannerError::api("Weather response has no condition"))?;

        Ok(WeatherSnapshot {
            temperature: self.main.temp,
            condition,
            humidity: self.main.humidity,
            wind_speed: self.wind.map(|w| w.speed),
            observed_at: self
                .dt
                .and_then(|dt| DateTime::from_timestamp(dt, 0))
                .unwrap_or_else(Utc::now),
            source: DataSource::Live,
        })
    }
}

/// OpenWeatherMap current weather client
pub struct OpenWeatherMapClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenWeatherMapClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("TripPlanner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripPlannerError::api(format!("Failed to create HTTP client: {e}")))?;

        let api_key = config.resolved_api_key();
        if api_key.is_none() {
            warn!("No weather API key configured, weather will use sample data");
        }

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn weather_url(&self, city: &str, api_key: &str) -> String {
        format!(
            "{}/weather?q={}&units=metric&appid={}",
            self.base_url,
            urlencoding::encode(city),
            urlencoding::encode(api_key)
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapClient {
    fn name(&self) -> &str {
        "openweathermap"
    }

    #[instrument(skip(self))]
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TripPlannerError::api("No weather API key configured"))?;

        info!("Getting current weather for '{}'", city);
        let start_time = Instant::now();

        let response = self
            .client
            .get(self.weather_url(city, api_key))
            .send()
            .await
            .map_err(|e| TripPlannerError::api(format!("Weather request failed: {}", e.without_url())))?;

        let status = response.status();
        match status {
            s if s.is_success() => {}
            StatusCode::UNAUTHORIZED => {
                error!("Weather API authentication failed (HTTP 401)");
                return Err(TripPlannerError::api("Invalid weather API key"));
            }
            StatusCode::NOT_FOUND => {
                warn!("Weather API does not know '{}' (HTTP 404)", city);
                return Err(TripPlannerError::api(format!("No weather data for '{city}'")));
            }
            other => {
                return Err(TripPlannerError::api(format!(
                    "Weather API returned HTTP {other}"
                )));
            }
        }

        let payload: OwmResponse = response
            .json()
            .await
            .map_err(|e| TripPlannerError::api(format!("Invalid weather response: {}", e.without_url())))?;
        let snapshot = payload.into_snapshot()?;

        info!(
            "Retrieved weather for '{}' in {:.3}s: {}, {}",
            city,
            start_time.elapsed().as_secs_f64(),
            snapshot.condition,
            snapshot.format_temperature()
        );
        Ok(snapshot)
    }
}

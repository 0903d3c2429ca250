//! Weather and safety conditions for a destination
//!
//! Weather comes from the live provider when it answers in time and from
//! bundled samples otherwise. Safety advisories always come from the
//! curated table, or a generic set for cities it does not cover.

mod weather;

pub use weather::{OpenWeatherMapClient, WeatherProvider};

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::WeatherConfig;
use crate::fallback::live_or_fallback;
use crate::models::{
    AdvisoryCategory, AdvisorySource, AreaGuide, ConditionsReport, DataSource, EmergencyContacts,
    SafetyAdvisory, WeatherSnapshot,
};
use crate::reference::{ReferenceData, WeatherSample};
use crate::Result;

/// Mild weather reported for cities without a bundled sample
const GENERIC_TEMPERATURE: f64 = 25.0;
const GENERIC_CONDITION: &str = "clear sky";

fn generic_advisories() -> Vec<SafetyAdvisory> {
    vec![
        SafetyAdvisory::new(
            AdvisoryCategory::General,
            "Keep copies of your identification documents and stay aware of your surroundings in crowded areas",
        ),
        SafetyAdvisory::new(
            AdvisoryCategory::Health,
            "Drink bottled or boiled water and carry any personal medication",
        ),
        SafetyAdvisory::new(
            AdvisoryCategory::Transport,
            "Use registered taxis or ride-hailing apps and agree on fares before setting off",
        ),
    ]
}

fn sample_snapshot(sample: Option<&WeatherSample>) -> WeatherSnapshot {
    let (temperature, condition, humidity, wind_speed) = match sample {
        Some(s) => (s.temperature, s.condition.clone(), s.humidity, s.wind_speed),
        None => (GENERIC_TEMPERATURE, GENERIC_CONDITION.to_string(), None, None),
    };
    WeatherSnapshot {
        temperature,
        condition,
        humidity,
        wind_speed,
        observed_at: Utc::now(),
        source: DataSource::Fallback,
    }
}

pub struct ConditionsProvider {
    weather: Arc<dyn WeatherProvider>,
    reference: Arc<ReferenceData>,
    timeout: Duration,
}

impl ConditionsProvider {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        reference: Arc<ReferenceData>,
        timeout: Duration,
    ) -> Self {
        Self {
            weather,
            reference,
            timeout,
        }
    }

    /// Build a provider backed by OpenWeatherMap
    pub fn from_config(config: &WeatherConfig, reference: Arc<ReferenceData>) -> Result<Self> {
        let client = OpenWeatherMapClient::new(config)?;
        Ok(Self::new(Arc::new(client), reference, config.timeout()))
    }

    /// Current conditions for a city. Never fails; every section has a
    /// local substitute.
    #[instrument(skip(self), fields(provider = self.weather.name()))]
    pub async fn get_conditions(&self, city: &str) -> ConditionsReport {
        let city = city.trim();
        let weather = live_or_fallback(
            &format!("weather in '{city}'"),
            self.timeout,
            async { self.weather.current_weather(city).await.map(Some) },
            || Some(sample_snapshot(self.reference.weather_sample(city))),
        )
        .await
        .map(|sourced| WeatherSnapshot {
            source: sourced.source,
            ..sourced.value
        })
        .unwrap_or_else(|| sample_snapshot(None));

        let (advisories, advisory_source, areas, emergency) = match self.reference.safety(city) {
            Some(safety) => (
                safety.advisories.clone(),
                AdvisorySource::Curated,
                safety
                    .areas
                    .clone()
                    .filter(AreaGuide::is_complete)
                    .unwrap_or_else(AreaGuide::generic),
                safety.emergency.clone().unwrap_or_default(),
            ),
            None => {
                debug!("No curated advisories for '{}', using generic set", city);
                (
                    generic_advisories(),
                    AdvisorySource::Generic,
                    AreaGuide::generic(),
                    EmergencyContacts::default(),
                )
            }
        };

        ConditionsReport {
            city: city.to_string(),
            advice: weather.travel_advice(),
            weather,
            advisories,
            advisory_source,
            areas,
            emergency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TripPlannerError;
    use async_trait::async_trait;

    struct FixedWeather;

    #[async_trait]
    impl WeatherProvider for FixedWeather {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn current_weather(&self, _city: &str) -> Result<WeatherSnapshot> {
            Ok(WeatherSnapshot {
                temperature: 12.0,
                condition: "light rain".to_string(),
                humidity: Some(80),
                wind_speed: Some(4.0),
                observed_at: Utc::now(),
                source: DataSource::Live,
            })
        }
    }

    struct BrokenWeather;

    #[async_trait]
    impl WeatherProvider for BrokenWeather {
        fn name(&self) -> &str {
            "broken"
        }

        async fn current_weather(&self, _city: &str) -> Result<WeatherSnapshot> {
            Err(TripPlannerError::api("No weather API key configured"))
        }
    }

    fn provider(weather: Arc<dyn WeatherProvider>) -> ConditionsProvider {
        ConditionsProvider::new(
            weather,
            Arc::new(ReferenceData::bundled().unwrap()),
            Duration::from_secs(1),
        )
    }

    #[tokio::test]
    async fn test_live_weather() {
        let report = provider(Arc::new(FixedWeather)).get_conditions("Karachi").await;
        assert_eq!(report.weather.source, DataSource::Live);
        assert_eq!(report.weather.condition, "light rain");
        assert!(report.advice.contains("umbrella"));
        assert_eq!(report.advisory_source, AdvisorySource::Curated);
    }

    #[tokio::test]
    async fn test_failed_weather_uses_city_sample() {
        let report = provider(Arc::new(BrokenWeather)).get_conditions("Lahore").await;
        assert_eq!(report.weather.source, DataSource::Fallback);
        assert_eq!(report.weather.condition, "haze");
        assert_eq!(report.weather.temperature, 29.0);
    }

    #[tokio::test]
    async fn test_failed_weather_without_sample_uses_generic() {
        let report = provider(Arc::new(BrokenWeather)).get_conditions("Gujranwala").await;
        assert_eq!(report.weather.source, DataSource::Fallback);
        assert_eq!(report.weather.temperature, GENERIC_TEMPERATURE);
        assert_eq!(report.weather.condition, GENERIC_CONDITION);
    }

    #[tokio::test]
    async fn test_uncovered_city_gets_generic_advisories() {
        let report = provider(Arc::new(BrokenWeather)).get_conditions("Multan").await;
        assert_eq!(report.advisory_source, AdvisorySource::Generic);
        assert_eq!(report.emergency, EmergencyContacts::default());
        for category in [
            AdvisoryCategory::General,
            AdvisoryCategory::Health,
            AdvisoryCategory::Transport,
        ] {
            assert!(report.advisories_in(category).next().is_some());
        }
    }

    #[tokio::test]
    async fn test_advisories_never_empty() {
        let conditions = provider(Arc::new(BrokenWeather));
        for city in ["Islamabad", "Lahore", "Karachi", "Peshawar", "Quetta", "Nowhere City"] {
            let report = conditions.get_conditions(city).await;
            assert!(!report.advisories.is_empty(), "{city}");
        }
    }

    #[tokio::test]
    async fn test_curated_areas() {
        let report = provider(Arc::new(BrokenWeather)).get_conditions("Karachi").await;
        assert!(report.areas.safe.iter().any(|area| area == "Clifton"));
        assert!(report.areas.caution.iter().any(|area| area.contains("Saddar")));
    }

    #[tokio::test]
    async fn test_uncovered_city_gets_generic_areas() {
        let report = provider(Arc::new(BrokenWeather)).get_conditions("Multan").await;
        assert_eq!(report.areas, AreaGuide::generic());
        assert!(report.areas.is_complete());
    }

    #[tokio::test]
    async fn test_curated_city_without_areas_gets_generic_areas() {
        let report = provider(Arc::new(BrokenWeather)).get_conditions("Quetta").await;
        assert_eq!(report.advisory_source, AdvisorySource::Curated);
        assert_eq!(report.areas, AreaGuide::generic());
    }

    #[tokio::test]
    async fn test_curated_emergency_contacts() {
        let report = provider(Arc::new(BrokenWeather)).get_conditions("lahore").await;
        assert!(report.emergency.tourist_police.is_some());
    }
}

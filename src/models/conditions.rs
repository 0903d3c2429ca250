//! Weather and safety conditions for a destination

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DataSource;

/// Current weather at a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Human-readable condition, e.g. "clear sky"
    pub condition: String,
    /// Relative humidity in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<u8>,
    /// Wind speed in m/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    /// When the observation was taken (or the sample substituted)
    pub observed_at: DateTime<Utc>,
    pub source: DataSource,
}

impl WeatherSnapshot {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }

    /// Travel advice derived from temperature, condition and wind
    #[must_use]
    pub fn travel_advice(&self) -> String {
        let mut advice = Vec::new();

        let temp = self.temperature;
        if temp > 35.0 {
            advice.push("It's very hot! Stay hydrated and avoid outdoor activities during peak hours.");
        } else if temp > 30.0 {
            advice.push("It's warm. Wear light clothing and stay hydrated.");
        } else if temp < 5.0 {
            advice.push("It's very cold! Wear heavy winter clothing and limit outdoor activities.");
        } else if temp < 10.0 {
            advice.push("It's cold. Wear warm clothing and layer up.");
        }

        let condition = self.condition.to_lowercase();
        if condition.contains("thunderstorm") {
            advice.push("Consider postponing outdoor activities due to thunderstorms.");
        } else if condition.contains("rain") || condition.contains("drizzle") {
            advice.push("Bring an umbrella and rain gear.");
        } else if condition.contains("snow") {
            advice.push("Roads might be slippery. Drive carefully if traveling by road.");
        } else if condition.contains("clear") {
            advice.push("Perfect weather for outdoor activities!");
        }

        match self.wind_speed {
            Some(wind) if wind > 20.0 => {
                advice.push("Strong winds expected. Secure loose items and be cautious outdoors.");
            }
            Some(wind) if wind > 10.0 => {
                advice.push("Moderate winds. Consider this when planning outdoor activities.");
            }
            _ => {}
        }

        if advice.is_empty() {
            "Weather conditions are suitable for travel.".to_string()
        } else {
            advice.join(" ")
        }
    }
}

/// Kind of safety advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryCategory {
    General,
    Health,
    Transport,
}

/// A single safety advisory line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyAdvisory {
    pub category: AdvisoryCategory,
    pub text: String,
}

impl SafetyAdvisory {
    #[must_use]
    pub fn new(category: AdvisoryCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }
}

/// Whether advisories were curated for the city or the generic set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisorySource {
    Curated,
    Generic,
}

/// Emergency phone numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContacts {
    pub police: String,
    pub ambulance: String,
    pub fire: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tourist_police: Option<String>,
}

impl Default for EmergencyContacts {
    fn default() -> Self {
        Self {
            police: "15".to_string(),
            ambulance: "1122".to_string(),
            fire: "16".to_string(),
            tourist_police: None,
        }
    }
}

/// Neighbourhoods to favour and to be careful in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaGuide {
    pub safe: Vec<String>,
    pub caution: Vec<String>,
}

impl AreaGuide {
    /// Advice for cities without curated area lists
    #[must_use]
    pub fn generic() -> Self {
        Self {
            safe: vec!["Stay in well-known areas".to_string()],
            caution: vec!["Avoid isolated areas".to_string()],
        }
    }

    /// Both lists hold at least one entry
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.safe.is_empty() && !self.caution.is_empty()
    }
}

/// Weather plus safety information for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionsReport {
    pub city: String,
    pub weather: WeatherSnapshot,
    pub advice: String,
    pub advisories: Vec<SafetyAdvisory>,
    pub advisory_source: AdvisorySource,
    pub areas: AreaGuide,
    pub emergency: EmergencyContacts,
}

impl ConditionsReport {
    /// Advisories of one category
    pub fn advisories_in(
        &self,
        category: AdvisoryCategory,
    ) -> impl Iterator<Item = &SafetyAdvisory> + '_ {
        self.advisories
            .iter()
            .filter(move |advisory| advisory.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn snapshot(temperature: f64, condition: &str, wind: Option<f64>) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature,
            condition: condition.to_string(),
            humidity: None,
            wind_speed: wind,
            observed_at: Utc::now(),
            source: DataSource::Fallback,
        }
    }

    #[rstest]
    #[case(38.0, "haze", None, "very hot")]
    #[case(32.0, "haze", None, "warm")]
    #[case(8.0, "haze", None, "It's cold")]
    #[case(2.0, "haze", None, "very cold")]
    #[case(20.0, "light rain", None, "umbrella")]
    #[case(20.0, "thunderstorm with rain", None, "thunderstorms")]
    #[case(20.0, "snow", None, "slippery")]
    #[case(20.0, "clear sky", None, "Perfect weather")]
    #[case(20.0, "haze", Some(25.0), "Strong winds")]
    #[case(20.0, "haze", Some(12.0), "Moderate winds")]
    fn test_travel_advice(
        #[case] temperature: f64,
        #[case] condition: &str,
        #[case] wind: Option<f64>,
        #[case] expected: &str,
    ) {
        let advice = snapshot(temperature, condition, wind).travel_advice();
        assert!(advice.contains(expected), "got: {advice}");
    }

    #[test]
    fn test_neutral_advice() {
        let advice = snapshot(20.0, "haze", Some(3.0)).travel_advice();
        assert_eq!(advice, "Weather conditions are suitable for travel.");
    }

    #[test]
    fn test_format_temperature() {
        assert_eq!(snapshot(24.0, "haze", None).format_temperature(), "24.0°C");
    }

    #[test]
    fn test_source_serializes_uppercase() {
        let json = serde_json::to_value(snapshot(20.0, "haze", None)).unwrap();
        assert_eq!(json["source"], "FALLBACK");
    }
}

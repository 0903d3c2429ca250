//! Reference datasets
//!
//! Typed, read-only lookup tables keyed by normalized city name. The
//! datasets are bundled into the binary and parsed once at startup; a data
//! directory containing files with the same names can replace any of them.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::config::DataConfig;
use crate::models::{
    AreaGuide, City, EmergencyContacts, PlaceCatalogEntry, SafetyAdvisory, normalize_city_name,
};
use crate::{Result, TripPlannerError};

const CITIES_FILE: &str = "cities.json";
const LODGING_FILE: &str = "lodging_rates.json";
const PLACES_FILE: &str = "places.json";
const SAFETY_FILE: &str = "safety.json";
const WEATHER_FILE: &str = "weather_samples.json";

const BUNDLED_CITIES: &str = include_str!("../data/cities.json");
const BUNDLED_LODGING: &str = include_str!("../data/lodging_rates.json");
const BUNDLED_PLACES: &str = include_str!("../data/places.json");
const BUNDLED_SAFETY: &str = include_str!("../data/safety.json");
const BUNDLED_WEATHER: &str = include_str!("../data/weather_samples.json");

#[derive(Debug, Deserialize)]
struct LodgingRow {
    city: String,
    nightly_rate: f64,
}

/// Curated safety information for one city
#[derive(Debug, Clone, Deserialize)]
pub struct CitySafety {
    pub city: String,
    pub advisories: Vec<SafetyAdvisory>,
    #[serde(default)]
    pub areas: Option<AreaGuide>,
    #[serde(default)]
    pub emergency: Option<EmergencyContacts>,
}

/// Typical weather used when the live provider is unavailable
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherSample {
    pub city: String,
    pub temperature: f64,
    pub condition: String,
    #[serde(default)]
    pub humidity: Option<u8>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
}

/// Raw JSON text for every dataset
#[derive(Debug, Clone, Copy)]
pub struct DatasetSources<'a> {
    pub cities: &'a str,
    pub lodging_rates: &'a str,
    pub places: &'a str,
    pub safety: &'a str,
    pub weather_samples: &'a str,
}

impl DatasetSources<'static> {
    /// The datasets compiled into the binary
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            cities: BUNDLED_CITIES,
            lodging_rates: BUNDLED_LODGING,
            places: BUNDLED_PLACES,
            safety: BUNDLED_SAFETY,
            weather_samples: BUNDLED_WEATHER,
        }
    }
}

/// Immutable in-memory reference tables
#[derive(Debug, Default)]
pub struct ReferenceData {
    cities: HashMap<String, City>,
    lodging_rates: HashMap<String, f64>,
    places: HashMap<String, Vec<PlaceCatalogEntry>>,
    safety: HashMap<String, CitySafety>,
    weather_samples: HashMap<String, WeatherSample>,
}

fn parse<T: for<'de> Deserialize<'de>>(dataset: &str, text: &str) -> Result<Vec<T>> {
    serde_json::from_str(text).map_err(|e| TripPlannerError::dataset(dataset, e.to_string()))
}

fn insert_unique<T>(
    map: &mut HashMap<String, T>,
    dataset: &str,
    name: &str,
    value: T,
) -> Result<()> {
    let key = normalize_city_name(name);
    if key.is_empty() {
        return Err(TripPlannerError::dataset(dataset, "row with empty city name"));
    }
    if map.insert(key, value).is_some() {
        return Err(TripPlannerError::dataset(
            dataset,
            format!("duplicate entry for city '{name}'"),
        ));
    }
    Ok(())
}

impl ReferenceData {
    /// Parse the bundled datasets
    pub fn bundled() -> Result<Self> {
        Self::from_sources(DatasetSources::bundled())
    }

    /// Load datasets according to configuration
    pub fn load(config: &DataConfig) -> Result<Self> {
        match &config.directory {
            Some(dir) => Self::from_dir(dir),
            None => Self::bundled(),
        }
    }

    /// Load datasets from a directory; files that are absent use the bundled copy
    pub fn from_dir(dir: &Path) -> Result<Self> {
        info!("Loading reference data from {}", dir.display());

        let read = |file: &str, bundled: &'static str| -> Result<String> {
            let path = dir.join(file);
            if path.exists() {
                debug!("Using {}", path.display());
                Ok(std::fs::read_to_string(path)?)
            } else {
                debug!("{} not found, using bundled copy", path.display());
                Ok(bundled.to_string())
            }
        };

        let cities = read(CITIES_FILE, BUNDLED_CITIES)?;
        let lodging_rates = read(LODGING_FILE, BUNDLED_LODGING)?;
        let places = read(PLACES_FILE, BUNDLED_PLACES)?;
        let safety = read(SAFETY_FILE, BUNDLED_SAFETY)?;
        let weather_samples = read(WEATHER_FILE, BUNDLED_WEATHER)?;

        Self::from_sources(DatasetSources {
            cities: &cities,
            lodging_rates: &lodging_rates,
            places: &places,
            safety: &safety,
            weather_samples: &weather_samples,
        })
    }

    /// Parse and validate every dataset
    pub fn from_sources(sources: DatasetSources<'_>) -> Result<Self> {
        let mut data = ReferenceData::default();

        for city in parse::<City>(CITIES_FILE, sources.cities)? {
            city.validate()
                .map_err(|e| TripPlannerError::dataset(CITIES_FILE, e.to_string()))?;
            let name = city.name.clone();
            insert_unique(&mut data.cities, CITIES_FILE, &name, city)?;
        }

        for row in parse::<LodgingRow>(LODGING_FILE, sources.lodging_rates)? {
            if !row.nightly_rate.is_finite() || row.nightly_rate < 0.0 {
                return Err(TripPlannerError::dataset(
                    LODGING_FILE,
                    format!("invalid nightly rate for '{}'", row.city),
                ));
            }
            insert_unique(&mut data.lodging_rates, LODGING_FILE, &row.city, row.nightly_rate)?;
        }

        for entry in parse::<PlaceCatalogEntry>(PLACES_FILE, sources.places)? {
            if !(0.0..=5.0).contains(&entry.rating) {
                return Err(TripPlannerError::dataset(
                    PLACES_FILE,
                    format!("rating of '{}' must be between 0 and 5", entry.name),
                ));
            }
            data.places
                .entry(normalize_city_name(&entry.city))
                .or_default()
                .push(entry);
        }

        for row in parse::<CitySafety>(SAFETY_FILE, sources.safety)? {
            // an empty curated list would leave the caller with nothing to show
            if row.advisories.is_empty() {
                debug!("Skipping empty safety entry for {}", row.city);
                continue;
            }
            let name = row.city.clone();
            insert_unique(&mut data.safety, SAFETY_FILE, &name, row)?;
        }

        for row in parse::<WeatherSample>(WEATHER_FILE, sources.weather_samples)? {
            let name = row.city.clone();
            insert_unique(&mut data.weather_samples, WEATHER_FILE, &name, row)?;
        }

        info!(
            "Loaded reference data: {} cities, {} lodging rates, {} place entries, {} safety tables, {} weather samples",
            data.cities.len(),
            data.lodging_rates.len(),
            data.places.values().map(Vec::len).sum::<usize>(),
            data.safety.len(),
            data.weather_samples.len()
        );

        Ok(data)
    }

    #[must_use]
    pub fn city(&self, name: &str) -> Option<&City> {
        self.cities.get(&normalize_city_name(name))
    }

    /// All known cities, sorted by name
    #[must_use]
    pub fn cities(&self) -> Vec<&City> {
        let mut cities: Vec<&City> = self.cities.values().collect();
        cities.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        cities
    }

    /// All known city names, sorted
    #[must_use]
    pub fn city_names(&self) -> Vec<&str> {
        self.cities().into_iter().map(|c| c.name.as_str()).collect()
    }

    #[must_use]
    pub fn nightly_rate(&self, city: &str) -> Option<f64> {
        self.lodging_rates.get(&normalize_city_name(city)).copied()
    }

    /// Catalog entries for a city, in dataset order
    #[must_use]
    pub fn places_in(&self, city: &str) -> &[PlaceCatalogEntry] {
        self.places
            .get(&normalize_city_name(city))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn safety(&self, city: &str) -> Option<&CitySafety> {
        self.safety.get(&normalize_city_name(city))
    }

    #[must_use]
    pub fn weather_sample(&self, city: &str) -> Option<&WeatherSample> {
        self.weather_samples.get(&normalize_city_name(city))
    }
}

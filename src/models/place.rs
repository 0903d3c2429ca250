//! Place catalog entries: hotels, attractions and restaurants

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use crate::TripPlannerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Hotel,
    Attraction,
    Restaurant,
}

impl FromStr for PlaceCategory {
    type Err = TripPlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hotel" | "hotels" => Ok(PlaceCategory::Hotel),
            "attraction" | "attractions" => Ok(PlaceCategory::Attraction),
            "restaurant" | "restaurants" => Ok(PlaceCategory::Restaurant),
            other => Err(TripPlannerError::invalid_request(format!(
                "Unknown place category '{other}' (expected hotel, attraction or restaurant)"
            ))),
        }
    }
}

impl Display for PlaceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceCategory::Hotel => f.write_str("hotel"),
            PlaceCategory::Attraction => f.write_str("attraction"),
            PlaceCategory::Restaurant => f.write_str("restaurant"),
        }
    }
}

/// Ordinal price level, cheapest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Budget = 1,
    Moderate = 2,
    Upscale = 3,
    Luxury = 4,
}

impl PriceTier {
    /// "$" through "$$$$"
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            PriceTier::Budget => "$",
            PriceTier::Moderate => "$$",
            PriceTier::Upscale => "$$$",
            PriceTier::Luxury => "$$$$",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCatalogEntry {
    pub name: String,
    pub category: PlaceCategory,
    /// City key the entry belongs to
    pub city: String,
    /// Rating between 0 and 5
    pub rating: f32,
    pub price_tier: PriceTier,
    /// Restaurants only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PlaceCatalogEntry {
    /// Case-insensitive cuisine match; entries without a cuisine never match
    #[must_use]
    pub fn serves(&self, cuisine: &str) -> bool {
        self.cuisine
            .as_deref()
            .is_some_and(|own| own.eq_ignore_ascii_case(cuisine.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_tier_ordering() {
        assert!(PriceTier::Budget < PriceTier::Moderate);
        assert!(PriceTier::Upscale < PriceTier::Luxury);
        assert_eq!(PriceTier::Upscale.symbol(), "$$$");
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("Hotels".parse::<PlaceCategory>().unwrap(), PlaceCategory::Hotel);
        assert_eq!(
            "restaurant".parse::<PlaceCategory>().unwrap(),
            PlaceCategory::Restaurant
        );
        assert!("museum".parse::<PlaceCategory>().is_err());
    }

    #[test]
    fn test_entry_deserializes_without_description() {
        let entry: PlaceCatalogEntry = serde_json::from_str(
            r#"{"name":"Hotel One","category":"hotel","city":"Lahore","rating":3.9,"price_tier":"budget"}"#,
        )
        .unwrap();
        assert_eq!(entry.price_tier, PriceTier::Budget);
        assert!(entry.description.is_none());
    }
}

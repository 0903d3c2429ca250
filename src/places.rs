//! Hotel, attraction and restaurant recommendations

use std::cmp::Ordering;
use std::sync::Arc;

use crate::models::{PlaceCatalogEntry, PlaceCategory, PriceTier};
use crate::reference::ReferenceData;

pub struct PlaceCatalog {
    reference: Arc<ReferenceData>,
    default_limit: usize,
}

fn by_rating_then_name(a: &&PlaceCatalogEntry, b: &&PlaceCatalogEntry) -> Ordering {
    b.rating
        .total_cmp(&a.rating)
        .then_with(|| a.name.cmp(&b.name))
}

impl PlaceCatalog {
    #[must_use]
    pub fn new(reference: Arc<ReferenceData>, default_limit: usize) -> Self {
        Self {
            reference,
            default_limit,
        }
    }

    #[must_use]
    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Best-rated entries of one category in a city, at most `limit` of them.
    /// `None` uses the configured default limit.
    #[must_use]
    pub fn get_places(
        &self,
        city: &str,
        category: PlaceCategory,
        limit: Option<usize>,
    ) -> Vec<PlaceCatalogEntry> {
        self.select(city, category, None, limit)
    }

    /// Like [`PlaceCatalog::get_places`], keeping only entries priced at or
    /// below `max_tier`
    #[must_use]
    pub fn get_places_within(
        &self,
        city: &str,
        category: PlaceCategory,
        max_tier: PriceTier,
        limit: Option<usize>,
    ) -> Vec<PlaceCatalogEntry> {
        self.select(city, category, Some(max_tier), limit)
    }

    /// Best-rated restaurants in a city serving `cuisine`
    #[must_use]
    pub fn get_restaurants_by_cuisine(
        &self,
        city: &str,
        cuisine: &str,
        limit: Option<usize>,
    ) -> Vec<PlaceCatalogEntry> {
        self.select_where(city, PlaceCategory::Restaurant, limit, |p| p.serves(cuisine))
    }

    fn select(
        &self,
        city: &str,
        category: PlaceCategory,
        max_tier: Option<PriceTier>,
        limit: Option<usize>,
    ) -> Vec<PlaceCatalogEntry> {
        self.select_where(city, category, limit, |p| {
            max_tier.is_none_or(|max| p.price_tier <= max)
        })
    }

    fn select_where(
        &self,
        city: &str,
        category: PlaceCategory,
        limit: Option<usize>,
        keep: impl Fn(&PlaceCatalogEntry) -> bool,
    ) -> Vec<PlaceCatalogEntry> {
        let mut matches: Vec<&PlaceCatalogEntry> = self
            .reference
            .places_in(city)
            .iter()
            .filter(|p| p.category == category && keep(p))
            .collect();
        matches.sort_by(by_rating_then_name);
        matches
            .into_iter()
            .take(limit.unwrap_or(self.default_limit))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::DatasetSources;
    use rstest::rstest;

    fn catalog() -> PlaceCatalog {
        PlaceCatalog::new(Arc::new(ReferenceData::bundled().unwrap()), 5)
    }

    #[test]
    fn test_karachi_hotels_sorted() {
        let hotels = catalog().get_places("karachi", PlaceCategory::Hotel, None);
        assert!(!hotels.is_empty());
        assert!(hotels.len() <= 5);
        assert!(hotels.windows(2).all(|w| w[0].rating >= w[1].rating));
        assert!(hotels.iter().all(|h| h.category == PlaceCategory::Hotel));
    }

    #[test]
    fn test_ties_broken_by_name() {
        let hotels = catalog().get_places("Karachi", PlaceCategory::Hotel, None);
        let names: Vec<&str> = hotels.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names[0], "Movenpick Karachi");
        assert_eq!(names[1], "Pearl Continental Karachi");
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    #[case(50)]
    fn test_limit_respected(#[case] limit: usize) {
        let attractions = catalog().get_places("Lahore", PlaceCategory::Attraction, Some(limit));
        assert!(attractions.len() <= limit);
        assert!(attractions.windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[test]
    fn test_unknown_city_is_empty() {
        assert!(catalog()
            .get_places("Nowhere City", PlaceCategory::Restaurant, None)
            .is_empty());
    }

    #[test]
    fn test_price_ceiling() {
        let cheap = catalog().get_places_within(
            "Karachi",
            PlaceCategory::Hotel,
            PriceTier::Moderate,
            None,
        );
        assert!(cheap.iter().all(|h| h.price_tier <= PriceTier::Moderate));
        let all = catalog().get_places("Karachi", PlaceCategory::Hotel, None);
        assert!(cheap.len() < all.len());
    }

    #[rstest]
    #[case("Lahore", "pakistani", 4)]
    #[case("Lahore", " Continental ", 1)]
    #[case("Karachi", "Seafood", 1)]
    #[case("Karachi", "Thai", 0)]
    fn test_restaurants_by_cuisine(
        #[case] city: &str,
        #[case] cuisine: &str,
        #[case] expected: usize,
    ) {
        let restaurants = catalog().get_restaurants_by_cuisine(city, cuisine, None);
        assert_eq!(restaurants.len(), expected);
        assert!(restaurants.iter().all(|r| r.serves(cuisine)));
        assert!(restaurants.windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[test]
    fn test_cuisine_filter_respects_limit() {
        let restaurants = catalog().get_restaurants_by_cuisine("Lahore", "Pakistani", Some(2));
        let names: Vec<&str> = restaurants.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Cuckoo's Den", "Butt Karahi"]);
    }

    #[test]
    fn test_custom_catalog_ordering() {
        let places = r#"[
            {"name": "Beta", "category": "restaurant", "city": "Skardu", "rating": 4.0, "price_tier": "budget"},
            {"name": "Alpha", "category": "restaurant", "city": "Skardu", "rating": 4.0, "price_tier": "budget"},
            {"name": "Gamma", "category": "restaurant", "city": "Skardu", "rating": 4.8, "price_tier": "upscale"},
            {"name": "Delta", "category": "hotel", "city": "Skardu", "rating": 5.0, "price_tier": "luxury"}
        ]"#;
        let data = ReferenceData::from_sources(DatasetSources {
            cities: "[]",
            lodging_rates: "[]",
            places,
            safety: "[]",
            weather_samples: "[]",
        })
        .unwrap();
        let catalog = PlaceCatalog::new(Arc::new(data), 5);
        let names: Vec<String> = catalog
            .get_places("SKARDU", PlaceCategory::Restaurant, None)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Gamma", "Alpha", "Beta"]);
    }
}

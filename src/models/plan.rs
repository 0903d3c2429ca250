//! The aggregated trip plan

use serde::Serialize;
use std::fmt::Display;

use super::{
    AdvisorySource, BudgetBreakdown, City, ConditionsReport, PlaceCatalogEntry, RouteInfo,
    Sourced, TripRequest,
};

/// Catalog entries for the destination, one list per category
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DestinationPlaces {
    pub hotels: Vec<PlaceCatalogEntry>,
    pub attractions: Vec<PlaceCatalogEntry>,
    pub restaurants: Vec<PlaceCatalogEntry>,
}

impl DestinationPlaces {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty() && self.attractions.is_empty() && self.restaurants.is_empty()
    }
}

/// Everything the engine knows about one requested trip
#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub request: TripRequest,
    pub origin: Sourced<City>,
    pub destination: Sourced<City>,
    pub route: RouteInfo,
    pub budget: BudgetBreakdown,
    pub conditions: ConditionsReport,
    pub places: DestinationPlaces,
    /// One line per section served from fallback or default data
    pub notices: Vec<String>,
}

impl TripPlan {
    /// Whether any section of the plan was degraded
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.notices.is_empty()
    }
}

fn write_places(
    f: &mut std::fmt::Formatter<'_>,
    title: &str,
    places: &[PlaceCatalogEntry],
) -> std::fmt::Result {
    if places.is_empty() {
        return Ok(());
    }
    writeln!(f, "{title}")?;
    for place in places {
        writeln!(
            f,
            "   • {} (★ {:.1}, {})",
            place.name,
            place.rating,
            place.price_tier.symbol()
        )?;
    }
    Ok(())
}

impl Display for TripPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "🧭 {} → {} by {} ({} night(s), {} traveler(s))",
            self.origin.value.name,
            self.destination.value.name,
            self.request.mode,
            self.request.nights,
            self.request.travelers
        )?;
        writeln!(
            f,
            "   🗺️ {:.0} km ({:.0} km straight line), about {}",
            self.route.distance_km,
            self.route.great_circle_km,
            self.route.format_duration()
        )?;

        writeln!(f, "💰 Budget")?;
        for (category, amount) in self.budget.iter() {
            writeln!(f, "   {:<14} {}", category.label(), self.budget.format_amount(amount))?;
        }
        writeln!(
            f,
            "   {:<14} {}",
            "Total",
            self.budget.format_amount(self.budget.total())
        )?;

        let weather = &self.conditions.weather;
        writeln!(
            f,
            "🌤️ Weather in {}: {}, {} [{}]",
            self.conditions.city,
            weather.condition,
            weather.format_temperature(),
            weather.source
        )?;
        writeln!(f, "   {}", self.conditions.advice)?;

        match self.conditions.advisory_source {
            AdvisorySource::Curated => writeln!(f, "🛡️ Safety")?,
            AdvisorySource::Generic => writeln!(f, "🛡️ Safety (general guidance)")?,
        }
        for advisory in &self.conditions.advisories {
            writeln!(f, "   • {}", advisory.text)?;
        }
        let areas = &self.conditions.areas;
        writeln!(f, "   ✅ Safer areas: {}", areas.safe.join(", "))?;
        writeln!(f, "   ⚠️ Take care: {}", areas.caution.join(", "))?;
        let emergency = &self.conditions.emergency;
        writeln!(
            f,
            "   ☎️ Police {} · Ambulance {} · Fire {}",
            emergency.police, emergency.ambulance, emergency.fire
        )?;

        write_places(f, "🏨 Hotels", &self.places.hotels)?;
        write_places(f, "🏛️ Attractions", &self.places.attractions)?;
        write_places(f, "🍽️ Restaurants", &self.places.restaurants)?;

        for notice in &self.notices {
            writeln!(f, "⚠️ {notice}")?;
        }
        Ok(())
    }
}

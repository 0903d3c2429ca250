//! Trip planning orchestration
//!
//! A plan is assembled in a fixed order: both cities are resolved, the
//! route and budget are computed from the resolved coordinates, and then
//! conditions and place recommendations for the destination are gathered
//! together. Only request validation and city resolution can fail a plan;
//! every other section degrades to local data and adds a notice.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::budget::BudgetEstimator;
use crate::conditions::{ConditionsProvider, WeatherProvider};
use crate::config::TripPlannerConfig;
use crate::distance::DistanceEngine;
use crate::geo::{GeoResolver, GeocodingProvider};
use crate::models::{
    AdvisorySource, City, DestinationPlaces, PlaceCategory, Sourced, TripPlan, TripRequest,
};
use crate::places::PlaceCatalog;
use crate::reference::ReferenceData;
use crate::{Result, TripPlannerError};

/// Origin and destination closer than this are the same place
const MIN_SEPARATION_KM: f64 = 0.001;

pub struct TripPlanner {
    config: TripPlannerConfig,
    reference: Arc<ReferenceData>,
    geo: GeoResolver,
    distance: DistanceEngine,
    budget: BudgetEstimator,
    conditions: ConditionsProvider,
    places: PlaceCatalog,
}

impl TripPlanner {
    /// Validate the configuration, load reference data and build the live
    /// providers it describes
    pub fn new(config: TripPlannerConfig) -> Result<Self> {
        config.validate()?;
        let reference = Arc::new(ReferenceData::load(&config.data)?);
        let geo = GeoResolver::from_config(&config.geocoding, reference.clone())?;
        let conditions = ConditionsProvider::from_config(&config.weather, reference.clone())?;
        Ok(Self::assemble(config, reference, geo, conditions))
    }

    /// Build a planner around caller-supplied providers
    #[must_use]
    pub fn with_providers(
        config: TripPlannerConfig,
        reference: Arc<ReferenceData>,
        geocoder: Arc<dyn GeocodingProvider>,
        weather: Arc<dyn WeatherProvider>,
    ) -> Self {
        let geo = GeoResolver::new(geocoder, reference.clone(), config.geocoding.timeout());
        let conditions = ConditionsProvider::new(weather, reference.clone(), config.weather.timeout());
        Self::assemble(config, reference, geo, conditions)
    }

    fn assemble(
        config: TripPlannerConfig,
        reference: Arc<ReferenceData>,
        geo: GeoResolver,
        conditions: ConditionsProvider,
    ) -> Self {
        Self {
            distance: DistanceEngine::new(config.route.clone()),
            budget: BudgetEstimator::new(config.budget.clone(), reference.clone()),
            places: PlaceCatalog::new(reference.clone(), config.places.default_limit),
            config,
            reference,
            geo,
            conditions,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TripPlannerConfig {
        &self.config
    }

    #[must_use]
    pub fn geo(&self) -> &GeoResolver {
        &self.geo
    }

    #[must_use]
    pub fn conditions(&self) -> &ConditionsProvider {
        &self.conditions
    }

    #[must_use]
    pub fn places(&self) -> &PlaceCatalog {
        &self.places
    }

    /// Canonical name for reference lookups: the table's spelling when the
    /// city is known, the caller's otherwise
    fn lookup_name<'a>(&'a self, requested: &'a str) -> &'a str {
        self.reference
            .city(requested)
            .map_or(requested.trim(), |city| city.name.as_str())
    }

    fn destination_places(&self, city: &str) -> DestinationPlaces {
        DestinationPlaces {
            hotels: self.places.get_places(city, PlaceCategory::Hotel, None),
            attractions: self.places.get_places(city, PlaceCategory::Attraction, None),
            restaurants: self.places.get_places(city, PlaceCategory::Restaurant, None),
        }
    }

    /// Produce a complete plan for one request
    #[instrument(skip(self, request), fields(origin = %request.origin, destination = %request.destination, mode = %request.mode))]
    pub async fn plan(&self, request: &TripRequest) -> Result<TripPlan> {
        request.validate(&self.config.limits)?;

        let origin = self.geo.resolve(&request.origin).await?;
        let destination = self.geo.resolve(&request.destination).await?;

        let route = self
            .distance
            .compute_route(&origin.value, &destination.value, request.mode);
        if origin.value.key() == destination.value.key()
            || route.great_circle_km < MIN_SEPARATION_KM
        {
            return Err(TripPlannerError::invalid_request(format!(
                "'{}' and '{}' resolve to the same location",
                request.origin.trim(),
                request.destination.trim()
            )));
        }

        let city = self.lookup_name(&request.destination);
        let budget = self
            .budget
            .estimate(&route, city, request.nights, request.travelers);

        let (conditions, places) = futures::join!(
            self.conditions.get_conditions(city),
            async { self.destination_places(city) }
        );

        let mut notices = Vec::new();
        for (role, resolved) in [("origin", &origin), ("destination", &destination)] {
            if resolved.source.is_fallback() {
                notices.push(resolution_notice(role, resolved));
            }
        }
        if self.reference.nightly_rate(city).is_none() {
            notices.push(format!(
                "No lodging rate on file for {city}, accommodation uses the default nightly rate"
            ));
        }
        if conditions.weather.source.is_fallback() {
            notices.push(format!(
                "Live weather for {city} is unavailable, showing typical conditions"
            ));
        }
        if conditions.advisory_source == AdvisorySource::Generic {
            notices.push(format!(
                "No curated safety advisories for {city}, showing general guidance"
            ));
        }
        if places.is_empty() {
            notices.push(format!("No hotels, attractions or restaurants on file for {city}"));
        }

        info!(
            "Planned {} -> {}: {:.0} km by {}, total {}, {} notice(s)",
            origin.value.name,
            destination.value.name,
            route.distance_km,
            request.mode,
            budget.format_amount(budget.total()),
            notices.len()
        );

        Ok(TripPlan {
            request: request.clone(),
            origin,
            destination,
            route,
            budget,
            conditions,
            places,
            notices,
        })
    }
}

fn resolution_notice(role: &str, resolved: &Sourced<City>) -> String {
    format!(
        "Coordinates for {} {} come from the bundled city table",
        role, resolved.value.name
    )
}

//! Trip cost estimation from configured rates

use std::sync::Arc;
use tracing::debug;

use crate::config::BudgetConfig;
use crate::models::{BudgetBreakdown, BudgetCategory, RouteInfo, TravelMode};
use crate::reference::ReferenceData;

pub struct BudgetEstimator {
    config: BudgetConfig,
    reference: Arc<ReferenceData>,
}

impl BudgetEstimator {
    #[must_use]
    pub fn new(config: BudgetConfig, reference: Arc<ReferenceData>) -> Self {
        Self { config, reference }
    }

    /// Rooms needed for `travelers` at the configured capacity
    #[must_use]
    pub fn rooms_for(&self, travelers: u32) -> u32 {
        travelers.div_ceil(self.config.room_capacity.max(1))
    }

    /// Nightly room rate at the destination, or the default rate
    #[must_use]
    pub fn nightly_rate(&self, destination: &str) -> f64 {
        self.reference
            .nightly_rate(destination)
            .unwrap_or(self.config.default_nightly_rate)
    }

    fn rate_per_km(&self, mode: TravelMode) -> f64 {
        match mode {
            TravelMode::Road => self.config.road_rate_per_km,
            TravelMode::Flight => self.config.flight_rate_per_km,
        }
    }

    /// Estimate the cost of a trip in whole currency units
    #[must_use]
    pub fn estimate(
        &self,
        route: &RouteInfo,
        destination: &str,
        nights: u32,
        travelers: u32,
    ) -> BudgetBreakdown {
        let nights_f = f64::from(nights);
        let travelers_f = f64::from(travelers);
        let rooms = self.rooms_for(travelers);

        let transport = route.distance_km
            * self.rate_per_km(route.mode)
            * self.config.round_trip_factor
            * travelers_f;
        let accommodation = self.nightly_rate(destination) * nights_f * f64::from(rooms);
        let food = self.config.food_per_person_per_day * nights_f * travelers_f;
        let mut activities = self.config.activities_per_person * travelers_f;
        if self.config.scale_activities_by_nights {
            activities *= nights_f;
        }

        debug!(
            "Budget for {} ({} night(s), {} traveler(s), {} room(s)): transport {:.1}, accommodation {:.1}, food {:.1}, activities {:.1}",
            destination, nights, travelers, rooms, transport, accommodation, food, activities
        );

        BudgetBreakdown::new(self.config.currency.clone(), rooms)
            .with(BudgetCategory::Transport, transport)
            .with(BudgetCategory::Accommodation, accommodation)
            .with(BudgetCategory::Food, food)
            .with(BudgetCategory::Activities, activities)
    }
}

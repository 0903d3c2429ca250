//! City name resolution
//!
//! Names resolve through the process cache, then the live geocoding
//! provider, then the bundled city table. Both live and fallback results
//! are cached for the lifetime of the resolver. A resolved city keeps the
//! table's spelling when the table knows it and the caller's otherwise.

mod cache;
mod provider;

pub use cache::GeoCache;
pub use provider::{GeocodingProvider, NominatimGeocoder, OfflineGeocoder};

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::GeocodingConfig;
use crate::fallback::live_or_fallback;
use crate::models::{City, Sourced, normalize_city_name};
use crate::reference::ReferenceData;
use crate::{Result, TripPlannerError};

pub struct GeoResolver {
    provider: Arc<dyn GeocodingProvider>,
    reference: Arc<ReferenceData>,
    cache: GeoCache,
    timeout: Duration,
}

impl GeoResolver {
    pub fn new(
        provider: Arc<dyn GeocodingProvider>,
        reference: Arc<ReferenceData>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            reference,
            cache: GeoCache::new(),
            timeout,
        }
    }

    /// Build a resolver with Nominatim, or the offline provider when live
    /// geocoding is disabled.
    pub fn from_config(config: &GeocodingConfig, reference: Arc<ReferenceData>) -> Result<Self> {
        let provider: Arc<dyn GeocodingProvider> = if config.enabled {
            Arc::new(NominatimGeocoder::new(config)?)
        } else {
            Arc::new(OfflineGeocoder)
        };
        Ok(Self::new(provider, reference, config.timeout()))
    }

    /// Resolve a city name to coordinates.
    ///
    /// Fails with `UnknownCity` only when neither the provider nor the
    /// static table knows the name.
    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn resolve(&self, name: &str) -> Result<Sourced<City>> {
        let key = normalize_city_name(name);
        if key.is_empty() {
            return Err(TripPlannerError::invalid_request("City name cannot be empty"));
        }

        if let Some(cached) = self.cache.get(&key).await {
            debug!("Cache hit for '{}' ({})", key, cached.source);
            return Ok(cached);
        }

        let query = name.split_whitespace().collect::<Vec<_>>().join(" ");
        let mut resolved = live_or_fallback(
            &format!("geocoding '{query}'"),
            self.timeout,
            self.provider.geocode(&query),
            || self.reference.city(&key).cloned(),
        )
        .await
        .ok_or_else(|| TripPlannerError::unknown_city(query.clone()))?;
        resolved.value.name = match self.reference.city(&key) {
            Some(known) => known.name.clone(),
            None => query.clone(),
        };

        debug!(
            "Resolved '{}' to ({}) from {}",
            query,
            resolved.value.format_coordinates(),
            resolved.source
        );
        Ok(self.cache.put(key, resolved).await)
    }

    /// Number of names resolved so far
    pub async fn cached_count(&self) -> usize {
        self.cache.len().await
    }

    /// Cities available without a live provider, sorted by name
    #[must_use]
    pub fn known_cities(&self) -> Vec<City> {
        self.reference.cities().into_iter().cloned().collect()
    }
}

use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::{City, Sourced};

/// Process-lifetime store of resolved cities keyed by normalized name.
///
/// Entries never expire; a city's coordinates do not change while the
/// process runs.
#[derive(Debug, Default)]
pub struct GeoCache {
    entries: RwLock<HashMap<String, Sourced<City>>>,
}

impl GeoCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached resolution for `key`, if any.
    #[tracing::instrument(name = "query_geo_cache", level = "debug", skip(self))]
    pub async fn get(&self, key: &str) -> Option<Sourced<City>> {
        let hit = self.entries.read().await.get(key).cloned();
        if hit.is_some() {
            tracing::debug!("Key found");
        } else {
            tracing::debug!("Key not found");
        }
        hit
    }

    /// Stores a resolution. When a concurrent lookup already stored `key`,
    /// the earlier entry is kept and returned so every caller sees the same city.
    #[tracing::instrument(name = "put_geo_cache", level = "debug", skip(self, value))]
    pub async fn put(&self, key: String, value: Sourced<City>) -> Sourced<City> {
        self.entries
            .write()
            .await
            .entry(key)
            .or_insert(value)
            .clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

//! Provenance markers for data that may come from a live service or a fallback

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Where a piece of data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataSource {
    /// Fetched from the live external provider
    Live,
    /// Substituted from bundled reference data
    Fallback,
}

impl DataSource {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, DataSource::Fallback)
    }
}

impl Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Live => f.write_str("LIVE"),
            DataSource::Fallback => f.write_str("FALLBACK"),
        }
    }
}

/// A value tagged with its [`DataSource`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sourced<T> {
    #[serde(flatten)]
    pub value: T,
    pub source: DataSource,
}

impl<T> Sourced<T> {
    #[must_use]
    pub fn live(value: T) -> Self {
        Self {
            value,
            source: DataSource::Live,
        }
    }

    #[must_use]
    pub fn fallback(value: T) -> Self {
        Self {
            value,
            source: DataSource::Fallback,
        }
    }
}

//! Error types and handling for the trip planner

use thiserror::Error;

/// Main error type for the trip planner
#[derive(Error, Debug)]
pub enum TripPlannerError {
    /// Malformed or contradictory trip parameters
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Neither the live geocoder nor the reference table knows the city
    #[error("Unknown city: '{name}'")]
    UnknownCity { name: String },

    /// Unsupported travel mode
    #[error("Invalid travel mode: '{mode}' (expected 'road' or 'flight')")]
    InvalidMode { mode: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Malformed reference dataset
    #[error("Dataset error in {dataset}: {message}")]
    Dataset { dataset: String, message: String },

    /// External provider errors. These stay behind the fallback boundary.
    #[error("API error: {message}")]
    Api { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TripPlannerError {
    /// Create a new invalid request error
    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a new unknown city error
    pub fn unknown_city<S: Into<String>>(name: S) -> Self {
        Self::UnknownCity { name: name.into() }
    }

    /// Create a new invalid mode error
    pub fn invalid_mode<S: Into<String>>(mode: S) -> Self {
        Self::InvalidMode { mode: mode.into() }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new dataset error
    pub fn dataset<D: Into<String>, S: Into<String>>(dataset: D, message: S) -> Self {
        Self::Dataset {
            dataset: dataset.into(),
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Whether the caller can fix this by changing the request
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            TripPlannerError::InvalidRequest { .. }
                | TripPlannerError::UnknownCity { .. }
                | TripPlannerError::InvalidMode { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripPlannerError::InvalidRequest { message } => format!("Invalid request: {message}"),
            TripPlannerError::UnknownCity { name } => {
                format!("Could not find a city named '{name}'. Check the spelling and try again.")
            }
            TripPlannerError::InvalidMode { mode } => {
                format!("'{mode}' is not a supported travel mode. Use 'road' or 'flight'.")
            }
            TripPlannerError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            TripPlannerError::Dataset { dataset, .. } => {
                format!("Reference data '{dataset}' could not be loaded.")
            }
            TripPlannerError::Api { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            TripPlannerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    City, PlaceCatalogEntry, PlaceCategory, PriceTier, TripPlan, TripPlanner, TripPlannerError,
    TripRequest, VERSION,
};

type SharedPlanner = Arc<TripPlanner>;

#[derive(Debug, Deserialize)]
pub struct ApiPlanRequest {
    pub origin: String,
    pub destination: String,
    pub nights: u32,
    pub travelers: u32,
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_mode() -> String {
    "road".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ApiPlacesQuery {
    pub category: Option<String>,
    pub limit: Option<usize>,
    pub max_tier: Option<PriceTier>,
    pub cuisine: Option<String>,
}

#[derive(Serialize)]
pub struct ApiHealth {
    pub status: &'static str,
    pub version: &'static str,
    pub cached_cities: usize,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Error wrapper mapping crate errors onto HTTP statuses
#[derive(Debug)]
pub struct ApiError(TripPlannerError);

impl From<TripPlannerError> for ApiError {
    fn from(error: TripPlannerError) -> Self {
        Self(error)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            TripPlannerError::InvalidRequest { .. } | TripPlannerError::InvalidMode { .. } => {
                StatusCode::BAD_REQUEST
            }
            TripPlannerError::UnknownCity { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        let body = ApiErrorBody {
            error: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(planner: SharedPlanner) -> Router {
    Router::new()
        .route("/plan", post(create_plan))
        .route("/cities", get(get_cities))
        .route("/places/{city}", get(get_places))
        .route("/health", get(get_health))
        .with_state(planner)
}

async fn create_plan(
    State(planner): State<SharedPlanner>,
    Json(body): Json<ApiPlanRequest>,
) -> Result<Json<TripPlan>, ApiError> {
    let request = TripRequest::parse(
        body.origin,
        body.destination,
        body.nights,
        body.travelers,
        &body.mode,
    )?;
    let plan = planner.plan(&request).await?;
    Ok(Json(plan))
}

async fn get_cities(State(planner): State<SharedPlanner>) -> Json<Vec<City>> {
    Json(planner.geo().known_cities())
}

async fn get_places(
    State(planner): State<SharedPlanner>,
    Path(city): Path<String>,
    Query(query): Query<ApiPlacesQuery>,
) -> Result<Json<Vec<PlaceCatalogEntry>>, ApiError> {
    let category: PlaceCategory = query.category.as_deref().unwrap_or("hotel").parse()?;
    let catalog = planner.places();
    let places = match (query.cuisine.as_deref(), query.max_tier) {
        (Some(cuisine), _) if category == PlaceCategory::Restaurant => {
            catalog.get_restaurants_by_cuisine(&city, cuisine, query.limit)
        }
        (Some(_), _) => {
            return Err(TripPlannerError::invalid_request(
                "The cuisine filter only applies to restaurants",
            )
            .into());
        }
        (None, Some(max_tier)) => catalog.get_places_within(&city, category, max_tier, query.limit),
        (None, None) => catalog.get_places(&city, category, query.limit),
    };
    Ok(Json(places))
}

async fn get_health(State(planner): State<SharedPlanner>) -> Json<ApiHealth> {
    Json(ApiHealth {
        status: "ok",
        version: VERSION,
        cached_cities: planner.geo().cached_count().await,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TripPlannerError::invalid_request("Nights must be at least 1"), StatusCode::BAD_REQUEST)]
    #[case(TripPlannerError::invalid_mode("boat"), StatusCode::BAD_REQUEST)]
    #[case(TripPlannerError::unknown_city("Nowhere City"), StatusCode::NOT_FOUND)]
    #[case(TripPlannerError::dataset("cities.json", "broken"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_error_status(#[case] error: TripPlannerError, #[case] expected: StatusCode) {
        assert_eq!(ApiError::from(error).into_response().status(), expected);
    }

    #[test]
    fn test_plan_request_defaults_to_road() {
        let body: ApiPlanRequest = serde_json::from_str(
            r#"{"origin": "Lahore", "destination": "Karachi", "nights": 3, "travelers": 2}"#,
        )
        .unwrap();
        assert_eq!(body.mode, "road");
    }
}

//! Handlers for the read-only brewer and location endpoints.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::brewer::{BrewerListResponse, BrewerResponse, LocationResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists brewers ordered by name with their total turnover.
///
/// # Endpoint
///
/// `GET /api/brewers`
pub async fn brewer_list_handler(
    State(st): State<AppState>,
) -> Result<Json<BrewerListResponse>, AppError> {
    let overview = st.brewer_service.list_brewers().await?;
    Ok(Json(BrewerListResponse::from(&overview)))
}

/// Returns one brewer with its beers.
///
/// # Endpoint
///
/// `GET /api/brewers/{id}`
///
/// # Errors
///
/// - `404 Not Found` - no brewer with this ID
pub async fn brewer_handler(
    State(st): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BrewerResponse>, AppError> {
    let brewer = st.brewer_service.get_brewer(id).await?;
    Ok(Json(BrewerResponse::from(&brewer)))
}

/// Lists locations ordered by name.
///
/// # Endpoint
///
/// `GET /api/locations`
pub async fn location_list_handler(
    State(st): State<AppState>,
) -> Result<Json<Vec<LocationResponse>>, AppError> {
    let locations = st.brewer_service.list_locations().await?;
    Ok(Json(locations.iter().map(LocationResponse::from).collect()))
}

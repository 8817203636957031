//! Handlers for adding and removing a brewer's beers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::brewer::{BeerResponse, CreateBeerRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Adds a beer to a brewer.
///
/// # Endpoint
///
/// `POST /api/brewers/{id}/beers`
///
/// # Request Body
///
/// ```json
/// { "name": "Duvel", "alcohol_by_volume": 8.5 }
/// ```
///
/// # Errors
///
/// - `400 Bad Request` - invalid name or percentage
/// - `404 Not Found` - no brewer with this ID
/// - `409 Conflict` - the brewer already has a beer by that name
pub async fn create_beer_handler(
    State(st): State<AppState>,
    Path(brewer_id): Path<i64>,
    Json(payload): Json<CreateBeerRequest>,
) -> Result<(StatusCode, Json<BeerResponse>), AppError> {
    payload.validate()?;

    let beer = st
        .brewer_service
        .add_beer(
            brewer_id,
            payload.name,
            payload.alcohol_by_volume,
            payload.description,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(BeerResponse::from(&beer))))
}

/// Removes a beer from a brewer.
///
/// # Endpoint
///
/// `DELETE /api/brewers/{id}/beers/{beer_id}`
///
/// # Errors
///
/// - `404 Not Found` - unknown brewer, or the beer is not one of its beers
pub async fn delete_beer_handler(
    State(st): State<AppState>,
    Path((brewer_id, beer_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    st.brewer_service.delete_beer(brewer_id, beer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

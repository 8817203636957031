//! API route configuration.
//!
//! All API endpoints require an admin Bearer token via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    brewer_handler, brewer_list_handler, create_beer_handler, delete_beer_handler,
    location_list_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /brewers`                      - Brewers with total turnover
/// - `GET    /brewers/{id}`                 - One brewer with its beers
/// - `POST   /brewers/{id}/beers`           - Add a beer
/// - `DELETE /brewers/{id}/beers/{beer_id}` - Remove a beer
/// - `GET    /locations`                    - Locations ordered by name
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/brewers", get(brewer_list_handler))
        .route("/brewers/{id}", get(brewer_handler))
        .route("/brewers/{id}/beers", post(create_beer_handler))
        .route("/brewers/{id}/beers/{beer_id}", delete(delete_beer_handler))
        .route("/locations", get(location_list_handler))
}

//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod beers;
pub mod brewers;
pub mod health;

pub use beers::{create_beer_handler, delete_beer_handler};
pub use brewers::{brewer_handler, brewer_list_handler, location_list_handler};
pub use health::health_handler;

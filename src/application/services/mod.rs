//! Business logic services for the application layer.

pub mod auth_service;
pub mod brewer_service;

pub use auth_service::AuthService;
pub use brewer_service::{BrewerOverview, BrewerService};

//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`BrewerRepository`] - Brewers with their beers
//! - [`LocationRepository`] - Location reference data
//! - [`TokenRepository`] - API token authentication
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod brewer_repository;
pub mod location_repository;
pub mod token_repository;

pub use brewer_repository::BrewerRepository;
pub use location_repository::LocationRepository;
pub use token_repository::{ApiToken, Role, TokenRepository};

#[cfg(test)]
pub use brewer_repository::MockBrewerRepository;
#[cfg(test)]
pub use location_repository::MockLocationRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;

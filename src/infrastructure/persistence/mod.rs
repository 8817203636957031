//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow`.
//!
//! # Repositories
//!
//! - [`PgBrewerRepository`] - Brewers and their beers
//! - [`PgLocationRepository`] - Location reference data
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_brewer_repository;
pub mod pg_location_repository;
pub mod pg_token_repository;
pub mod seed;

pub use pg_brewer_repository::PgBrewerRepository;
pub use pg_location_repository::PgLocationRepository;
pub use pg_token_repository::PgTokenRepository;

//! Repository trait for locations.

use crate::domain::entities::Location;
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only access to locations.
///
/// Locations are reference data; brewer operations never create or delete
/// them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Lists all locations, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_all(&self) -> Result<Vec<Location>, AppError>;

    /// Finds a location by postal code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_postal_code(&self, postal_code: &str) -> Result<Option<Location>, AppError>;
}

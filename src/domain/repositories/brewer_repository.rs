//! Repository trait for brewer persistence.

use crate::domain::entities::Brewer;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for brewers and the beers they own.
///
/// Brewers are always loaded with their beers and location. Writes take a
/// whole [`Brewer`] aggregate; implementations persist the brewer row and
/// synchronise its beer collection in a single transaction.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBrewerRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_brewer.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrewerRepository: Send + Sync {
    /// Loads every brewer, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors or if a stored row
    /// violates an entity invariant.
    async fn find_all(&self) -> Result<Vec<Brewer>, AppError>;

    /// Finds a brewer by its database ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Brewer>, AppError>;

    /// Stores a new brewer and its beers.
    ///
    /// Returns the stored brewer with identities assigned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the referenced location does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, brewer: &Brewer) -> Result<Brewer, AppError>;

    /// Persists changes to an existing brewer.
    ///
    /// New beers (id 0) are inserted, existing ones updated and beers no
    /// longer in the collection deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the brewer does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn save(&self, brewer: &Brewer) -> Result<Brewer, AppError>;

    /// Deletes a brewer; its beers are deleted with it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the brewer does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

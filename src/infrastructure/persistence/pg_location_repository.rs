//! PostgreSQL implementation of the location repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Location;
use crate::domain::repositories::LocationRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct LocationRow {
    postal_code: String,
    name: String,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Location::new(row.postal_code, row.name)
    }
}

/// PostgreSQL repository for location reference data.
pub struct PgLocationRepository {
    pool: Arc<PgPool>,
}

impl PgLocationRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for PgLocationRepository {
    async fn find_all(&self) -> Result<Vec<Location>, AppError> {
        let rows = sqlx::query_as::<_, LocationRow>("SELECT postal_code, name FROM location")
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Location::from).collect())
    }

    async fn find_by_postal_code(&self, postal_code: &str) -> Result<Option<Location>, AppError> {
        let row = sqlx::query_as::<_, LocationRow>(
            "SELECT postal_code, name FROM location WHERE postal_code = $1",
        )
        .bind(postal_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Location::from))
    }
}

//! PostgreSQL implementation of the brewer repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{Beer, Brewer, Location};
use crate::domain::repositories::BrewerRepository;
use crate::error::AppError;

const SELECT_BREWERS: &str = r#"
    SELECT b.brewer_id, b.brewer_name, b.description, b.contact_email, b.date_established,
           b.street, b.turnover, b.postal_code, l.name AS location_name
    FROM brewer b
    LEFT JOIN location l ON l.postal_code = b.postal_code
"#;

const SELECT_BEERS: &str = r#"
    SELECT beer_id, brewer_id, name, alcohol_by_volume, description
    FROM beer
"#;

#[derive(sqlx::FromRow)]
struct BrewerRow {
    brewer_id: i64,
    brewer_name: String,
    description: Option<String>,
    contact_email: Option<String>,
    date_established: Option<NaiveDate>,
    street: Option<String>,
    turnover: Option<i32>,
    postal_code: Option<String>,
    location_name: Option<String>,
}

#[derive(sqlx::FromRow)]
struct BeerRow {
    beer_id: i64,
    brewer_id: i64,
    name: String,
    alcohol_by_volume: Option<f64>,
    description: Option<String>,
}

impl BeerRow {
    fn into_beer(self) -> Beer {
        let mut beer = Beer::with_id(self.beer_id, self.name);
        beer.alcohol_by_volume = self.alcohol_by_volume;
        beer.description = self.description;
        beer
    }
}

impl BrewerRow {
    /// Rebuilds the aggregate through the validating builder.
    fn into_brewer(self, beers: Vec<BeerRow>) -> Result<Brewer, AppError> {
        let id = self.brewer_id;
        let location = match (self.postal_code, self.location_name) {
            (Some(postal_code), Some(name)) => Some(Location::new(postal_code, name)),
            _ => None,
        };

        Brewer::builder(self.brewer_name)
            .id(id)
            .description(self.description)
            .contact_email(self.contact_email)
            .date_established(self.date_established)
            .street(self.street)
            .location(location)
            .turnover(self.turnover)
            .beers(beers.into_iter().map(BeerRow::into_beer))
            .build()
            .map_err(|e| {
                AppError::internal(
                    "Stored brewer violates an invariant",
                    json!({"brewer_id": id, "reason": e.to_string()}),
                )
            })
    }
}

/// PostgreSQL repository for brewers and their beers.
///
/// The `beer` table cascades on brewer deletion; `location` is restricted,
/// so deleting a brewer never touches locations.
pub struct PgBrewerRepository {
    pool: Arc<PgPool>,
}

impl PgBrewerRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn load(&self, id: i64) -> Result<Brewer, AppError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Brewer not found", json!({"id": id})))
    }
}

async fn insert_beer(
    tx: &mut Transaction<'_, Postgres>,
    brewer_id: i64,
    beer: &Beer,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO beer (brewer_id, name, alcohol_by_volume, description)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(brewer_id)
    .bind(beer.name())
    .bind(beer.alcohol_by_volume)
    .bind(beer.description.as_deref())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

#[async_trait]
impl BrewerRepository for PgBrewerRepository {
    async fn find_all(&self) -> Result<Vec<Brewer>, AppError> {
        let rows = sqlx::query_as::<_, BrewerRow>(SELECT_BREWERS)
            .fetch_all(self.pool.as_ref())
            .await?;

        let beer_rows = sqlx::query_as::<_, BeerRow>(&format!("{SELECT_BEERS} ORDER BY beer_id"))
            .fetch_all(self.pool.as_ref())
            .await?;

        let mut beers_by_brewer: HashMap<i64, Vec<BeerRow>> = HashMap::new();
        for beer in beer_rows {
            beers_by_brewer.entry(beer.brewer_id).or_default().push(beer);
        }

        rows.into_iter()
            .map(|row| {
                let beers = beers_by_brewer.remove(&row.brewer_id).unwrap_or_default();
                row.into_brewer(beers)
            })
            .collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Brewer>, AppError> {
        let row = sqlx::query_as::<_, BrewerRow>(&format!("{SELECT_BREWERS} WHERE b.brewer_id = $1"))
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let beers = sqlx::query_as::<_, BeerRow>(&format!(
            "{SELECT_BEERS} WHERE brewer_id = $1 ORDER BY beer_id"
        ))
        .bind(id)
        .fetch_all(self.pool.as_ref())
        .await?;

        row.into_brewer(beers).map(Some)
    }

    async fn create(&self, brewer: &Brewer) -> Result<Brewer, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO brewer
                (brewer_name, description, contact_email, date_established, street, postal_code, turnover)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING brewer_id
            "#,
        )
        .bind(brewer.name())
        .bind(brewer.description.as_deref())
        .bind(brewer.contact_email())
        .bind(brewer.date_established())
        .bind(brewer.street.as_deref())
        .bind(brewer.location.as_ref().map(|l| l.postal_code.as_str()))
        .bind(brewer.turnover())
        .fetch_one(&mut *tx)
        .await?;

        for beer in brewer.beers() {
            insert_beer(&mut tx, id, beer).await?;
        }

        tx.commit().await?;

        self.load(id).await
    }

    async fn save(&self, brewer: &Brewer) -> Result<Brewer, AppError> {
        let id = brewer.id();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE brewer SET
                brewer_name      = $2,
                description      = $3,
                contact_email    = $4,
                date_established = $5,
                street           = $6,
                postal_code      = $7,
                turnover         = $8
            WHERE brewer_id = $1
            "#,
        )
        .bind(id)
        .bind(brewer.name())
        .bind(brewer.description.as_deref())
        .bind(brewer.contact_email())
        .bind(brewer.date_established())
        .bind(brewer.street.as_deref())
        .bind(brewer.location.as_ref().map(|l| l.postal_code.as_str()))
        .bind(brewer.turnover())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::not_found("Brewer not found", json!({"id": id})));
        }

        // Removed beers go first so a re-added name does not hit the unique key.
        let kept: Vec<i64> = brewer
            .beers()
            .iter()
            .filter(|b| !b.is_new())
            .map(Beer::id)
            .collect();

        sqlx::query("DELETE FROM beer WHERE brewer_id = $1 AND NOT (beer_id = ANY($2))")
            .bind(id)
            .bind(kept)
            .execute(&mut *tx)
            .await?;

        for beer in brewer.beers() {
            if beer.is_new() {
                insert_beer(&mut tx, id, beer).await?;
                continue;
            }

            let updated = sqlx::query(
                r#"
                UPDATE beer SET name = $3, alcohol_by_volume = $4, description = $5
                WHERE beer_id = $1 AND brewer_id = $2
                "#,
            )
            .bind(beer.id())
            .bind(id)
            .bind(beer.name())
            .bind(beer.alcohol_by_volume)
            .bind(beer.description.as_deref())
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                tx.rollback().await?;
                return Err(AppError::not_found(
                    "Beer not found",
                    json!({"brewer_id": id, "beer_id": beer.id()}),
                ));
            }
        }

        tx.commit().await?;

        self.load(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM brewer WHERE brewer_id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Brewer not found", json!({"id": id})));
        }

        Ok(())
    }
}

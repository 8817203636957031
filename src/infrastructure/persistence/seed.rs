//! Demo data for an empty database.
//!
//! Used by the `admin seed` command and by the server when `SEED_DATA=true`.

use chrono::NaiveDate;
use serde_json::json;
use sqlx::PgPool;

use crate::domain::entities::{Beer, Brewer, Location};
use crate::domain::repositories::BrewerRepository;
use crate::error::AppError;

/// Postal code and name of every seeded location.
pub const LOCATIONS: [(&str, &str); 3] = [
    ("8531", "Bavikhove"),
    ("2870", "Puurs"),
    ("3000", "Leuven"),
];

fn beer(name: &str, alcohol_by_volume: f64) -> Beer {
    let mut beer = Beer::new(name);
    beer.alcohol_by_volume = Some(alcohol_by_volume);
    beer
}

fn seed_error(e: impl std::fmt::Display) -> AppError {
    AppError::internal("Seed data is invalid", json!({"reason": e.to_string()}))
}

/// Builds the demo brewers against the given locations.
pub fn demo_brewers(locations: &[Location]) -> Result<Vec<Brewer>, AppError> {
    let find = |postal_code: &str| {
        locations
            .iter()
            .find(|l| l.postal_code == postal_code)
            .cloned()
    };

    let bavik = Brewer::builder("Bavik")
        .street(Some("Rijksweg 33".to_string()))
        .location(find("8531"))
        .contact_email(Some("info@bavik.be".to_string()))
        .date_established(NaiveDate::from_ymd_opt(1894, 1, 1))
        .turnover(Some(20_000_000))
        .beers([beer("Bavik Pils", 5.2), beer("Wittekerke", 5.0), beer("Ezel Bruin", 6.5)])
        .build()
        .map_err(seed_error)?;

    let moortgat = Brewer::builder("Duvel Moortgat")
        .street(Some("Breendonkdorp 58".to_string()))
        .location(find("2870"))
        .description(Some("Family brewery behind Duvel".to_string()))
        .date_established(NaiveDate::from_ymd_opt(1871, 1, 1))
        .beers([beer("Duvel", 8.5), beer("Vedett Extra White", 4.7)])
        .build()
        .map_err(seed_error)?;

    let de_leeuw = Brewer::builder("De Leeuw")
        .street(Some("Vaartstraat 94".to_string()))
        .location(find("3000"))
        .turnover(Some(50_000))
        .build()
        .map_err(seed_error)?;

    Ok(vec![bavik, moortgat, de_leeuw])
}

/// Inserts the demo locations and brewers when no brewer exists yet.
///
/// Returns `true` when data was written. Locations that already exist are
/// left untouched.
pub async fn seed_demo_data(
    pool: &PgPool,
    brewers: &dyn BrewerRepository,
) -> Result<bool, AppError> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM brewer")
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        tracing::debug!(existing, "Brewers present, skipping seed");
        return Ok(false);
    }

    let mut locations = Vec::with_capacity(LOCATIONS.len());
    for (postal_code, name) in LOCATIONS {
        sqlx::query(
            "INSERT INTO location (postal_code, name) VALUES ($1, $2) ON CONFLICT (postal_code) DO NOTHING",
        )
        .bind(postal_code)
        .bind(name)
        .execute(pool)
        .await?;
        locations.push(Location::new(postal_code, name));
    }

    for brewer in demo_brewers(&locations)? {
        let stored = brewers.create(&brewer).await?;
        tracing::info!(brewer_id = stored.id(), name = stored.name(), "Seeded brewer");
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locations() -> Vec<Location> {
        LOCATIONS
            .iter()
            .map(|(code, name)| Location::new(*code, *name))
            .collect()
    }

    #[test]
    fn test_demo_brewers_are_valid_and_located() {
        let brewers = demo_brewers(&locations()).unwrap();

        assert_eq!(brewers.len(), 3);
        assert!(brewers.iter().all(|b| b.location.is_some()));
        assert!(brewers.iter().all(Brewer::is_new));
        assert_eq!(brewers[0].beer_count(), 3);
        assert_eq!(brewers[1].get_beer_by_name("Duvel").unwrap().alcohol_by_volume, Some(8.5));
    }

    #[test]
    fn test_demo_brewers_without_locations() {
        let brewers = demo_brewers(&[]).unwrap();

        assert!(brewers.iter().all(|b| b.location.is_none()));
    }

    #[tokio::test]
    async fn test_demo_brewers_persist_through_repository() {
        use crate::domain::repositories::MockBrewerRepository;

        let mut repo = MockBrewerRepository::new();
        repo.expect_create()
            .times(3)
            .returning(|b| Ok(b.clone()));

        for brewer in demo_brewers(&locations()).unwrap() {
            repo.create(&brewer).await.unwrap();
        }
    }
}

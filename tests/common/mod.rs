#![allow(dead_code)]

use beerhall::application::services::auth_service::hash_token;
use beerhall::domain::repositories::{Role, TokenRepository};
use beerhall::infrastructure::persistence::PgTokenRepository;
use beerhall::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub const SIGNING_SECRET: &str = "test-signing-secret";

pub async fn create_test_location(pool: &PgPool, postal_code: &str, name: &str) {
    sqlx::query("INSERT INTO location (postal_code, name) VALUES ($1, $2)")
        .bind(postal_code)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_test_brewer(pool: &PgPool, name: &str, postal_code: Option<&str>) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO brewer (brewer_name, postal_code) VALUES ($1, $2) RETURNING brewer_id",
    )
    .bind(name)
    .bind(postal_code)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_beer(pool: &PgPool, brewer_id: i64, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO beer (brewer_id, name) VALUES ($1, $2) RETURNING beer_id")
        .bind(brewer_id)
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_beers(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM beer")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_locations(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM location")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Stores a token and returns the raw value to present.
pub async fn create_test_token(pool: &PgPool, name: &str, role: Role) -> String {
    let raw = format!("{name}-secret");
    PgTokenRepository::new(Arc::new(pool.clone()))
        .create_token(name, &hash_token(SIGNING_SECRET, &raw), role)
        .await
        .unwrap();
    raw
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(pool), SIGNING_SECRET.to_string(), false)
}

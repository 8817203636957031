//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, BrewerService};
use crate::infrastructure::persistence::{
    PgBrewerRepository, PgLocationRepository, PgTokenRepository,
};

/// Services shared by the API and web layers.
///
/// Cloned per request by axum; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub brewer_service: Arc<BrewerService>,
    pub auth_service: Arc<AuthService>,
    /// Whether the login cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

impl AppState {
    /// Wires PostgreSQL repositories into the services.
    pub fn new(pool: Arc<PgPool>, token_signing_secret: String, cookie_secure: bool) -> Self {
        let brewer_repository = Arc::new(PgBrewerRepository::new(pool.clone()));
        let location_repository = Arc::new(PgLocationRepository::new(pool.clone()));
        let token_repository = Arc::new(PgTokenRepository::new(pool));

        Self {
            brewer_service: Arc::new(BrewerService::new(brewer_repository, location_repository)),
            auth_service: Arc::new(AuthService::new(token_repository, token_signing_secret)),
            cookie_secure,
        }
    }
}

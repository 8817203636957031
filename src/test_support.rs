//! Shared in-memory data set for unit tests.
//!
//! - Bavik: every field filled in, two beers
//! - Duvel Moortgat: turnover unset, one beer
//! - De Leeuw: no beers

use std::sync::Arc;

use crate::application::services::auth_service::hash_token;
use crate::application::services::{AuthService, BrewerService};
use crate::domain::entities::{Brewer, Location};
use crate::domain::repositories::{
    MockBrewerRepository, MockLocationRepository, MockTokenRepository, Role,
};
use crate::state::AppState;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const CUSTOMER_TOKEN: &str = "customer-token";

pub struct Fixtures {
    pub bavikhove: Location,
    pub locations: Vec<Location>,
    pub bavik: Brewer,
    pub moortgat: Brewer,
    pub de_leeuw: Brewer,
}

impl Fixtures {
    pub fn new() -> Self {
        let bavikhove = Location::new("8531", "Bavikhove");
        let puurs = Location::new("2870", "Puurs");
        let leuven = Location::new("3000", "Leuven");

        let mut bavik = Brewer::with_location(
            "Bavik",
            Some(bavikhove.clone()),
            Some("Rijksweg 33".to_string()),
        )
        .unwrap();
        bavik.set_id(1);
        bavik.add_beer("Bavik Pils", Some(5.2), None).unwrap().set_id(1);
        bavik.add_beer("Wittekerke", Some(5.0), None).unwrap().set_id(2);
        bavik.set_turnover(Some(20_000_000)).unwrap();

        let mut moortgat = Brewer::with_location(
            "Duvel Moortgat",
            Some(puurs.clone()),
            Some("Breendonkdorp 28".to_string()),
        )
        .unwrap();
        moortgat.set_id(2);
        moortgat.add_beer("Duvel", Some(8.5), None).unwrap().set_id(3);

        let mut de_leeuw = Brewer::new("De Leeuw").unwrap();
        de_leeuw.set_id(3);
        de_leeuw.set_turnover(Some(50_000)).unwrap();

        Self {
            locations: vec![bavikhove.clone(), puurs, leuven],
            bavikhove,
            bavik,
            moortgat,
            de_leeuw,
        }
    }

    /// All brewers, deliberately not ordered by name.
    pub fn brewers(&self) -> Vec<Brewer> {
        vec![
            self.de_leeuw.clone(),
            self.moortgat.clone(),
            self.bavik.clone(),
        ]
    }
}

/// Token repository knowing one admin and one customer token.
pub fn token_repository() -> MockTokenRepository {
    let admin = hash_token(SIGNING_SECRET, ADMIN_TOKEN);
    let customer = hash_token(SIGNING_SECRET, CUSTOMER_TOKEN);

    let mut tokens = MockTokenRepository::new();
    tokens.expect_validate_token().returning(move |hash| {
        Ok(if hash == admin {
            Some(Role::Admin)
        } else if hash == customer {
            Some(Role::Customer)
        } else {
            None
        })
    });
    tokens.expect_update_last_used().returning(|_| Ok(()));
    tokens
}

/// Application state over mocked repositories.
pub fn app_state(brewers: MockBrewerRepository, locations: MockLocationRepository) -> AppState {
    AppState {
        brewer_service: Arc::new(BrewerService::new(Arc::new(brewers), Arc::new(locations))),
        auth_service: Arc::new(AuthService::new(
            Arc::new(token_repository()),
            SIGNING_SECRET.to_string(),
        )),
        cookie_secure: false,
    }
}

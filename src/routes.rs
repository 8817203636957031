//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`                - Redirect to the brewer list
//! - `GET  /brewer`          - Brewer list (public)
//! - `/brewer/{create,edit,delete}` - Admin screens (cookie session, admin role)
//! - `GET|POST /login`, `POST /logout` - Session handling
//! - `GET  /health`          - Health check (public)
//! - `/api/*`                - JSON API (admin Bearer token required)
//! - `/static/*`             - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Authentication** - Bearer token (API) or cookie session (web)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::web_auth;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// Rate limiting keys on the peer address, so the router must be served
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, true))
}

/// Builds the routes with authentication, optionally with rate limiting.
///
/// Without rate limiting the router needs no connect info, which is how the
/// handler tests drive it.
pub fn build_router(state: AppState, rate_limited: bool) -> Router {
    let mut api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let mut web_admin = web::routes::admin_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        web_auth::require_admin,
    ));

    let mut web_public = web::routes::public_routes();

    if rate_limited {
        api_router = api_router.layer(rate_limit::secure_layer());
        web_admin = web_admin.layer(rate_limit::secure_layer());
        web_public = web_public.layer(rate_limit::layer());
    }

    Router::new()
        .merge(web_public)
        .merge(web_admin)
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Brewer;
    use crate::domain::repositories::{MockBrewerRepository, MockLocationRepository};
    use crate::error::AppError;
    use crate::test_support::{Fixtures, app_state};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    const ADMIN_COOKIE: &str = "auth_token=admin-token";
    const CUSTOMER_COOKIE: &str = "auth_token=customer-token";

    fn server(brewers: MockBrewerRepository, locations: MockLocationRepository) -> TestServer {
        TestServer::new(build_router(app_state(brewers, locations), false)).unwrap()
    }

    fn listing() -> MockBrewerRepository {
        let fixtures = Fixtures::new();
        let mut brewers = MockBrewerRepository::new();
        brewers
            .expect_find_all()
            .returning(move || Ok(fixtures.brewers()));
        brewers
    }

    fn with_locations() -> MockLocationRepository {
        let fixtures = Fixtures::new();
        let mut locations = MockLocationRepository::new();
        locations
            .expect_find_all()
            .returning(move || Ok(fixtures.locations.clone()));
        locations
    }

    fn finding_bavik(brewers: &mut MockBrewerRepository) {
        let bavik = Fixtures::new().bavik;
        brewers
            .expect_find_by_id()
            .withf(|id| *id == 1)
            .returning(move |_| Ok(Some(bavik.clone())));
    }

    fn flash_cookie(name: &str, text: &str) -> String {
        format!("{name}={}", hex::encode(text))
    }

    #[tokio::test]
    async fn test_root_redirects_to_brewers() {
        let server = server(MockBrewerRepository::new(), MockLocationRepository::new());

        let response = server.get("/").await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/brewer");
    }

    #[tokio::test]
    async fn test_index_is_public_and_shows_totals() {
        let server = server(listing(), MockLocationRepository::new());

        for path in ["/brewer", "/brewer/index"] {
            let response = server.get(path).await;

            response.assert_status_ok();
            let html = response.text();
            assert!(html.contains("Duvel Moortgat"));
            assert!(html.contains("20,000,000"));
            assert!(html.contains("20,050,000"));
            assert!(!html.contains("/brewer/edit/"));
        }
    }

    #[tokio::test]
    async fn test_index_lists_brewers_by_name() {
        let server = server(listing(), MockLocationRepository::new());

        let html = server.get("/brewer").await.text();

        let bavik = html.find("Bavik").unwrap();
        let de_leeuw = html.find("De Leeuw").unwrap();
        let moortgat = html.find("Duvel Moortgat").unwrap();
        assert!(bavik < de_leeuw && de_leeuw < moortgat);
    }

    #[tokio::test]
    async fn test_index_shows_admin_links_to_admins() {
        let server = server(listing(), MockLocationRepository::new());

        let response = server
            .get("/brewer")
            .add_header("cookie", ADMIN_COOKIE)
            .await;

        let html = response.text();
        assert!(html.contains("/brewer/edit/1"));
        assert!(html.contains("/brewer/delete/1"));
        assert!(html.contains("/brewer/create"));
    }

    #[tokio::test]
    async fn test_index_shows_flash_once() {
        let server = server(listing(), MockLocationRepository::new());
        let cookie = flash_cookie("flash_message", "You successfully updated brewer Bavik.");

        let response = server.get("/brewer").add_header("cookie", &cookie).await;

        response.assert_status_ok();
        assert!(response.text().contains("You successfully updated brewer Bavik."));
        let set_cookie = response.header("set-cookie");
        let set_cookie = set_cookie.to_str().unwrap();
        assert!(set_cookie.starts_with("flash_message=;"));
        assert!(set_cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_admin_screens_redirect_anonymous_to_login() {
        let server = server(MockBrewerRepository::new(), MockLocationRepository::new());

        for path in ["/brewer/create", "/brewer/edit/1", "/brewer/delete/1"] {
            let response = server.get(path).await;

            response.assert_status(StatusCode::SEE_OTHER);
            assert_eq!(response.header("location"), "/login");
        }
    }

    #[tokio::test]
    async fn test_admin_screens_deny_customers() {
        let server = server(MockBrewerRepository::new(), MockLocationRepository::new());

        let response = server
            .get("/brewer/create")
            .add_header("cookie", CUSTOMER_COOKIE)
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/brewer");
    }

    #[tokio::test]
    async fn test_create_page_lists_locations() {
        let server = server(MockBrewerRepository::new(), with_locations());

        let response = server
            .get("/brewer/create")
            .add_header("cookie", ADMIN_COOKIE)
            .await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("8531 Bavikhove"));
        assert!(html.contains("action=\"/brewer/create\""));
    }

    #[tokio::test]
    async fn test_create_brewer_redirects_with_flash() {
        let fixtures = Fixtures::new();
        let mut locations = MockLocationRepository::new();
        let bavikhove = fixtures.bavikhove.clone();
        locations
            .expect_find_by_postal_code()
            .withf(|pc| pc == "8531")
            .returning(move |_| Ok(Some(bavikhove.clone())));

        let mut brewers = MockBrewerRepository::new();
        brewers
            .expect_create()
            .withf(|b| b.name() == "Chimay" && b.turnover() == Some(1000))
            .times(1)
            .returning(|b| {
                let mut stored = b.clone();
                stored.set_id(10);
                Ok(stored)
            });

        let server = server(brewers, locations);

        let response = server
            .post("/brewer/create")
            .add_header("cookie", ADMIN_COOKIE)
            .form(&[
                ("name", "Chimay"),
                ("postal_code", "8531"),
                ("street", ""),
                ("contact_email", ""),
                ("date_established", ""),
                ("turnover", "1000"),
            ])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/brewer");
        let set_cookie = response.header("set-cookie");
        assert!(set_cookie.to_str().unwrap().starts_with(&flash_cookie(
            "flash_message",
            "You successfully added brewer Chimay."
        )));
    }

    #[tokio::test]
    async fn test_create_invalid_form_rerenders_without_saving() {
        let server = server(MockBrewerRepository::new(), with_locations());

        let response = server
            .post("/brewer/create")
            .add_header("cookie", ADMIN_COOKIE)
            .form(&[
                ("name", ""),
                ("postal_code", "2870"),
                ("contact_email", "not-an-email"),
            ])
            .await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("A brewer must have a name"));
        assert!(html.contains("Email address is not valid"));
        assert!(html.contains("value=\"2870\" selected"));
    }

    #[tokio::test]
    async fn test_edit_unknown_brewer_is_not_found() {
        let mut brewers = MockBrewerRepository::new();
        brewers.expect_find_by_id().returning(|_| Ok(None));

        let server = server(brewers, MockLocationRepository::new());

        let response = server
            .get("/brewer/edit/42")
            .add_header("cookie", ADMIN_COOKIE)
            .await;

        response.assert_status_not_found();
        assert!(response.text().contains("Brewer not found"));
    }

    #[tokio::test]
    async fn test_edit_page_prefills_form() {
        let mut brewers = MockBrewerRepository::new();
        finding_bavik(&mut brewers);

        let server = server(brewers, with_locations());

        let response = server
            .get("/brewer/edit/1")
            .add_header("cookie", ADMIN_COOKIE)
            .await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("value=\"Bavik\""));
        assert!(html.contains("value=\"Rijksweg 33\""));
        assert!(html.contains("value=\"8531\" selected"));
    }

    #[tokio::test]
    async fn test_edit_with_unknown_postal_code_is_a_form_error() {
        let mut brewers = MockBrewerRepository::new();
        finding_bavik(&mut brewers);

        let mut locations = with_locations();
        locations
            .expect_find_by_postal_code()
            .returning(|_| Ok(None));

        let server = server(brewers, locations);

        let response = server
            .post("/brewer/edit/1")
            .add_header("cookie", ADMIN_COOKIE)
            .form(&[("name", "Bavik"), ("postal_code", "9999")])
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("Unknown postal code"));
    }

    #[tokio::test]
    async fn test_edit_saves_and_redirects() {
        let mut brewers = MockBrewerRepository::new();
        finding_bavik(&mut brewers);
        brewers
            .expect_save()
            .withf(|b| b.name() == "Brouwerij Bavik" && b.beer_count() == 2)
            .times(1)
            .returning(|b| Ok(b.clone()));

        let server = server(brewers, MockLocationRepository::new());

        let response = server
            .post("/brewer/edit/1")
            .add_header("cookie", ADMIN_COOKIE)
            .form(&[("name", "Brouwerij Bavik"), ("turnover", "20000000")])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        let set_cookie = response.header("set-cookie");
        assert!(set_cookie.to_str().unwrap().starts_with(&flash_cookie(
            "flash_message",
            "You successfully updated brewer Brouwerij Bavik."
        )));
    }

    #[tokio::test]
    async fn test_delete_page_confirms() {
        let mut brewers = MockBrewerRepository::new();
        finding_bavik(&mut brewers);

        let server = server(brewers, MockLocationRepository::new());

        let response = server
            .get("/brewer/delete/1")
            .add_header("cookie", ADMIN_COOKIE)
            .await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("Bavik"));
        assert!(html.contains("action=\"/brewer/delete/1\""));
    }

    #[tokio::test]
    async fn test_delete_brewer_success() {
        let mut brewers = MockBrewerRepository::new();
        finding_bavik(&mut brewers);
        brewers.expect_delete().times(1).returning(|_| Ok(()));

        let server = server(brewers, MockLocationRepository::new());

        let response = server
            .post("/brewer/delete/1")
            .add_header("cookie", ADMIN_COOKIE)
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        let set_cookie = response.header("set-cookie");
        assert!(set_cookie.to_str().unwrap().starts_with(&flash_cookie(
            "flash_message",
            "You successfully deleted brewer Bavik."
        )));
    }

    #[tokio::test]
    async fn test_delete_brewer_failure_sets_error_flash() {
        let mut brewers = MockBrewerRepository::new();
        finding_bavik(&mut brewers);
        brewers
            .expect_delete()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let server = server(brewers, MockLocationRepository::new());

        let response = server
            .post("/brewer/delete/1")
            .add_header("cookie", ADMIN_COOKIE)
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/brewer");
        let set_cookie = response.header("set-cookie");
        assert!(set_cookie.to_str().unwrap().starts_with(&flash_cookie(
            "flash_error",
            "Sorry, something went wrong, brewer Bavik was not deleted..."
        )));
    }

    #[tokio::test]
    async fn test_delete_unknown_brewer_redirects_with_error_flash() {
        let mut brewers = MockBrewerRepository::new();
        brewers.expect_find_by_id().returning(|_| Ok(None));
        brewers.expect_delete().times(0);

        let server = server(brewers, MockLocationRepository::new());

        let response = server
            .post("/brewer/delete/999")
            .add_header("cookie", ADMIN_COOKIE)
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/brewer");
        let set_cookie = response.header("set-cookie");
        assert!(set_cookie.to_str().unwrap().starts_with(&flash_cookie(
            "flash_error",
            "Sorry, something went wrong, the brewer was not deleted..."
        )));
    }

    #[tokio::test]
    async fn test_login_sets_cookie() {
        let server = server(MockBrewerRepository::new(), MockLocationRepository::new());

        let response = server
            .post("/login")
            .form(&[("token", "admin-token")])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        let set_cookie = response.header("set-cookie");
        let set_cookie = set_cookie.to_str().unwrap();
        assert!(set_cookie.starts_with("auth_token=admin-token;"));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(!set_cookie.contains("Secure"));
    }

    #[tokio::test]
    async fn test_login_rejects_unknown_token() {
        let server = server(MockBrewerRepository::new(), MockLocationRepository::new());

        let response = server.post("/login").form(&[("token", "nope")]).await;

        response.assert_status_unauthorized();
        assert!(response.text().contains("Invalid or revoked token"));
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let server = server(MockBrewerRepository::new(), MockLocationRepository::new());

        let response = server.post("/logout").await;

        response.assert_status(StatusCode::SEE_OTHER);
        let set_cookie = response.header("set-cookie");
        assert!(set_cookie.to_str().unwrap().starts_with("auth_token=;"));
    }

    #[tokio::test]
    async fn test_api_requires_admin_bearer_token() {
        let server = server(MockBrewerRepository::new(), MockLocationRepository::new());

        let response = server.get("/api/brewers").await;
        response.assert_status_unauthorized();
        assert_eq!(response.header("www-authenticate"), "Bearer");

        let response = server
            .get("/api/brewers")
            .add_header("authorization", "Bearer customer-token")
            .await;
        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_api_lists_brewers() {
        let server = server(listing(), MockLocationRepository::new());

        let response = server
            .get("/api/brewers")
            .add_header("authorization", "Bearer admin-token")
            .await;

        response.assert_status_ok();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["total_turnover"], 20_050_000);
        assert_eq!(json["items"][0]["name"], "Bavik");
        assert_eq!(json["items"][0]["beer_count"], 2);
        assert_eq!(json["items"][1]["turnover"], 50_000);
        assert!(json["items"][2]["turnover"].is_null());
    }

    #[tokio::test]
    async fn test_api_add_duplicate_beer_conflicts() {
        let mut brewers = MockBrewerRepository::new();
        finding_bavik(&mut brewers);

        let server = server(brewers, MockLocationRepository::new());

        let response = server
            .post("/api/brewers/1/beers")
            .add_header("authorization", "Bearer admin-token")
            .json(&json!({"name": "Bavik Pils", "alcohol_by_volume": 5.2}))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"]["code"], "conflict");
        assert_eq!(
            json["error"]["message"],
            "Brewer Bavik has already a beer by the name of Bavik Pils"
        );
    }

    #[tokio::test]
    async fn test_api_add_beer_created() {
        let mut brewers = MockBrewerRepository::new();
        finding_bavik(&mut brewers);
        brewers.expect_save().times(1).returning(|b| {
            let stored = Brewer::builder(b.name())
                .id(b.id())
                .beers(b.beers().iter().cloned().map(|mut beer| {
                    if beer.is_new() {
                        beer.set_id(7);
                    }
                    beer
                }))
                .build()
                .unwrap();
            Ok(stored)
        });

        let server = server(brewers, MockLocationRepository::new());

        let response = server
            .post("/api/brewers/1/beers")
            .add_header("authorization", "Bearer admin-token")
            .json(&json!({"name": "Ezel Wit", "alcohol_by_volume": 5.8}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Ezel Wit");
    }

    #[tokio::test]
    async fn test_api_delete_beer_of_other_brewer_not_found() {
        let mut brewers = MockBrewerRepository::new();
        finding_bavik(&mut brewers);

        let server = server(brewers, MockLocationRepository::new());

        let response = server
            .delete("/api/brewers/1/beers/3")
            .add_header("authorization", "Bearer admin-token")
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_api_locations() {
        let server = server(MockBrewerRepository::new(), with_locations());

        let response = server
            .get("/api/locations")
            .add_header("authorization", "Bearer admin-token")
            .await;

        response.assert_status_ok();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json[0]["name"], "Bavikhove");
        assert_eq!(json[1]["name"], "Leuven");
        assert_eq!(json[2]["name"], "Puurs");
    }

    #[tokio::test]
    async fn test_health() {
        let server = server(MockBrewerRepository::new(), with_locations());

        let response = server.get("/health").await;

        response.assert_status_ok();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["checks"]["database"]["status"], "ok");
    }

    #[tokio::test]
    async fn test_health_degraded() {
        let mut locations = MockLocationRepository::new();
        locations
            .expect_find_all()
            .returning(|| Err(AppError::internal("Database error", json!({}))));

        let server = server(MockBrewerRepository::new(), locations);

        let response = server.get("/health").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["status"], "degraded");
    }
}

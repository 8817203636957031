//! Browser screen route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    create_page, create_submit, delete_page, delete_submit, edit_page, edit_submit, index_handler,
    login_page, login_submit, logout_handler, root_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Screens that change brewers; administrators only.
///
/// Protected via [`crate::web::middleware::web_auth::require_admin`].
///
/// # Endpoints
///
/// - `GET|POST /brewer/create` - Add a brewer
/// - `GET|POST /brewer/edit/{id}` - Edit a brewer
/// - `GET|POST /brewer/delete/{id}` - Confirm and delete a brewer
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/brewer/create", get(create_page).post(create_submit))
        .route("/brewer/edit/{id}", get(edit_page).post(edit_submit))
        .route("/brewer/delete/{id}", get(delete_page).post(delete_submit))
}

/// Screens open to anonymous visitors.
///
/// # Endpoints
///
/// - `GET /` - Redirect to the brewer list
/// - `GET /brewer`, `GET /brewer/index` - Brewer list
/// - `GET|POST /login` - Sign in with an API token
/// - `POST /logout` - Sign out
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/brewer", get(index_handler))
        .route("/brewer/index", get(index_handler))
        .route("/login", get(login_page).post(login_submit))
        .route("/logout", post(logout_handler))
}

//! Cookie-based authentication for the admin screens.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{Redirect, Response},
};

use crate::domain::repositories::Role;
use crate::state::AppState;
use crate::web::cookies;

/// Name of the cookie holding the raw API token.
pub const AUTH_COOKIE: &str = "auth_token";

/// Resolves the role of the token stored in the `auth_token` cookie.
///
/// Returns `None` for anonymous visitors and for invalid or revoked tokens.
pub async fn current_role(state: &AppState, headers: &HeaderMap) -> Option<Role> {
    let token = cookies::read(headers, AUTH_COOKIE)?;
    state.auth_service.authenticate(&token).await.ok()
}

/// Lets only administrators through to the wrapped routes.
///
/// # Redirects
///
/// - Anonymous visitors or an invalid token: `/login`
/// - Authenticated users without the admin role: `/brewer`
///
/// Unlike the API auth middleware, which answers `401 Unauthorized`, this
/// redirects so a browser lands on a usable page.
///
/// # Example
///
/// ```rust,ignore
/// let admin = Router::new()
///     .route("/brewer/create", get(create_page))
///     .route_layer(middleware::from_fn_with_state(state.clone(), web_auth::require_admin));
/// ```
pub async fn require_admin(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    match current_role(&st, req.headers()).await {
        Some(Role::Admin) => Ok(next.run(req).await),
        Some(role) => {
            tracing::info!(%role, path = %req.uri().path(), "Access denied");
            Err(Redirect::to("/brewer"))
        }
        None => Err(Redirect::to("/login")),
    }
}

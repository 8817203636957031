//! Sign-in and sign-out handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::cookies;
use crate::web::handlers::PageError;
use crate::web::middleware::web_auth::AUTH_COOKIE;

/// Template for the login page.
///
/// Renders `templates/login.html` with a token input form and an optional
/// error from a rejected attempt.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub token: String,
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login`
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate { error: None }
}

/// Checks the submitted token and stores it in the `auth_token` cookie.
///
/// # Endpoint
///
/// `POST /login`
///
/// Redirects to `/brewer` on success. An unknown or revoked token re-renders
/// the form with `401 Unauthorized`.
pub async fn login_submit(State(st): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let token = form.token.trim();

    match st.auth_service.authenticate(token).await {
        Ok(role) => {
            tracing::info!(%role, "Signed in");
            (
                AppendHeaders([(SET_COOKIE, cookies::set(AUTH_COOKIE, token, st.cookie_secure))]),
                Redirect::to("/brewer"),
            )
                .into_response()
        }
        Err(AppError::Unauthorized { .. }) => (
            StatusCode::UNAUTHORIZED,
            LoginTemplate {
                error: Some("Invalid or revoked token".to_string()),
            },
        )
            .into_response(),
        Err(e) => PageError(e).into_response(),
    }
}

/// Drops the `auth_token` cookie.
///
/// # Endpoint
///
/// `POST /logout`
pub async fn logout_handler() -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, cookies::clear(AUTH_COOKIE))]),
        Redirect::to("/brewer"),
    )
}

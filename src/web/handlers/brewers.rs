//! Brewer list and the admin create, edit and delete screens.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};

use crate::domain::entities::Brewer;
use crate::domain::repositories::Role;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::flash::{self, Flash};
use crate::web::forms::{BrewerForm, FieldErrors, LocationOption};
use crate::web::handlers::PageError;
use crate::web::middleware::web_auth::current_role;

/// One line of the brewer table.
pub struct BrewerRow {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub street: String,
    pub turnover: String,
    pub beer_count: usize,
}

impl From<&Brewer> for BrewerRow {
    fn from(brewer: &Brewer) -> Self {
        Self {
            id: brewer.id(),
            name: brewer.name().to_string(),
            location: brewer
                .location
                .as_ref()
                .map(|l| l.name.clone())
                .unwrap_or_default(),
            street: brewer.street.clone().unwrap_or_default(),
            turnover: brewer
                .turnover()
                .map(|t| format_number(i64::from(t)))
                .unwrap_or_default(),
            beer_count: brewer.beer_count(),
        }
    }
}

/// Formats an amount with thousands separators: `20050000` → `20,050,000`.
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Template, WebTemplate)]
#[template(path = "brewers/index.html")]
pub struct BrewerIndexTemplate {
    pub brewers: Vec<BrewerRow>,
    pub total_turnover: String,
    pub flash: Flash,
    pub is_admin: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "brewers/edit.html")]
pub struct BrewerEditTemplate {
    pub title: &'static str,
    pub action: String,
    pub form: BrewerForm,
    pub errors: FieldErrors,
    pub error: Option<String>,
    pub locations: Vec<LocationOption>,
}

#[derive(Template, WebTemplate)]
#[template(path = "brewers/delete.html")]
pub struct BrewerDeleteTemplate {
    pub id: i64,
    pub name: String,
    pub beer_count: usize,
}

/// Which form screen is being rendered.
#[derive(Debug, Clone, Copy)]
enum Screen {
    Create,
    Edit(i64),
}

impl Screen {
    fn title(self) -> &'static str {
        match self {
            Screen::Create => "Add brewer",
            Screen::Edit(_) => "Edit brewer",
        }
    }

    fn action(self) -> String {
        match self {
            Screen::Create => "/brewer/create".to_string(),
            Screen::Edit(id) => format!("/brewer/edit/{id}"),
        }
    }
}

async fn render_form(
    st: &AppState,
    screen: Screen,
    form: BrewerForm,
    errors: FieldErrors,
    error: Option<String>,
) -> Result<Response, PageError> {
    let locations = st.brewer_service.list_locations().await?;

    Ok(BrewerEditTemplate {
        title: screen.title(),
        action: screen.action(),
        locations: form.location_options(&locations),
        form,
        errors,
        error,
    }
    .into_response())
}

/// Splits a failed save into form errors, or passes it on as a page error.
fn form_failure(err: AppError) -> Result<(FieldErrors, Option<String>), PageError> {
    match &err {
        AppError::Validation { .. } | AppError::Conflict { .. } => {
            let mut errors = FieldErrors::default();
            match err.field() {
                Some(field) => {
                    errors.insert(field, err.message());
                    Ok((errors, None))
                }
                None => Ok((errors, Some(err.message().to_string()))),
            }
        }
        _ => Err(PageError(err)),
    }
}

fn back_to_index(flash: (axum::http::HeaderName, String)) -> Response {
    (AppendHeaders([flash]), Redirect::to("/brewer")).into_response()
}

/// Redirects the site root to the brewer list.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler() -> Redirect {
    Redirect::to("/brewer")
}

/// Lists brewers with their total turnover.
///
/// # Endpoint
///
/// `GET /brewer`, `GET /brewer/index`
///
/// Public. Flash messages left by a previous action are shown once and
/// their cookies cleared. Edit and delete links are only rendered for
/// administrators.
pub async fn index_handler(
    State(st): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let flash = Flash::from_headers(&headers);
    let overview = st.brewer_service.list_brewers().await?;
    let is_admin = current_role(&st, &headers).await == Some(Role::Admin);

    let page = BrewerIndexTemplate {
        brewers: overview.brewers.iter().map(BrewerRow::from).collect(),
        total_turnover: format_number(overview.total_turnover),
        is_admin,
        flash: flash.clone(),
    };

    Ok((AppendHeaders(flash.clear_headers()), page).into_response())
}

/// `GET /brewer/create`
pub async fn create_page(State(st): State<AppState>) -> Result<Response, PageError> {
    render_form(
        &st,
        Screen::Create,
        BrewerForm::default(),
        FieldErrors::default(),
        None,
    )
    .await
}

/// Stores a new brewer.
///
/// # Endpoint
///
/// `POST /brewer/create`
///
/// Invalid input re-renders the form with its messages; nothing is stored.
pub async fn create_submit(
    State(st): State<AppState>,
    Form(form): Form<BrewerForm>,
) -> Result<Response, PageError> {
    let draft = match form.to_draft() {
        Ok(draft) => draft,
        Err(errors) => return render_form(&st, Screen::Create, form, errors, None).await,
    };

    match st.brewer_service.create_brewer(draft).await {
        Ok(brewer) => Ok(back_to_index(flash::message(&format!(
            "You successfully added brewer {}.",
            brewer.name()
        )))),
        Err(e) => {
            let (errors, error) = form_failure(e)?;
            render_form(&st, Screen::Create, form, errors, error).await
        }
    }
}

/// `GET /brewer/edit/{id}`
pub async fn edit_page(
    State(st): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, PageError> {
    let brewer = st.brewer_service.get_brewer(id).await?;

    render_form(
        &st,
        Screen::Edit(id),
        BrewerForm::from(&brewer),
        FieldErrors::default(),
        None,
    )
    .await
}

/// Applies the form to an existing brewer.
///
/// # Endpoint
///
/// `POST /brewer/edit/{id}`
///
/// A rejected field leaves the stored brewer untouched and re-renders the
/// form with the selected location preserved.
pub async fn edit_submit(
    State(st): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<BrewerForm>,
) -> Result<Response, PageError> {
    let draft = match form.to_draft() {
        Ok(draft) => draft,
        Err(errors) => return render_form(&st, Screen::Edit(id), form, errors, None).await,
    };

    match st.brewer_service.update_brewer(id, draft).await {
        Ok(brewer) => Ok(back_to_index(flash::message(&format!(
            "You successfully updated brewer {}.",
            brewer.name()
        )))),
        Err(e) => {
            let (errors, error) = form_failure(e)?;
            render_form(&st, Screen::Edit(id), form, errors, error).await
        }
    }
}

/// `GET /brewer/delete/{id}`
pub async fn delete_page(
    State(st): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, PageError> {
    let brewer = st.brewer_service.get_brewer(id).await?;

    Ok(BrewerDeleteTemplate {
        id,
        name: brewer.name().to_string(),
        beer_count: brewer.beer_count(),
    }
    .into_response())
}

/// Deletes a brewer and its beers.
///
/// # Endpoint
///
/// `POST /brewer/delete/{id}`
///
/// Always redirects to the index; a failure, an unknown brewer included, is
/// reported through the error flash instead of an error page.
pub async fn delete_submit(State(st): State<AppState>, Path(id): Path<i64>) -> Response {
    match st.brewer_service.delete_brewer(id).await {
        Ok(brewer) => back_to_index(flash::message(&format!(
            "You successfully deleted brewer {}.",
            brewer.name()
        ))),
        Err(e) => {
            tracing::warn!(brewer_id = id, error = %e, "Brewer not deleted");
            let name = st
                .brewer_service
                .get_brewer(id)
                .await
                .map(|b| format!("brewer {}", b.name()))
                .unwrap_or_else(|_| "the brewer".to_string());
            back_to_index(flash::error(&format!(
                "Sorry, something went wrong, {name} was not deleted..."
            )))
        }
    }
}

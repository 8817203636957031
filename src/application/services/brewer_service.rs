//! Brewer management service.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{Beer, Brewer, BrewerDraft, Location, total_turnover};
use crate::domain::repositories::{BrewerRepository, LocationRepository};
use crate::error::AppError;

/// Brewers ordered by name, with the sum of their turnovers.
#[derive(Debug, Clone)]
pub struct BrewerOverview {
    pub brewers: Vec<Brewer>,
    pub total_turnover: i64,
}

/// Service orchestrating brewer screens and API calls.
///
/// Loads aggregates from the repositories, mutates them only through the
/// entity's validating methods, and stores the result. Entity failures are
/// returned as [`AppError`]s so the web layer can render them on the form.
pub struct BrewerService {
    brewers: Arc<dyn BrewerRepository>,
    locations: Arc<dyn LocationRepository>,
}

impl BrewerService {
    /// Creates a new brewer service.
    pub fn new(brewers: Arc<dyn BrewerRepository>, locations: Arc<dyn LocationRepository>) -> Self {
        Self { brewers, locations }
    }

    /// Lists all brewers ordered by name, with the total turnover.
    ///
    /// An unset turnover counts as zero.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_brewers(&self) -> Result<BrewerOverview, AppError> {
        let mut brewers = self.brewers.find_all().await?;
        brewers.sort_by(|a, b| a.name().cmp(b.name()));
        let total_turnover = total_turnover(&brewers);

        Ok(BrewerOverview {
            brewers,
            total_turnover,
        })
    }

    /// Retrieves a brewer by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the brewer does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_brewer(&self, id: i64) -> Result<Brewer, AppError> {
        self.brewers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Brewer not found", json!({"id": id})))
    }

    /// Creates a brewer from form values.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a field is invalid or the postal
    /// code is unknown.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_brewer(&self, draft: BrewerDraft) -> Result<Brewer, AppError> {
        let location = self.resolve_location(draft.postal_code.as_deref()).await?;

        let brewer = Brewer::builder(draft.name)
            .street(draft.street)
            .location(location)
            .contact_email(draft.contact_email)
            .date_established(draft.date_established)
            .description(draft.description)
            .turnover(draft.turnover)
            .build()?;

        let created = self.brewers.create(&brewer).await?;
        tracing::info!(brewer_id = created.id(), name = created.name(), "Brewer created");

        Ok(created)
    }

    /// Applies form values to an existing brewer and stores it.
    ///
    /// Nothing is stored if any field is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the brewer does not exist.
    /// Returns [`AppError::Validation`] if a field is invalid or the postal
    /// code is unknown.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_brewer(&self, id: i64, draft: BrewerDraft) -> Result<Brewer, AppError> {
        let mut brewer = self.get_brewer(id).await?;
        let location = self.resolve_location(draft.postal_code.as_deref()).await?;

        brewer.apply(draft, location)?;

        let saved = self.brewers.save(&brewer).await?;
        tracing::info!(brewer_id = id, name = saved.name(), "Brewer updated");

        Ok(saved)
    }

    /// Deletes a brewer together with its beers.
    ///
    /// Returns the deleted brewer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the brewer does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_brewer(&self, id: i64) -> Result<Brewer, AppError> {
        let brewer = self.get_brewer(id).await?;
        self.brewers.delete(id).await?;
        tracing::info!(brewer_id = id, name = brewer.name(), "Brewer deleted");

        Ok(brewer)
    }

    /// Adds a beer to a brewer and stores it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the brewer does not exist.
    /// Returns [`AppError::Conflict`] if the brewer already has a beer by that name.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn add_beer(
        &self,
        brewer_id: i64,
        name: String,
        alcohol_by_volume: Option<f64>,
        description: Option<String>,
    ) -> Result<Beer, AppError> {
        let mut brewer = self.get_brewer(brewer_id).await?;
        brewer.add_beer(name.clone(), alcohol_by_volume, description)?;

        let saved = self.brewers.save(&brewer).await?;
        tracing::info!(brewer_id, beer = %name, "Beer added");

        saved.get_beer_by_name(&name).cloned().ok_or_else(|| {
            AppError::internal("Beer missing after save", json!({"beer": name}))
        })
    }

    /// Removes a beer from a brewer and stores it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the brewer does not exist or has no
    /// beer with that ID.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_beer(&self, brewer_id: i64, beer_id: i64) -> Result<(), AppError> {
        let mut brewer = self.get_brewer(brewer_id).await?;
        let beer = brewer.get_beer_by_id(beer_id).cloned().ok_or_else(|| {
            AppError::not_found(
                "Beer not found",
                json!({"brewer_id": brewer_id, "beer_id": beer_id}),
            )
        })?;

        brewer.delete_beer(&beer)?;
        self.brewers.save(&brewer).await?;
        tracing::info!(brewer_id, beer_id, "Beer deleted");

        Ok(())
    }

    /// Lists all locations ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_locations(&self) -> Result<Vec<Location>, AppError> {
        let mut locations = self.locations.find_all().await?;
        locations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(locations)
    }

    /// Resolves an optional postal code to its location.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the postal code is unknown.
    async fn resolve_location(&self, postal_code: Option<&str>) -> Result<Option<Location>, AppError> {
        let Some(postal_code) = postal_code.map(str::trim).filter(|pc| !pc.is_empty()) else {
            return Ok(None);
        };

        match self.locations.find_by_postal_code(postal_code).await? {
            Some(location) => Ok(Some(location)),
            None => Err(AppError::bad_request(
                "Unknown postal code",
                json!({"field": "postal_code", "postal_code": postal_code}),
            )),
        }
    }
}

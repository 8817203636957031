//! Brewer aggregate: field validation and the owned beer collection.
//!
//! Every mutation goes through a validating method that fails fast, and every
//! construction path ([`Brewer::new`], [`BrewerBuilder::build`],
//! [`Brewer::apply`]) runs those same methods, so an invalid brewer cannot be
//! observed.

use chrono::{Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use super::{Beer, EntityError, Location};

/// Maximum length of a brewer name, in characters.
pub const NAME_MAX_LEN: usize = 50;

/// Contact email pattern. The whole value must match.
pub static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,4}$").unwrap()
});

/// A brewery and the beers it brews.
#[derive(Debug, Clone, PartialEq)]
pub struct Brewer {
    id: i64,
    name: String,
    pub description: Option<String>,
    contact_email: Option<String>,
    date_established: Option<NaiveDate>,
    pub street: Option<String>,
    pub location: Option<Location>,
    turnover: Option<i32>,
    beers: Vec<Beer>,
}

impl Brewer {
    /// Creates an unsaved brewer with an empty beer collection.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::Validation`] if `name` is blank or too long.
    pub fn new(name: impl Into<String>) -> Result<Self, EntityError> {
        let mut brewer = Self {
            id: 0,
            name: String::new(),
            description: None,
            contact_email: None,
            date_established: None,
            street: None,
            location: None,
            turnover: None,
            beers: Vec::new(),
        };
        brewer.set_name(name)?;
        Ok(brewer)
    }

    /// Creates an unsaved brewer at the given address.
    pub fn with_location(
        name: impl Into<String>,
        location: Option<Location>,
        street: Option<String>,
    ) -> Result<Self, EntityError> {
        let mut brewer = Self::new(name)?;
        brewer.location = location;
        brewer.street = street;
        Ok(brewer)
    }

    /// Starts a builder that validates every field on [`BrewerBuilder::build`].
    pub fn builder(name: impl Into<String>) -> BrewerBuilder {
        BrewerBuilder::new(name)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Assigns the identity handed out by the store.
    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    /// Returns true until the store has assigned an identity.
    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// # Errors
    ///
    /// Returns [`EntityError::Validation`] if the name is blank or longer than
    /// [`NAME_MAX_LEN`] characters.
    pub fn set_name(&mut self, value: impl Into<String>) -> Result<(), EntityError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(EntityError::validation("name", "A brewer must have a name"));
        }
        if value.chars().count() > NAME_MAX_LEN {
            return Err(EntityError::validation(
                "name",
                format!("Name of brewer must not exceed {NAME_MAX_LEN} characters"),
            ));
        }
        self.name = value;
        Ok(())
    }

    pub fn contact_email(&self) -> Option<&str> {
        self.contact_email.as_deref()
    }

    /// Sets or clears the contact email.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::Validation`] if a value is given that does not
    /// match [`EMAIL_REGEX`].
    pub fn set_contact_email(&mut self, value: Option<String>) -> Result<(), EntityError> {
        if let Some(email) = &value
            && !EMAIL_REGEX.is_match(email)
        {
            return Err(EntityError::validation(
                "contact_email",
                "Email address is not valid",
            ));
        }
        self.contact_email = value;
        Ok(())
    }

    pub fn date_established(&self) -> Option<NaiveDate> {
        self.date_established
    }

    /// Sets or clears the founding date.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::Validation`] if the date lies after today
    /// (local calendar date).
    pub fn set_date_established(&mut self, value: Option<NaiveDate>) -> Result<(), EntityError> {
        self.set_date_established_as_of(value, Local::now().date_naive())
    }

    fn set_date_established_as_of(
        &mut self,
        value: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<(), EntityError> {
        if value.is_some_and(|date| date > today) {
            return Err(EntityError::validation(
                "date_established",
                "Date established must be in the past",
            ));
        }
        self.date_established = value;
        Ok(())
    }

    pub fn turnover(&self) -> Option<i32> {
        self.turnover
    }

    /// Sets or clears the yearly turnover.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::Validation`] if the value is negative.
    pub fn set_turnover(&mut self, value: Option<i32>) -> Result<(), EntityError> {
        if value.is_some_and(|t| t < 0) {
            return Err(EntityError::validation(
                "turnover",
                "Turnover must be positive",
            ));
        }
        self.turnover = value;
        Ok(())
    }

    pub fn beers(&self) -> &[Beer] {
        &self.beers
    }

    pub fn beer_count(&self) -> usize {
        self.beers.len()
    }

    /// Adds a new beer to the collection and returns it.
    ///
    /// The returned reference lets the caller assign an identity once the
    /// beer is stored.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::Duplicate`] if a beer with the same name
    /// (case-sensitive) already belongs to this brewer.
    pub fn add_beer(
        &mut self,
        name: impl Into<String>,
        alcohol_by_volume: Option<f64>,
        description: Option<String>,
    ) -> Result<&mut Beer, EntityError> {
        let mut beer = Beer::new(name);
        beer.alcohol_by_volume = alcohol_by_volume;
        beer.description = description;
        self.insert_beer(beer)
    }

    fn insert_beer(&mut self, beer: Beer) -> Result<&mut Beer, EntityError> {
        if self.get_beer_by_name(beer.name()).is_some() {
            return Err(EntityError::Duplicate {
                brewer: self.name.clone(),
                beer: beer.name().to_string(),
            });
        }
        let index = self.beers.len();
        self.beers.push(beer);
        Ok(&mut self.beers[index])
    }

    /// Removes a beer from the collection and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::NotOwned`] if `beer` is not part of this
    /// brewer's collection; the collection is left unchanged.
    pub fn delete_beer(&mut self, beer: &Beer) -> Result<Beer, EntityError> {
        match self.beers.iter().position(|b| b == beer) {
            Some(index) => Ok(self.beers.remove(index)),
            None => Err(EntityError::NotOwned {
                brewer: self.name.clone(),
                beer: beer.name().to_string(),
            }),
        }
    }

    pub fn get_beer_by_id(&self, id: i64) -> Option<&Beer> {
        self.beers.iter().find(|b| b.id() == id)
    }

    pub fn get_beer_by_name(&self, name: &str) -> Option<&Beer> {
        self.beers.iter().find(|b| b.name() == name)
    }

    /// Applies edited field values.
    ///
    /// Either every field is applied or, on the first failing field, none
    /// is. The beer collection and identity are untouched.
    ///
    /// `draft.postal_code` is not read; the caller resolves it to `location`.
    pub fn apply(
        &mut self,
        draft: BrewerDraft,
        location: Option<Location>,
    ) -> Result<(), EntityError> {
        let mut next = self.clone();
        next.set_name(draft.name)?;
        next.street = draft.street;
        next.location = location;
        next.set_contact_email(draft.contact_email)?;
        next.set_date_established(draft.date_established)?;
        next.description = draft.description;
        next.set_turnover(draft.turnover)?;
        *self = next;
        Ok(())
    }
}

/// Sums turnovers, counting an unset turnover as zero.
pub fn total_turnover(brewers: &[Brewer]) -> i64 {
    brewers
        .iter()
        .filter_map(Brewer::turnover)
        .map(i64::from)
        .sum()
}

/// Editable brewer fields as entered on the create/edit form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrewerDraft {
    pub name: String,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub contact_email: Option<String>,
    pub date_established: Option<NaiveDate>,
    pub description: Option<String>,
    pub turnover: Option<i32>,
}

impl From<&Brewer> for BrewerDraft {
    fn from(brewer: &Brewer) -> Self {
        Self {
            name: brewer.name.clone(),
            street: brewer.street.clone(),
            postal_code: brewer.location.as_ref().map(|l| l.postal_code.clone()),
            contact_email: brewer.contact_email.clone(),
            date_established: brewer.date_established,
            description: brewer.description.clone(),
            turnover: brewer.turnover,
        }
    }
}

/// Builds a [`Brewer`] through the same validating setters used for edits.
///
/// Used when rebuilding stored rows and when creating brewers from forms.
#[derive(Debug, Clone)]
pub struct BrewerBuilder {
    id: i64,
    name: String,
    description: Option<String>,
    contact_email: Option<String>,
    date_established: Option<NaiveDate>,
    street: Option<String>,
    location: Option<Location>,
    turnover: Option<i32>,
    beers: Vec<Beer>,
}

impl BrewerBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: None,
            contact_email: None,
            date_established: None,
            street: None,
            location: None,
            turnover: None,
            beers: Vec::new(),
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn contact_email(mut self, contact_email: Option<String>) -> Self {
        self.contact_email = contact_email;
        self
    }

    pub fn date_established(mut self, date_established: Option<NaiveDate>) -> Self {
        self.date_established = date_established;
        self
    }

    pub fn street(mut self, street: Option<String>) -> Self {
        self.street = street;
        self
    }

    pub fn location(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    pub fn turnover(mut self, turnover: Option<i32>) -> Self {
        self.turnover = turnover;
        self
    }

    pub fn beer(mut self, beer: Beer) -> Self {
        self.beers.push(beer);
        self
    }

    pub fn beers(mut self, beers: impl IntoIterator<Item = Beer>) -> Self {
        self.beers.extend(beers);
        self
    }

    /// # Errors
    ///
    /// Returns the first [`EntityError`] raised by a field setter, or
    /// [`EntityError::Duplicate`] if two beers share a name.
    pub fn build(self) -> Result<Brewer, EntityError> {
        let mut brewer = Brewer::new(self.name)?;
        brewer.id = self.id;
        brewer.description = self.description;
        brewer.set_contact_email(self.contact_email)?;
        brewer.set_date_established(self.date_established)?;
        brewer.street = self.street;
        brewer.location = self.location;
        brewer.set_turnover(self.turnover)?;
        for beer in self.beers {
            brewer.insert_beer(beer)?;
        }
        Ok(brewer)
    }
}

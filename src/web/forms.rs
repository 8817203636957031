//! Form models for the brewer screens.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::num::IntErrorKind;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::entities::{Brewer, BrewerDraft, EMAIL_REGEX, Location};

fn validate_required_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("A brewer must have a name")));
    }
    Ok(())
}

/// Values posted by the create and edit screens.
///
/// Every field arrives as text; blank inputs become `None`. Date and
/// turnover are parsed in [`BrewerForm::to_draft`] so a malformed value is
/// reported on the form instead of rejecting the request.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BrewerForm {
    #[serde(default)]
    #[validate(custom(function = "validate_required_name"))]
    #[validate(length(max = 50, message = "Name of brewer must not exceed 50 characters"))]
    pub name: String,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub street: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub postal_code: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(regex(path = "*EMAIL_REGEX", message = "Email address is not valid"))]
    pub contact_email: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub date_established: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub description: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub turnover: Option<String>,
}

impl From<&Brewer> for BrewerForm {
    fn from(brewer: &Brewer) -> Self {
        Self {
            name: brewer.name().to_string(),
            street: brewer.street.clone(),
            postal_code: brewer.location.as_ref().map(|l| l.postal_code.clone()),
            contact_email: brewer.contact_email().map(str::to_string),
            date_established: brewer
                .date_established()
                .map(|d| d.format("%Y-%m-%d").to_string()),
            description: brewer.description.clone(),
            turnover: brewer.turnover().map(|t| t.to_string()),
        }
    }
}

impl BrewerForm {
    /// Checks the form and converts it into entity input.
    ///
    /// # Errors
    ///
    /// Returns every failing field with its message.
    pub fn to_draft(&self) -> Result<BrewerDraft, FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::default(),
            Err(e) => FieldErrors::from(&e),
        };

        let date_established = match self.date_established.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.insert("date_established", "Date established is not a valid date");
                    None
                }
            },
        };

        let turnover = match self.turnover.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<i32>() {
                Ok(value) if value < 0 => {
                    errors.insert("turnover", "Turnover must be positive");
                    None
                }
                Ok(value) => Some(value),
                Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                    errors.insert("turnover", "Turnover is too large");
                    None
                }
                Err(_) => {
                    errors.insert("turnover", "Turnover must be a whole number");
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(BrewerDraft {
            name: self.name.clone(),
            street: self.street.clone(),
            postal_code: self.postal_code.clone(),
            contact_email: self.contact_email.clone(),
            date_established,
            description: self.description.clone(),
            turnover,
        })
    }

    /// Entries for the location select list, keeping the posted choice.
    pub fn location_options(&self, locations: &[Location]) -> Vec<LocationOption> {
        locations
            .iter()
            .map(|location| LocationOption {
                postal_code: location.postal_code.clone(),
                label: location.to_string(),
                selected: self.postal_code.as_deref() == Some(location.postal_code.as_str()),
            })
            .collect()
    }
}

/// One `<option>` of the location select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationOption {
    pub postal_code: String,
    pub label: String,
    pub selected: bool,
}

/// Error messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Keeps the first message reported for a field.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut fields = FieldErrors::default();
        for (field, failures) in errors.field_errors() {
            for failure in failures {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is not valid"));
                fields.insert(&field, message);
            }
        }
        fields
    }
}

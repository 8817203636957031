//! Location reference entity.

use std::fmt;

/// A municipality identified by its postal code.
///
/// Brewers reference a location; they never own it. Name constraints
/// (required, at most 50 characters) are enforced by the `location` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub postal_code: String,
    pub name: String,
}

impl Location {
    pub fn new(postal_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            postal_code: postal_code.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.postal_code, self.name)
    }
}

//! DTOs for the brewer, beer and location endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::BrewerOverview;
use crate::domain::entities::{Beer, Brewer, Location};

#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub postal_code: String,
    pub name: String,
}

impl From<&Location> for LocationResponse {
    fn from(location: &Location) -> Self {
        Self {
            postal_code: location.postal_code.clone(),
            name: location.name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BeerResponse {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alcohol_by_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Beer> for BeerResponse {
    fn from(beer: &Beer) -> Self {
        Self {
            id: beer.id(),
            name: beer.name().to_string(),
            alcohol_by_volume: beer.alcohol_by_volume,
            description: beer.description.clone(),
        }
    }
}

/// A brewer with its beers.
///
/// Unset optional fields are serialized as `null`.
#[derive(Debug, Serialize)]
pub struct BrewerResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub date_established: Option<NaiveDate>,
    pub street: Option<String>,
    pub location: Option<LocationResponse>,
    pub turnover: Option<i32>,
    pub beer_count: usize,
    pub beers: Vec<BeerResponse>,
}

impl From<&Brewer> for BrewerResponse {
    fn from(brewer: &Brewer) -> Self {
        Self {
            id: brewer.id(),
            name: brewer.name().to_string(),
            description: brewer.description.clone(),
            contact_email: brewer.contact_email().map(str::to_string),
            date_established: brewer.date_established(),
            street: brewer.street.clone(),
            location: brewer.location.as_ref().map(LocationResponse::from),
            turnover: brewer.turnover(),
            beer_count: brewer.beer_count(),
            beers: brewer.beers().iter().map(BeerResponse::from).collect(),
        }
    }
}

/// Response for `GET /api/brewers`.
#[derive(Debug, Serialize)]
pub struct BrewerListResponse {
    /// Sum of all turnovers; unset counts as zero.
    pub total_turnover: i64,
    pub items: Vec<BrewerResponse>,
}

impl From<&BrewerOverview> for BrewerListResponse {
    fn from(overview: &BrewerOverview) -> Self {
        Self {
            total_turnover: overview.total_turnover,
            items: overview.brewers.iter().map(BrewerResponse::from).collect(),
        }
    }
}

/// Request body for `POST /api/brewers/{id}/beers`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBeerRequest {
    #[validate(length(min = 1, max = 100, message = "Beer name must be 1 to 100 characters"))]
    pub name: String,

    /// Percentage, 0 to 100.
    #[validate(range(min = 0.0, max = 100.0))]
    pub alcohol_by_volume: Option<f64>,

    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixtures;

    #[test]
    fn test_brewer_response_shape() {
        let fixtures = Fixtures::new();
        let json = serde_json::to_value(BrewerResponse::from(&fixtures.bavik)).unwrap();

        assert_eq!(json["name"], "Bavik");
        assert_eq!(json["beer_count"], 2);
        assert_eq!(json["location"]["postal_code"], "8531");
        assert_eq!(json["beers"][0]["name"], "Bavik Pils");
        assert_eq!(json["beers"][0]["alcohol_by_volume"], 5.2);
        assert!(json["beers"][0].get("description").is_none());
    }

    #[test]
    fn test_create_beer_request_validation() {
        let request = CreateBeerRequest {
            name: String::new(),
            alcohol_by_volume: Some(150.0),
            description: None,
        };

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("alcohol_by_volume"));

        let request = CreateBeerRequest {
            name: "Duvel".to_string(),
            alcohol_by_volume: Some(8.5),
            description: None,
        };
        assert!(request.validate().is_ok());
    }
}

//! Errors raised by domain entities when an invariant would be violated.

/// Failure raised synchronously by an entity operation.
///
/// Entities never recover from these; callers decide how to present them
/// (form errors on the web screens, JSON errors on the API).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityError {
    /// A field value violates one of its documented constraints.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// A beer with the same name already belongs to the brewer.
    #[error("Brewer {brewer} has already a beer by the name of {beer}")]
    Duplicate { brewer: String, beer: String },

    /// The beer is not part of the brewer's collection.
    #[error("{beer} is not a {brewer} beer")]
    NotOwned { brewer: String, beer: String },
}

impl EntityError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Machine-readable kind, used in API error details.
    pub fn kind(&self) -> &'static str {
        match self {
            EntityError::Validation { .. } => "validation",
            EntityError::Duplicate { .. } => "duplicate",
            EntityError::NotOwned { .. } => "not_owned",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = EntityError::Duplicate {
            brewer: "Bavik".to_string(),
            beer: "Bavik Pils".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Brewer Bavik has already a beer by the name of Bavik Pils"
        );
        assert_eq!(err.kind(), "duplicate");

        let err = EntityError::NotOwned {
            brewer: "Bavik".to_string(),
            beer: "Duvel".to_string(),
        };
        assert_eq!(err.to_string(), "Duvel is not a Bavik beer");
        assert_eq!(err.kind(), "not_owned");
    }

    #[test]
    fn test_validation_constructor() {
        let err = EntityError::validation("turnover", "Turnover must be positive");
        assert_eq!(err.to_string(), "Turnover must be positive");
        assert!(matches!(err, EntityError::Validation { field: "turnover", .. }));
    }
}

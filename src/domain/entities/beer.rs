//! Beer entity, always owned by a single brewer.

/// A beer brewed by a [`super::Brewer`].
///
/// Name uniqueness is a property of the owning brewer's collection, so the
/// name is fixed at construction. Only the brewer hands out new beers.
#[derive(Debug, Clone, PartialEq)]
pub struct Beer {
    id: i64,
    name: String,
    pub alcohol_by_volume: Option<f64>,
    pub description: Option<String>,
}

impl Beer {
    /// Creates an unsaved beer (id 0).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            alcohol_by_volume: None,
            description: None,
        }
    }

    /// Rebuilds a stored beer.
    pub fn with_id(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            ..Self::new(name)
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Assigns the identity handed out by the store.
    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true until the store has assigned an identity.
    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}

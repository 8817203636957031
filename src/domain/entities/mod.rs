//! Core domain entities.
//!
//! Unlike plain row structs, these entities guard their own invariants: every
//! mutation runs through a validating method and reports an [`EntityError`].
//!
//! # Entity Types
//!
//! - [`Brewer`] - A brewery; owns its [`Beer`]s and references a [`Location`]
//! - [`Beer`] - A beer, unique by name within its brewer
//! - [`Location`] - A municipality identified by postal code
//!
//! [`BrewerDraft`] carries edited form values into [`Brewer::apply`].

pub mod beer;
pub mod brewer;
pub mod error;
pub mod location;

pub use beer::Beer;
pub use brewer::{Brewer, BrewerBuilder, BrewerDraft, EMAIL_REGEX, NAME_MAX_LEN, total_turnover};
pub use error::EntityError;
pub use location::Location;

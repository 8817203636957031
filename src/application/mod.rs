//! Application layer services implementing the controller logic.
//!
//! Services coordinate repository calls and entity operations and provide a
//! clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::brewer_service::BrewerService`] - Brewer and beer management
//! - [`services::auth_service::AuthService`] - Token authentication and roles

pub mod services;

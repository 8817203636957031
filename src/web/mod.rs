//! Web layer for the browser-based admin screens.
//!
//! Server-rendered HTML using Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`cookies`] - Cookie header parsing and `Set-Cookie` values
//! - [`flash`] - One-shot messages carried across redirects
//! - [`forms`] - Brewer form model and field errors
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Admin-only access check
//! - [`routes`] - Screen route configuration

pub mod cookies;
pub mod flash;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod routes;

//! Middleware for the admin screens.

pub mod web_auth;

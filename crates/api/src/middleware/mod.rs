//! Request extractors that act as middleware.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.

pub mod auth;

//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the verified caller from a Bearer token.

pub mod auth;

use std::sync::Arc;

use crate::auth::IdentityVerifier;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. Created at startup, closed after shutdown.
    pub pool: actify_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Verifies bearer tokens for protected routes.
    pub verifier: Arc<dyn IdentityVerifier>,
}

use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// Mount the banner and health check routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::banner))
        .route("/health", get(health::health_check))
}

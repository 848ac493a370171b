use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Owner-scoped event routes, mounted at `/events`.
///
/// ```text
/// GET    /        list_events (auth)
/// POST   /        create_event (auth)
/// PATCH  /{id}    update_event (auth)
/// ```
pub fn owner_router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list_events).post(events::create_event))
        .route("/{id}", patch(events::update_event))
}

/// Public catalog routes, mounted at the root.
///
/// ```text
/// GET    /event/{id}         get_event
/// GET    /upcoming-events    list_upcoming
/// GET    /search             search_events
/// ```
pub fn catalog_router() -> Router<AppState> {
    Router::new()
        .route("/event/{id}", get(events::get_event))
        .route("/upcoming-events", get(events::list_upcoming))
        .route("/search", get(events::search_events))
}

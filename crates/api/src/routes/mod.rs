pub mod events;
pub mod health;
pub mod joined_events;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                   list (auth), register
///
/// /events                  list own (auth), create (auth)
/// /events/{id}             replace own (auth)
///
/// /event/{id}              get one
/// /upcoming-events         today and later
/// /search                  future events by title and type
///
/// /joined-event            list own enriched (auth), join
/// /joined-event/{id}       participations for an event
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/events", events::owner_router())
        .nest("/joined-event", joined_events::router())
        .merge(events::catalog_router())
}

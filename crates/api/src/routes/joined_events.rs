use axum::routing::get;
use axum::Router;

use crate::handlers::joined_events;
use crate::state::AppState;

/// Routes mounted at `/joined-event`.
///
/// ```text
/// GET    /        list_joined (auth)
/// POST   /        create_joined
/// GET    /{id}    list_participants
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(joined_events::list_joined).post(joined_events::create_joined),
        )
        .route("/{id}", get(joined_events::list_participants))
}

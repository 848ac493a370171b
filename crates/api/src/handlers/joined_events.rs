//! Handlers for event participation.

use actify_core::access::scope_or_self;
use actify_core::validation::validate_input;
use actify_db::models::participation::{CreateParticipation, JoinedEventParams};
use actify_db::repositories::ParticipationRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /joined-event
///
/// The caller's participations, each with its full event, soonest first.
/// `?email=` defaults to the caller and may not name anyone else.
pub async fn list_joined(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<JoinedEventParams>,
) -> AppResult<impl IntoResponse> {
    let email = scope_or_self(&auth.email, params.email.as_deref())?;

    let joined = ParticipationRepo::list_enriched_for_user(&state.pool, email).await?;

    Ok(Json(DataResponse { data: joined }))
}

/// POST /joined-event
///
/// Record a participation. Joining the same event twice is a 409.
pub async fn create_joined(
    State(state): State<AppState>,
    Json(input): Json<CreateParticipation>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    let participation = ParticipationRepo::create(&state.pool, &input).await?;

    tracing::info!(
        participation_id = participation.id,
        user = %participation.user_email,
        event_ref = %participation.event_id,
        "Participation recorded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: participation })))
}

/// GET /joined-event/{id}
///
/// Raw participations that reference event `id`.
pub async fn list_participants(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let participations = ParticipationRepo::list_by_event(&state.pool, &event_id).await?;

    Ok(Json(DataResponse {
        data: participations,
    }))
}

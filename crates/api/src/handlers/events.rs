//! Handlers for events.
//!
//! Owner-scoped routes (`GET /events?email=`, `POST /events`,
//! `PATCH /events/{id}`) check the caller against the scope before touching
//! storage. The catalog routes (`/event/{id}`, `/upcoming-events`,
//! `/search`) are public.

use actify_core::access::{authorize, authorize_owner};
use actify_core::error::CoreError;
use actify_core::schedule::start_of_today;
use actify_core::search::SearchCriteria;
use actify_db::models::event::{EventInput, EventListParams, EventSearchParams};
use actify_db::repositories::EventRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use super::parse_event_id;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Owner-scoped
// ---------------------------------------------------------------------------

/// GET /events
///
/// List events by date. `?email=` restricts to one owner and must be the
/// caller's own email.
pub async fn list_events(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> AppResult<impl IntoResponse> {
    authorize(&auth.email, params.email.as_deref())?;

    let events = EventRepo::list(&state.pool, params.email.as_deref()).await?;

    Ok(Json(DataResponse { data: events }))
}

/// POST /events
///
/// Create an event owned by the caller. The body's `email` must be the
/// caller's own email.
pub async fn create_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<EventInput>,
) -> AppResult<impl IntoResponse> {
    authorize(&auth.email, Some(&input.owner_email))?;
    let fields = input.into_fields()?;

    let event = EventRepo::create(&state.pool, &fields).await?;

    tracing::info!(event_id = event.id, owner = %event.owner_email, "Event created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// PATCH /events/{id}
///
/// Replace every mutable field of an event the caller owns. The body's
/// `email` must also be the caller, so ownership cannot be handed to
/// another identity.
pub async fn update_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<EventInput>,
) -> AppResult<impl IntoResponse> {
    let event_id = parse_event_id(&raw_id)?;
    authorize(&auth.email, Some(&input.owner_email))?;
    let fields = input.into_fields()?;

    match EventRepo::replace_owned(&state.pool, event_id, &auth.email, &fields).await? {
        Some(event) => {
            tracing::info!(event_id, owner = %auth.email, "Event updated");
            Ok(Json(DataResponse { data: event }))
        }
        None => {
            // Distinguish "not yours" from "not there".
            let existing = EventRepo::find_by_id(&state.pool, event_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Event",
                    id: event_id,
                }))?;
            authorize_owner(&auth.email, &existing.owner_email)?;

            // Ownership changed between the two statements.
            Err(AppError::Core(CoreError::Conflict(
                "Event was modified concurrently; retry".into(),
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// Public catalog
// ---------------------------------------------------------------------------

/// GET /event/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let event_id = parse_event_id(&raw_id)?;

    let event = EventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))?;

    Ok(Json(DataResponse { data: event }))
}

/// GET /upcoming-events
///
/// Events dated today (UTC) or later, soonest first.
pub async fn list_upcoming(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let events = EventRepo::list_upcoming(&state.pool, start_of_today()).await?;

    Ok(Json(DataResponse { data: events }))
}

/// GET /search
///
/// Future events whose title contains `?eventTitle=` and whose type contains
/// `?eventType=`, case-insensitively. Either filter may be omitted.
pub async fn search_events(
    State(state): State<AppState>,
    Query(params): Query<EventSearchParams>,
) -> AppResult<impl IntoResponse> {
    let criteria = SearchCriteria::new(params.title.as_deref(), params.event_type.as_deref());

    let events = EventRepo::search(&state.pool, &criteria, start_of_today()).await?;

    Ok(Json(DataResponse { data: events }))
}

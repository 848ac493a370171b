//! Handlers for user registration and lookup.

use actify_core::validation::validate_input;
use actify_db::models::user::{CreateUser, UserListParams};
use actify_db::repositories::UserRepo;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Reported when a registration repeats an existing email.
pub const ALREADY_EXISTS_MESSAGE: &str = "User is already exists";

/// GET /users
///
/// List users, optionally filtered by `?email=`. Requires authentication.
pub async fn list_users(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<UserListParams>,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list(&state.pool, params.email.as_deref()).await?;

    tracing::debug!(caller = %auth.email, count = users.len(), "Listed users");

    Ok(Json(DataResponse { data: users }))
}

/// POST /users
///
/// Register a user. Registering an email that already exists is not an
/// error: nothing is inserted and a message says so.
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<Response> {
    validate_input(&input)?;

    match UserRepo::create_if_absent(&state.pool, &input).await? {
        Some(user) => {
            tracing::info!(user_id = user.id, email = %user.email, "User registered");
            Ok((StatusCode::CREATED, Json(DataResponse { data: user })).into_response())
        }
        None => {
            tracing::debug!(email = %input.email, "Registration for existing user ignored");
            Ok(Json(MessageResponse {
                message: ALREADY_EXISTS_MESSAGE,
            })
            .into_response())
        }
    }
}

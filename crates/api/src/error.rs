use actify_core::error::CoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Error returned by handlers and the auth extractor.
///
/// Rendered as `{ "error": <message>, "code": <CODE> }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request input caught at the boundary, such as a path id.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Message for every failure the client cannot act on.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// PostgreSQL `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// A failure reduced to what the client sees.
struct Rendered {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl Rendered {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            INTERNAL_MESSAGE,
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let rendered = match self {
            AppError::Core(core) => render_core(core),
            AppError::Database(err) => render_storage(&err),
            AppError::BadRequest(msg) => Rendered::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
        };

        let body = json!({
            "error": rendered.message,
            "code": rendered.code,
        });

        (rendered.status, axum::Json(body)).into_response()
    }
}

fn render_core(err: CoreError) -> Rendered {
    match err {
        CoreError::Unauthorized(msg) => Rendered::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
        CoreError::Forbidden(msg) => Rendered::new(StatusCode::FORBIDDEN, "FORBIDDEN", msg),
        CoreError::NotFound { entity, id } => Rendered::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => {
            Rendered::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
        }
        CoreError::Conflict(msg) => Rendered::new(StatusCode::CONFLICT, "CONFLICT", msg),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            Rendered::internal()
        }
    }
}

/// Storage failures are 500s, except unique violations on the constraints
/// clients can trip, which become 409s naming what already exists.
fn render_storage(err: &sqlx::Error) -> Rendered {
    if let sqlx::Error::Database(db_err) = err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            if let Some(message) = db_err.constraint().and_then(conflict_message) {
                return Rendered::new(StatusCode::CONFLICT, "CONFLICT", message);
            }
        }
    }

    tracing::error!(error = %err, "Storage operation failed");
    Rendered::internal()
}

/// Client-facing message for a violated uniqueness constraint.
fn conflict_message(constraint: &str) -> Option<&'static str> {
    match constraint {
        "uq_joined_events_user_event" => Some("User has already joined this event"),
        _ => None,
    }
}

pub mod events;
pub mod health;
pub mod joined_events;
pub mod users;

use actify_core::event_ref::EventRef;
use actify_core::types::DbId;

use crate::error::{AppError, AppResult};

/// Parse an event id from a path segment.
///
/// Malformed ids are rejected here, before any storage call, as 400.
pub(crate) fn parse_event_id(raw: &str) -> AppResult<DbId> {
    EventRef::parse(raw)
        .id()
        .ok_or_else(|| AppError::BadRequest(format!("Invalid event id '{raw}'")))
}

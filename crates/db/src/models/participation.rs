//! Participation (joined event) model and DTOs.

use actify_core::enrollment::EventReference;
use actify_core::event_ref::EventRef;
use actify_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::event::Event;

/// A row from the `joined_events` table.
///
/// `event_id` is the stored text reference; see [`EventRef`] for how it is
/// resolved against `events.id`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Participation {
    pub id: DbId,
    pub user_email: String,
    #[serde(rename = "eventId")]
    pub event_id: String,
    pub created_at: Timestamp,
}

impl EventReference for Participation {
    fn participation_id(&self) -> DbId {
        self.id
    }

    fn event_ref(&self) -> EventRef {
        EventRef::parse(&self.event_id)
    }
}

/// Body for `POST /joined-event`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateParticipation {
    #[serde(alias = "userEmail")]
    #[validate(email)]
    pub user_email: String,
    #[serde(rename = "eventId")]
    #[validate(length(min = 1, max = 64, message = "must be 1-64 characters"))]
    pub event_id: String,
}

/// A participation flattened together with the event it references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedEvent {
    pub id: DbId,
    pub user_email: String,
    pub event: Event,
}

impl From<(Participation, Event)> for JoinedEvent {
    fn from((participation, event): (Participation, Event)) -> Self {
        Self {
            id: participation.id,
            user_email: participation.user_email,
            event,
        }
    }
}

/// Query parameters for `GET /joined-event`.
#[derive(Debug, Deserialize)]
pub struct JoinedEventParams {
    pub email: Option<String>,
}

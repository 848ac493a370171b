//! Event entity model and DTOs.
//!
//! JSON field names follow the web client (`eventTitle`, `eventDate`, ...);
//! the owner is carried as `email`.

use actify_core::enrollment::ScheduledEvent;
use actify_core::error::CoreError;
use actify_core::schedule::parse_event_date;
use actify_core::types::{DbId, Timestamp};
use actify_core::validation::validate_input;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `events` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    #[serde(rename = "eventTitle")]
    pub title: String,
    #[serde(rename = "eventDescription")]
    pub description: Option<String>,
    #[serde(rename = "eventType")]
    pub event_type: String,
    #[serde(rename = "eventImageUrl")]
    pub image_url: Option<String>,
    #[serde(rename = "eventLocation")]
    pub location: Option<String>,
    #[serde(rename = "eventDate")]
    pub event_date: Timestamp,
    #[serde(rename = "eventStartTime")]
    pub start_time: Option<String>,
    #[serde(rename = "eventEndTime")]
    pub end_time: Option<String>,
    #[serde(rename = "email")]
    pub owner_email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ScheduledEvent for Event {
    fn event_id(&self) -> DbId {
        self.id
    }

    fn event_date(&self) -> Timestamp {
        self.event_date
    }
}

/// Body for `POST /events` and `PATCH /events/{id}`.
///
/// PATCH replaces every mutable field, so both routes take the same shape.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EventInput {
    #[serde(rename = "eventTitle")]
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: String,
    #[serde(rename = "eventDescription", default)]
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(rename = "eventType")]
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub event_type: String,
    #[serde(rename = "eventImageUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "eventLocation", default)]
    pub location: Option<String>,
    #[serde(rename = "eventDate")]
    pub event_date: String,
    #[serde(rename = "eventStartTime", default)]
    pub start_time: Option<String>,
    #[serde(rename = "eventEndTime", default)]
    pub end_time: Option<String>,
    #[serde(rename = "email")]
    #[validate(email)]
    pub owner_email: String,
}

impl EventInput {
    /// Validate the payload and normalize it for storage.
    ///
    /// The date string becomes a [`Timestamp`] so listings can compare and
    /// sort on it.
    pub fn into_fields(self) -> Result<EventFields, CoreError> {
        validate_input(&self)?;
        let event_date = parse_event_date(&self.event_date)?;

        Ok(EventFields {
            title: self.title,
            description: self.description,
            event_type: self.event_type,
            image_url: self.image_url,
            location: self.location,
            event_date,
            start_time: self.start_time,
            end_time: self.end_time,
            owner_email: self.owner_email,
        })
    }
}

/// Validated, normalized event fields ready to insert or overwrite.
#[derive(Debug, Clone)]
pub struct EventFields {
    pub title: String,
    pub description: Option<String>,
    pub event_type: String,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub event_date: Timestamp,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub owner_email: String,
}

/// Query parameters for `GET /events`.
#[derive(Debug, Deserialize)]
pub struct EventListParams {
    pub email: Option<String>,
}

/// Query parameters for `GET /search`.
#[derive(Debug, Deserialize)]
pub struct EventSearchParams {
    #[serde(rename = "eventTitle")]
    pub title: Option<String>,
    #[serde(rename = "eventType")]
    pub event_type: Option<String>,
}

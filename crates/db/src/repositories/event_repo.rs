//! Repository for the `events` table.
//!
//! Every listing orders by `event_date`, then `id`, so callers get a stable
//! order even when several events share a date.

use actify_core::search::SearchCriteria;
use actify_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::event::{Event, EventFields};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, event_type, image_url, location, event_date, \
                       start_time, end_time, owner_email, created_at, updated_at";

/// Provides CRUD and listing operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning the created row.
    pub async fn create(pool: &PgPool, input: &EventFields) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events
                (title, description, event_type, image_url, location,
                 event_date, start_time, end_time, owner_email)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.event_type)
            .bind(&input.image_url)
            .bind(&input.location)
            .bind(input.event_date)
            .bind(&input.start_time)
            .bind(&input.end_time)
            .bind(&input.owner_email)
            .fetch_one(pool)
            .await
    }

    /// Find an event by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every event whose ID is in `ids`. Missing IDs are simply absent
    /// from the result.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Event>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM events WHERE id = ANY($1) ORDER BY event_date, id"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List events, optionally restricted to one owner.
    pub async fn list(pool: &PgPool, owner_email: Option<&str>) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE ($1::text IS NULL OR owner_email = $1)
             ORDER BY event_date, id"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(owner_email)
            .fetch_all(pool)
            .await
    }

    /// Events dated on or after `cutoff`.
    pub async fn list_upcoming(pool: &PgPool, cutoff: Timestamp) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE event_date >= $1
             ORDER BY event_date, id"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(cutoff)
            .fetch_all(pool)
            .await
    }

    /// Events dated strictly after `cutoff` that match `criteria`.
    ///
    /// Title and type filters are case-insensitive substring matches; an
    /// unset filter matches everything.
    pub async fn search(
        pool: &PgPool,
        criteria: &SearchCriteria,
        cutoff: Timestamp,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE event_date > $1
               AND ($2::text IS NULL OR title ILIKE $2)
               AND ($3::text IS NULL OR event_type ILIKE $3)
             ORDER BY event_date, id"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(cutoff)
            .bind(criteria.title_pattern())
            .bind(criteria.event_type_pattern())
            .fetch_all(pool)
            .await
    }

    /// Overwrite every mutable field of an event, but only if it is
    /// currently owned by `owner_email`.
    ///
    /// Returns `None` if no event with `id` is owned by `owner_email`. The
    /// ownership check and the write are a single statement.
    pub async fn replace_owned(
        pool: &PgPool,
        id: DbId,
        owner_email: &str,
        input: &EventFields,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = $3,
                description = $4,
                event_type = $5,
                image_url = $6,
                location = $7,
                event_date = $8,
                start_time = $9,
                end_time = $10,
                owner_email = $11,
                updated_at = NOW()
             WHERE id = $1 AND owner_email = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(owner_email)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.event_type)
            .bind(&input.image_url)
            .bind(&input.location)
            .bind(input.event_date)
            .bind(&input.start_time)
            .bind(&input.end_time)
            .bind(&input.owner_email)
            .fetch_optional(pool)
            .await
    }
}

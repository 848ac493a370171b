//! Repository for the `joined_events` table and the enrollment join.

use actify_core::enrollment::{enrich, referenced_ids, EventReference};
use actify_core::event_ref::EventRef;
use sqlx::PgPool;

use crate::models::participation::{CreateParticipation, JoinedEvent, Participation};
use crate::repositories::EventRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_email, event_id, created_at";

/// Provides creation, listing, and enrichment of participations.
pub struct ParticipationRepo;

impl ParticipationRepo {
    /// Record that a user joined an event.
    ///
    /// The reference is stored in [`EventRef::canonical`] form, so a second
    /// join of the same event under any spelling violates
    /// `uq_joined_events_user_event`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateParticipation,
    ) -> Result<Participation, sqlx::Error> {
        let query = format!(
            "INSERT INTO joined_events (user_email, event_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participation>(&query)
            .bind(&input.user_email)
            .bind(EventRef::canonical(&input.event_id))
            .fetch_one(pool)
            .await
    }

    /// Raw participations referencing `event_id`, compared in canonical form.
    pub async fn list_by_event(
        pool: &PgPool,
        event_id: &str,
    ) -> Result<Vec<Participation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM joined_events WHERE event_id = $1 ORDER BY id");
        sqlx::query_as::<_, Participation>(&query)
            .bind(EventRef::canonical(event_id))
            .fetch_all(pool)
            .await
    }

    /// Raw participations of one user.
    pub async fn list_by_user(
        pool: &PgPool,
        user_email: &str,
    ) -> Result<Vec<Participation>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM joined_events WHERE user_email = $1 ORDER BY id");
        sqlx::query_as::<_, Participation>(&query)
            .bind(user_email)
            .fetch_all(pool)
            .await
    }

    /// A user's participations, each flattened with its event, ordered by
    /// event date.
    ///
    /// References that do not resolve to a stored event are left out.
    pub async fn list_enriched_for_user(
        pool: &PgPool,
        user_email: &str,
    ) -> Result<Vec<JoinedEvent>, sqlx::Error> {
        let participations = Self::list_by_user(pool, user_email).await?;

        for p in &participations {
            if let EventRef::Unresolved(raw) = p.event_ref() {
                tracing::debug!(
                    participation_id = p.id,
                    event_ref = %raw,
                    "Skipping unresolvable event reference",
                );
            }
        }

        let ids = referenced_ids(&participations);
        let events = EventRepo::find_by_ids(pool, &ids).await?;

        let joined: Vec<JoinedEvent> = enrich(participations, events)
            .into_iter()
            .map(JoinedEvent::from)
            .collect();

        Ok(joined)
    }
}

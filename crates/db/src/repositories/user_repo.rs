//! Repository for the `users` table.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, profile, created_at, updated_at";

/// Provides registration and lookup for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user unless one with the same email already exists.
    ///
    /// Returns `None` when the email is already registered. The check and
    /// the insert are one statement, so concurrent registrations of the same
    /// email still produce a single row.
    pub async fn create_if_absent(
        pool: &PgPool,
        input: &CreateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, profile)
             VALUES ($1, $2)
             ON CONFLICT (email) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(Json(input.profile_fields()))
            .fetch_optional(pool)
            .await
    }

    /// List users, optionally restricted to one email, oldest first.
    pub async fn list(pool: &PgPool, email: Option<&str>) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE ($1::text IS NULL OR email = $1)
             ORDER BY id"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_all(pool)
            .await
    }
}

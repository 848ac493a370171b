//! User entity model and DTOs.

use actify_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// Keys the server owns. They are stripped from a registration body before
/// the rest is stored as the opaque profile.
const RESERVED_PROFILE_KEYS: &[&str] = &["id", "_id", "email", "created_at", "updated_at"];

/// Full row from the `users` table.
///
/// Profile fields are opaque to the server; they are stored as JSONB and
/// flattened back into the serialized user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    #[serde(flatten)]
    pub profile: Json<Map<String, Value>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Registration body for `POST /users`.
///
/// `email` is the only field the server interprets; everything else is
/// kept verbatim.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(email)]
    pub email: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl CreateUser {
    /// Profile fields to persist, without server-owned keys.
    pub fn profile_fields(&self) -> Map<String, Value> {
        self.profile
            .iter()
            .filter(|(k, _)| !RESERVED_PROFILE_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Query parameters for `GET /users`.
#[derive(Debug, Deserialize)]
pub struct UserListParams {
    pub email: Option<String>,
}

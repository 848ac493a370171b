//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` input DTO for the matching route body

pub mod event;
pub mod participation;
pub mod user;

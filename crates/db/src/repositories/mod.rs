//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Repositories do no access
//! control; ownership checks happen in the API layer before they are called.

pub mod event_repo;
pub mod participation_repo;
pub mod user_repo;

pub use event_repo::EventRepo;
pub use participation_repo::ParticipationRepo;
pub use user_repo::UserRepo;

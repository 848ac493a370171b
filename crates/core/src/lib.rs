//! Domain logic for the Actify event backend.
//!
//! Everything in this crate is free of I/O: ownership checks, event
//! reference resolution, day-window and search predicates, and the
//! enrollment join. The `db` and `api` crates compose these with storage
//! and HTTP.

pub mod access;
pub mod enrollment;
pub mod error;
pub mod event_ref;
pub mod schedule;
pub mod search;
pub mod types;
pub mod validation;

//! Typed form of a participation's event reference.
//!
//! Participations store the event they point at as free text (`event_id
//! TEXT`), while events are keyed by [`DbId`]. Before joining, the text is
//! resolved here. Text that cannot name an event key becomes
//! [`EventRef::Unresolved`] and is skipped by the join rather than failing it.

use std::fmt;

use crate::types::DbId;

/// A participation's reference to an event, after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventRef {
    /// The text is a valid event key.
    Resolved(DbId),
    /// The text can never match an event key (not a positive integer).
    Unresolved(String),
}

impl EventRef {
    /// Resolve stored reference text into an event key.
    ///
    /// Surrounding whitespace is ignored. Only positive integers that fit in
    /// a [`DbId`] resolve; BIGSERIAL keys start at 1. Unresolved text is kept
    /// trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use actify_core::event_ref::EventRef;
    /// assert_eq!(EventRef::parse("42"), EventRef::Resolved(42));
    /// assert_eq!(EventRef::parse(" 7 "), EventRef::Resolved(7));
    /// assert!(EventRef::parse("65f1c0ffee").id().is_none());
    /// ```
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<DbId>() {
            Ok(id) if id > 0 => EventRef::Resolved(id),
            _ => EventRef::Unresolved(raw.to_string()),
        }
    }

    /// The canonical text to store for `raw`.
    ///
    /// Every spelling of the same key (`"1"`, `"01"`, `" 1 "`) maps to one
    /// string, so the `(user_email, event_id)` uniqueness constraint and
    /// exact-match lookups see a single value per event.
    ///
    /// ```
    /// use actify_core::event_ref::EventRef;
    /// assert_eq!(EventRef::canonical(" 007 "), "7");
    /// ```
    pub fn canonical(raw: &str) -> String {
        Self::parse(raw).to_string()
    }

    /// The resolved key, if any.
    pub fn id(&self) -> Option<DbId> {
        match self {
            EventRef::Resolved(id) => Some(*id),
            EventRef::Unresolved(_) => None,
        }
    }
}

impl fmt::Display for EventRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventRef::Resolved(id) => write!(f, "{id}"),
            EventRef::Unresolved(raw) => write!(f, "{raw}"),
        }
    }
}

//! The enrollment join: attach full event detail to each participation.
//!
//! Participations and events live in separate tables linked only by the
//! participation's free-text event reference. [`enrich`] performs the join in
//! memory once both sides have been loaded:
//!
//! 1. Resolve each participation's reference into an [`EventRef`].
//! 2. Look up the resolved key among the loaded events.
//! 3. Emit one pair per match. Unresolved and dangling references are
//!    dropped, never reported as errors.
//! 4. Sort by event date ascending, then participation id ascending.
//!
//! The output depends only on the inputs, so repeated calls over unchanged
//! data return identical results in identical order.

use std::collections::{BTreeSet, HashMap};

use crate::event_ref::EventRef;
use crate::types::{DbId, Timestamp};

/// A record that points at an event through a stored reference.
pub trait EventReference {
    fn participation_id(&self) -> DbId;
    fn event_ref(&self) -> EventRef;
}

/// A record that can be the target of an [`EventReference`].
pub trait ScheduledEvent {
    fn event_id(&self) -> DbId;
    fn event_date(&self) -> Timestamp;
}

/// Distinct resolved keys referenced by `participations`, ascending.
///
/// Used to fetch exactly the events the join needs in one query.
pub fn referenced_ids<P: EventReference>(participations: &[P]) -> Vec<DbId> {
    participations
        .iter()
        .filter_map(|p| p.event_ref().id())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Join participations to events. See the module docs for the exact rules.
pub fn enrich<P, E>(participations: Vec<P>, events: Vec<E>) -> Vec<(P, E)>
where
    P: EventReference,
    E: ScheduledEvent + Clone,
{
    let by_id: HashMap<DbId, E> = events.into_iter().map(|e| (e.event_id(), e)).collect();

    let mut joined: Vec<(P, E)> = participations
        .into_iter()
        .filter_map(|p| {
            let event = p.event_ref().id().and_then(|id| by_id.get(&id))?.clone();
            Some((p, event))
        })
        .collect();

    joined.sort_by(|(pa, ea), (pb, eb)| {
        ea.event_date()
            .cmp(&eb.event_date())
            .then_with(|| pa.participation_id().cmp(&pb.participation_id()))
    });

    joined
}

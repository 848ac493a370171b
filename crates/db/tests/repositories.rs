//! Integration tests for the repository layer against a real database.
//!
//! These need a PostgreSQL server reachable through `DATABASE_URL`; run them
//! with `cargo test -p actify-db -- --ignored`.
//!
//! - Idempotent user registration
//! - Upcoming / search day-window filtering
//! - Owner-guarded event replacement
//! - Enrollment join (dangling and unresolvable references, ordering)
//! - Participation uniqueness

use actify_core::schedule::{is_searchable, is_upcoming, start_of_today};
use actify_core::search::SearchCriteria;
use actify_db::models::event::EventFields;
use actify_db::models::participation::CreateParticipation;
use actify_db::models::user::CreateUser;
use actify_db::repositories::{EventRepo, ParticipationRepo, UserRepo};
use chrono::Duration;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_event(title: &str, event_type: &str, days_from_today: i64, owner: &str) -> EventFields {
    EventFields {
        title: title.to_string(),
        description: None,
        event_type: event_type.to_string(),
        image_url: None,
        location: None,
        event_date: start_of_today() + Duration::days(days_from_today) + Duration::hours(10),
        start_time: Some("10:00".to_string()),
        end_time: None,
        owner_email: owner.to_string(),
    }
}

fn new_user(email: &str) -> CreateUser {
    serde_json::from_value(serde_json::json!({ "email": email, "name": "Tester" })).unwrap()
}

fn join(user: &str, event_id: &str) -> CreateParticipation {
    CreateParticipation {
        user_email: user.to_string(),
        event_id: event_id.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn registering_twice_stores_one_user(pool: PgPool) {
    let first = UserRepo::create_if_absent(&pool, &new_user("a@x.com"))
        .await
        .unwrap();
    let second = UserRepo::create_if_absent(&pool, &new_user("a@x.com"))
        .await
        .unwrap();

    assert!(first.is_some());
    assert!(second.is_none());

    let all = UserRepo::list(&pool, Some("a@x.com")).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].profile.0.get("name").unwrap(), "Tester");
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn upcoming_and_search_respect_the_day_window(pool: PgPool) {
    let yesterday = EventRepo::create(&pool, &new_event("Beach Cleanup", "Env", -1, "a@x.com"))
        .await
        .unwrap();
    let tomorrow = EventRepo::create(&pool, &new_event("Beach Cleanup", "Env", 1, "a@x.com"))
        .await
        .unwrap();
    let mut midnight = new_event("Midnight Run", "Sports", 0, "a@x.com");
    midnight.event_date = start_of_today();
    let midnight = EventRepo::create(&pool, &midnight).await.unwrap();

    let cutoff = start_of_today();

    let upcoming = EventRepo::list_upcoming(&pool, cutoff).await.unwrap();
    let ids: Vec<_> = upcoming.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![midnight.id, tomorrow.id]);
    assert!(upcoming.iter().all(|e| is_upcoming(e.event_date, cutoff)));

    let criteria = SearchCriteria::new(Some("beach"), None);
    let found = EventRepo::search(&pool, &criteria, cutoff).await.unwrap();
    let ids: Vec<_> = found.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![tomorrow.id]);
    assert!(!ids.contains(&yesterday.id));
    assert!(found
        .iter()
        .all(|e| is_searchable(e.event_date, cutoff) && criteria.matches(&e.title, &e.event_type)));

    // The SQL window and the Rust predicates agree on every stored event.
    let all = EventRepo::list(&pool, None).await.unwrap();
    let expected_upcoming: Vec<_> = all
        .iter()
        .filter(|e| is_upcoming(e.event_date, cutoff))
        .map(|e| e.id)
        .collect();
    assert_eq!(upcoming.iter().map(|e| e.id).collect::<Vec<_>>(), expected_upcoming);

    let everything = EventRepo::search(&pool, &SearchCriteria::default(), cutoff)
        .await
        .unwrap();
    let expected_searchable: Vec<_> = all
        .iter()
        .filter(|e| is_searchable(e.event_date, cutoff))
        .map(|e| e.id)
        .collect();
    assert_eq!(everything.iter().map(|e| e.id).collect::<Vec<_>>(), expected_searchable);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn search_treats_wildcards_literally(pool: PgPool) {
    EventRepo::create(&pool, &new_event("Save 50% today", "Sale", 2, "a@x.com"))
        .await
        .unwrap();
    EventRepo::create(&pool, &new_event("Save 500 today", "Sale", 2, "a@x.com"))
        .await
        .unwrap();

    let found = EventRepo::search(
        &pool,
        &SearchCriteria::new(Some("50%"), None),
        start_of_today(),
    )
    .await
    .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Save 50% today");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn search_keeps_surrounding_spaces_in_the_needle(pool: PgPool) {
    EventRepo::create(&pool, &new_event("Sunny beach day", "Env", 2, "a@x.com"))
        .await
        .unwrap();
    EventRepo::create(&pool, &new_event("Sunbeach Festival", "Env", 2, "a@x.com"))
        .await
        .unwrap();

    let found = EventRepo::search(
        &pool,
        &SearchCriteria::new(Some(" beach"), None),
        start_of_today(),
    )
    .await
    .unwrap();
    let titles: Vec<_> = found.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Sunny beach day"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn list_filters_by_owner_and_sorts_by_date(pool: PgPool) {
    let later = EventRepo::create(&pool, &new_event("Later", "T", 5, "a@x.com"))
        .await
        .unwrap();
    let sooner = EventRepo::create(&pool, &new_event("Sooner", "T", 1, "a@x.com"))
        .await
        .unwrap();
    EventRepo::create(&pool, &new_event("Other", "T", 3, "b@x.com"))
        .await
        .unwrap();

    let mine = EventRepo::list(&pool, Some("a@x.com")).await.unwrap();
    let ids: Vec<_> = mine.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![sooner.id, later.id]);

    let all = EventRepo::list(&pool, None).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn replace_owned_only_touches_owned_events(pool: PgPool) {
    let event = EventRepo::create(&pool, &new_event("Beach Cleanup", "Env", 1, "a@x.com"))
        .await
        .unwrap();
    let patch = new_event("Beach Cleanup II", "Env", 2, "a@x.com");

    let denied = EventRepo::replace_owned(&pool, event.id, "b@x.com", &patch)
        .await
        .unwrap();
    assert!(denied.is_none());
    let unchanged = EventRepo::find_by_id(&pool, event.id).await.unwrap().unwrap();
    assert_eq!(unchanged.title, "Beach Cleanup");

    let updated = EventRepo::replace_owned(&pool, event.id, "a@x.com", &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Beach Cleanup II");
    assert_eq!(updated.event_date, patch.event_date);
}

// ---------------------------------------------------------------------------
// Participations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn enrichment_joins_sorts_and_drops_dangling(pool: PgPool) {
    let late = EventRepo::create(&pool, &new_event("Late", "T", 9, "o@x.com"))
        .await
        .unwrap();
    let early = EventRepo::create(&pool, &new_event("Early", "T", 1, "o@x.com"))
        .await
        .unwrap();

    ParticipationRepo::create(&pool, &join("a@x.com", &late.id.to_string()))
        .await
        .unwrap();
    ParticipationRepo::create(&pool, &join("a@x.com", &early.id.to_string()))
        .await
        .unwrap();
    ParticipationRepo::create(&pool, &join("a@x.com", "999999"))
        .await
        .unwrap();
    ParticipationRepo::create(&pool, &join("a@x.com", "6563b1f2a9d3c0e4b5a6f7e8"))
        .await
        .unwrap();
    ParticipationRepo::create(&pool, &join("b@x.com", &early.id.to_string()))
        .await
        .unwrap();

    let joined = ParticipationRepo::list_enriched_for_user(&pool, "a@x.com")
        .await
        .unwrap();
    let titles: Vec<_> = joined.iter().map(|j| j.event.title.as_str()).collect();
    assert_eq!(titles, vec!["Early", "Late"]);
    assert!(joined.iter().all(|j| j.user_email == "a@x.com"));

    let again = ParticipationRepo::list_enriched_for_user(&pool, "a@x.com")
        .await
        .unwrap();
    assert_eq!(joined, again);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_join_violates_unique_constraint(pool: PgPool) {
    ParticipationRepo::create(&pool, &join("a@x.com", "1"))
        .await
        .unwrap();
    let err = ParticipationRepo::create(&pool, &join("a@x.com", "1"))
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_joined_events_user_event"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn alternate_spellings_of_an_event_id_are_one_join(pool: PgPool) {
    let event = EventRepo::create(&pool, &new_event("Beach Cleanup", "Env", 1, "o@x.com"))
        .await
        .unwrap();
    let canonical = event.id.to_string();

    let stored = ParticipationRepo::create(&pool, &join("a@x.com", &format!("0{canonical}")))
        .await
        .unwrap();
    assert_eq!(stored.event_id, canonical);

    for spelling in [canonical.clone(), format!(" {canonical} "), format!("00{canonical}")] {
        let err = ParticipationRepo::create(&pool, &join("a@x.com", &spelling))
            .await
            .unwrap_err();
        match err {
            sqlx::Error::Database(db_err) => {
                assert_eq!(db_err.constraint(), Some("uq_joined_events_user_event"));
            }
            other => panic!("expected a database error for {spelling:?}, got {other:?}"),
        }
    }

    let joined = ParticipationRepo::list_enriched_for_user(&pool, "a@x.com")
        .await
        .unwrap();
    assert_eq!(joined.len(), 1);

    let by_event = ParticipationRepo::list_by_event(&pool, &format!("0{canonical}"))
        .await
        .unwrap();
    assert_eq!(by_event.len(), 1);
    assert_eq!(by_event[0].id, stored.id);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn list_by_event_returns_raw_rows(pool: PgPool) {
    ParticipationRepo::create(&pool, &join("a@x.com", "42"))
        .await
        .unwrap();
    ParticipationRepo::create(&pool, &join("b@x.com", "42"))
        .await
        .unwrap();
    ParticipationRepo::create(&pool, &join("c@x.com", "43"))
        .await
        .unwrap();

    let rows = ParticipationRepo::list_by_event(&pool, "42").await.unwrap();
    let users: Vec<_> = rows.iter().map(|r| r.user_email.as_str()).collect();
    assert_eq!(users, vec!["a@x.com", "b@x.com"]);
}

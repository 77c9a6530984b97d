//! Integration tests for the `notifications_sent` dedup ledger.

use chrono::NaiveDate;
use gobarber_db::repositories::NotificationLedgerRepo;
use sqlx::SqlitePool;

const EVENT: &str = "daily_summary";

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// Test: marking the aggregate event twice writes a single row
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_sent_is_idempotent_for_aggregate_events(pool: SqlitePool) {
    let today = day(2024, 6, 1);

    let first = NotificationLedgerRepo::mark_sent(&pool, EVENT, None, today)
        .await
        .unwrap();
    let second = NotificationLedgerRepo::mark_sent(&pool, EVENT, None, today)
        .await
        .unwrap();

    assert!(first);
    assert!(!second, "second insert for the same key must be ignored");

    let rows = NotificationLedgerRepo::list_for_event(&pool, EVENT)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].client_id, None);
    assert_eq!(rows[0].date, today);

    assert!(NotificationLedgerRepo::was_sent_on(&pool, EVENT, today)
        .await
        .unwrap());
}

// ---------------------------------------------------------------------------
// Test: per-client keys are independent of the aggregate key
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_scoped_rows_are_distinct(pool: SqlitePool) {
    let today = day(2024, 6, 1);

    assert!(NotificationLedgerRepo::mark_sent(&pool, "birthday_today", Some(1), today)
        .await
        .unwrap());
    assert!(NotificationLedgerRepo::mark_sent(&pool, "birthday_today", Some(2), today)
        .await
        .unwrap());
    assert!(NotificationLedgerRepo::mark_sent(&pool, "birthday_today", None, today)
        .await
        .unwrap());
    assert!(!NotificationLedgerRepo::mark_sent(&pool, "birthday_today", Some(1), today)
        .await
        .unwrap());

    let rows = NotificationLedgerRepo::list_for_event(&pool, "birthday_today")
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
}

// ---------------------------------------------------------------------------
// Test: was_sent_on is scoped to the calendar day
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn was_sent_on_only_matches_the_same_day(pool: SqlitePool) {
    NotificationLedgerRepo::mark_sent(&pool, EVENT, None, day(2024, 5, 31))
        .await
        .unwrap();

    assert!(!NotificationLedgerRepo::was_sent_on(&pool, EVENT, day(2024, 6, 1))
        .await
        .unwrap());
    assert!(NotificationLedgerRepo::was_sent_on(&pool, EVENT, day(2024, 5, 31))
        .await
        .unwrap());
}

// ---------------------------------------------------------------------------
// Test: most_recent_date returns the latest day for the event type
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn most_recent_date_picks_latest(pool: SqlitePool) {
    assert_eq!(
        NotificationLedgerRepo::most_recent_date(&pool, EVENT)
            .await
            .unwrap(),
        None
    );

    for d in [day(2024, 5, 20), day(2024, 5, 29), day(2024, 5, 25)] {
        NotificationLedgerRepo::mark_sent(&pool, EVENT, None, d)
            .await
            .unwrap();
    }
    NotificationLedgerRepo::mark_sent(&pool, "other", None, day(2024, 6, 1))
        .await
        .unwrap();

    assert_eq!(
        NotificationLedgerRepo::most_recent_date(&pool, EVENT)
            .await
            .unwrap(),
        Some(day(2024, 5, 29))
    );
}

// ---------------------------------------------------------------------------
// Test: retention purge removes only rows before the cutoff
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_older_than_keeps_recent_rows(pool: SqlitePool) {
    for d in [day(2024, 1, 1), day(2024, 3, 1), day(2024, 6, 1)] {
        NotificationLedgerRepo::mark_sent(&pool, EVENT, None, d)
            .await
            .unwrap();
    }

    let deleted = NotificationLedgerRepo::delete_older_than(&pool, day(2024, 3, 1))
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    let rows = NotificationLedgerRepo::list_for_event(&pool, EVENT)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
}

//! Mock-database tests for the bootstrap routine.
//!
//! The queue of mocked results follows the exact query order of
//! `ensure_seeded`: package count, client count, then (when seeding
//! clients) the first-package lookup.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use rtnet_shared::FixedClock;

use super::{BootstrapOutcome, BootstrapRepository};
use crate::entities::internet_packages;

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2026, 7, 15, 8, 0, 0).unwrap(),
    ))
}

fn basic_package() -> internet_packages::Model {
    let now = Utc.with_ymd_and_hms(2026, 7, 15, 8, 0, 0).unwrap();
    internet_packages::Model {
        id: Uuid::new_v4(),
        name: "Basic".to_string(),
        price: dec!(150000),
        speed: "10 Mbps".to_string(),
        description: Some("Basic internet package".to_string()),
        is_active: true,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn warm_database_is_left_untouched() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(4)], vec![count_row(7)]])
        .into_connection();

    let repo = BootstrapRepository::new(db, clock());
    let outcome = repo.ensure_seeded().await.unwrap();

    // Both tables non-empty: nothing inserted, call is a no-op.
    assert_eq!(outcome, BootstrapOutcome::default());
    assert!(!outcome.seeded_anything());
}

#[tokio::test]
async fn empty_database_gets_three_packages_and_two_clients() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(0)], vec![count_row(0)]])
        .append_query_results([vec![basic_package()]])
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 3,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            },
        ])
        .into_connection();

    let repo = BootstrapRepository::new(db, clock());
    let outcome = repo.ensure_seeded().await.unwrap();

    assert_eq!(outcome.packages_seeded, 3);
    assert_eq!(outcome.clients_seeded, 2);
    assert!(outcome.seeded_anything());
}

#[tokio::test]
async fn existing_packages_are_kept_when_seeding_clients() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(5)], vec![count_row(0)]])
        .append_query_results([vec![basic_package()]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 2,
        }])
        .into_connection();

    let repo = BootstrapRepository::new(db, clock());
    let outcome = repo.ensure_seeded().await.unwrap();

    // Packages table already populated: only clients are inserted.
    assert_eq!(outcome.packages_seeded, 0);
    assert_eq!(outcome.clients_seeded, 2);
}

#[tokio::test]
async fn client_seeding_is_skipped_without_any_package() {
    // Package insert reported zero rows and the follow-up lookup finds
    // nothing; starter clients need a package to reference.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(0)], vec![count_row(0)]])
        .append_query_results([Vec::<internet_packages::Model>::new()])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = BootstrapRepository::new(db, clock());
    let outcome = repo.ensure_seeded().await.unwrap();

    assert_eq!(outcome.clients_seeded, 0);
}

//! Mock-database tests for the dashboard snapshot.
//!
//! Mocked result queues follow the exact query order of `snapshot()`:
//! seven counts, current-month payments, recent clients (+ package
//! lookup), open tickets (+ client lookup), unread notifications
//! (+ client lookup), then the revenue-series window.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Value};
use uuid::Uuid;

use rtnet_core::dashboard::DashboardSnapshot;
use rtnet_shared::FixedClock;

use super::DashboardRepository;
use crate::entities::{
    clients, internet_packages, notifications, payments,
    sea_orm_active_enums::{
        ClientStatus, NotificationType, PaymentMethod, TicketPriority, TicketStatus,
    },
    tickets,
};

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

fn clock() -> Arc<FixedClock> {
    // Current period: 2026-07.
    Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2026, 7, 15, 9, 0, 0).unwrap(),
    ))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn package(name: &str, price: Decimal) -> internet_packages::Model {
    let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
    internet_packages::Model {
        id: Uuid::new_v4(),
        name: name.to_string(),
        price,
        speed: "25 Mbps".to_string(),
        description: None,
        is_active: true,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn client(name: &str, package_id: Uuid, status: ClientStatus) -> clients::Model {
    let now = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap();
    clients::Model {
        id: Uuid::new_v4(),
        name: name.to_string(),
        address: "Jl. Mawar No. 1".to_string(),
        phone: "0812-0000-0000".to_string(),
        internet_package_id: package_id,
        installation_date: date(2026, 1, 10),
        status,
        notes: None,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn payment(client_id: Uuid, period: NaiveDate, amount: Decimal) -> payments::Model {
    let now = Utc.with_ymd_and_hms(2026, 7, 5, 0, 0, 0).unwrap();
    payments::Model {
        id: Uuid::new_v4(),
        client_id,
        amount,
        payment_date: period,
        period_month: period,
        payment_method: PaymentMethod::Cash,
        notes: None,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn open_ticket(client_id: Uuid) -> tickets::Model {
    let now = Utc.with_ymd_and_hms(2026, 7, 10, 0, 0, 0).unwrap();
    tickets::Model {
        id: Uuid::new_v4(),
        client_id,
        title: "Connection drops at night".to_string(),
        description: "Link goes down every evening around 8pm".to_string(),
        priority: TicketPriority::High,
        status: TicketStatus::Open,
        resolution: None,
        resolved_at: None,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn unread_notification(client_id: Uuid) -> notifications::Model {
    let now = Utc.with_ymd_and_hms(2026, 7, 12, 0, 0, 0).unwrap();
    notifications::Model {
        id: Uuid::new_v4(),
        client_id,
        title: "Payment Overdue".to_string(),
        message: "Your monthly payment is overdue".to_string(),
        notification_type: NotificationType::PaymentOverdue,
        is_read: false,
        due_date: Some(date(2026, 7, 10)),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn snapshot_assembles_stats_previews_and_series() {
    let pkg = package("Standard", dec!(250000));
    let resolvable = client("Budi Santoso", pkg.id, ClientStatus::Active);
    // References a package ID that no longer resolves.
    let dangling = client("Siti Rahayu", Uuid::new_v4(), ClientStatus::Active);

    let current_month = vec![
        payment(resolvable.id, date(2026, 7, 1), dec!(150000)),
        payment(dangling.id, date(2026, 7, 1), dec!(250000)),
    ];
    let window = vec![
        payment(resolvable.id, date(2026, 7, 1), dec!(150000)),
        payment(dangling.id, date(2026, 7, 1), dec!(250000)),
        payment(resolvable.id, date(2026, 6, 1), dec!(100000)),
    ];

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![count_row(3)],
            vec![count_row(2)],
            vec![count_row(1)],
            vec![count_row(2)],
            vec![count_row(2)],
            vec![count_row(1)],
            vec![count_row(1)],
        ])
        .append_query_results([current_month])
        .append_query_results([vec![resolvable.clone(), dangling.clone()]])
        .append_query_results([vec![pkg.clone()]])
        .append_query_results([vec![open_ticket(resolvable.id)]])
        .append_query_results([vec![resolvable.clone()]])
        .append_query_results([vec![unread_notification(resolvable.id)]])
        .append_query_results([vec![resolvable.clone()]])
        .append_query_results([window])
        .into_connection();

    let snapshot = DashboardRepository::new(db, clock()).snapshot().await;

    // Count identities.
    assert_eq!(snapshot.stats.total_clients, 3);
    assert_eq!(
        snapshot.stats.active_clients + snapshot.stats.inactive_clients,
        snapshot.stats.total_clients
    );
    assert!(snapshot.stats.active_packages <= snapshot.stats.total_packages);
    assert_eq!(snapshot.stats.open_tickets, 1);
    assert_eq!(snapshot.stats.unread_notifications, 1);
    assert_eq!(snapshot.stats.monthly_revenue, dec!(400000));

    // Recent clients: resolvable package attached, dangling one absent
    // but the client still appears.
    assert_eq!(snapshot.recent_clients.len(), 2);
    let with_pkg = &snapshot.recent_clients[0];
    assert_eq!(with_pkg.name, "Budi Santoso");
    assert_eq!(with_pkg.status, "active");
    assert_eq!(with_pkg.package.as_ref().unwrap().name, "Standard");
    let without_pkg = &snapshot.recent_clients[1];
    assert_eq!(without_pkg.name, "Siti Rahayu");
    assert!(without_pkg.package.is_none());

    // Ticket and notification previews carry their owning client.
    assert_eq!(snapshot.open_tickets.len(), 1);
    assert_eq!(snapshot.open_tickets[0].status, "open");
    assert_eq!(snapshot.open_tickets[0].priority, "high");
    assert_eq!(
        snapshot.open_tickets[0].client.as_ref().unwrap().name,
        "Budi Santoso"
    );
    assert_eq!(snapshot.recent_notifications.len(), 1);
    assert_eq!(
        snapshot.recent_notifications[0].notification_type,
        "payment_overdue"
    );

    // Series: ascending, grouped, summed across clients.
    let months: Vec<&str> = snapshot
        .monthly_revenue
        .iter()
        .map(|p| p.month.as_str())
        .collect();
    assert_eq!(months, vec!["2026-06", "2026-07"]);
    assert_eq!(snapshot.monthly_revenue[0].total, dec!(100000));
    assert_eq!(snapshot.monthly_revenue[1].total, dec!(400000));
}

#[tokio::test]
async fn zero_payments_in_current_month_reports_zero_revenue() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![count_row(0)],
            vec![count_row(0)],
            vec![count_row(0)],
            vec![count_row(0)],
            vec![count_row(0)],
            vec![count_row(0)],
            vec![count_row(0)],
        ])
        .append_query_results([Vec::<payments::Model>::new()])
        .append_query_results([Vec::<clients::Model>::new()])
        .append_query_results([Vec::<tickets::Model>::new()])
        .append_query_results([Vec::<notifications::Model>::new()])
        .append_query_results([Vec::<payments::Model>::new()])
        .into_connection();

    let snapshot = DashboardRepository::new(db, clock()).snapshot().await;

    assert_eq!(snapshot.stats.monthly_revenue, Decimal::ZERO);
    assert_eq!(snapshot, DashboardSnapshot::empty());
}

#[tokio::test]
async fn unreachable_storage_degrades_to_empty_snapshot() {
    // Seven counts, current-month revenue, three preview base queries,
    // and the series window all fail; relation lookups are skipped.
    let errors: Vec<DbErr> = (0..12)
        .map(|_| DbErr::Custom("connection refused".to_string()))
        .collect();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors(errors)
        .into_connection();

    let snapshot = DashboardRepository::new(db, clock()).snapshot().await;

    assert_eq!(snapshot, DashboardSnapshot::empty());
}

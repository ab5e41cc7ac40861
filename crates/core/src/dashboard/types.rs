//! Dashboard data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Summary counters shown at the top of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Total number of clients.
    pub total_clients: u64,
    /// Clients with status `active`.
    pub active_clients: u64,
    /// Clients with status `inactive`.
    pub inactive_clients: u64,
    /// Total number of internet packages.
    pub total_packages: u64,
    /// Packages currently offered.
    pub active_packages: u64,
    /// Tickets with status `open`.
    pub open_tickets: u64,
    /// Notifications not yet read.
    pub unread_notifications: u64,
    /// Sum of payment amounts for the current calendar month.
    pub monthly_revenue: Decimal,
}

/// Package details attached to a client preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackagePreview {
    /// Package ID.
    pub id: Uuid,
    /// Package name.
    pub name: String,
    /// Monthly price.
    pub price: Decimal,
    /// Speed label.
    pub speed: String,
}

/// A recently created client, with its package when the lookup succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPreview {
    /// Client ID.
    pub id: Uuid,
    /// Client name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Client status (`active` / `inactive`).
    pub status: String,
    /// Installation date.
    pub installation_date: NaiveDate,
    /// The client's package; absent when the reference cannot be resolved.
    pub package: Option<PackagePreview>,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
}

/// Minimal client reference attached to ticket/notification previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRef {
    /// Client ID.
    pub id: Uuid,
    /// Client name.
    pub name: String,
}

/// An open ticket in the dashboard preview list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketPreview {
    /// Ticket ID.
    pub id: Uuid,
    /// Ticket title.
    pub title: String,
    /// Priority (`low` / `medium` / `high` / `urgent`).
    pub priority: String,
    /// Status (always `open` for this preview).
    pub status: String,
    /// The owning client; absent when the lookup fails.
    pub client: Option<ClientRef>,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
}

/// An unread notification in the dashboard preview list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreview {
    /// Notification ID.
    pub id: Uuid,
    /// Notification title.
    pub title: String,
    /// Notification message.
    pub message: String,
    /// Notification type.
    #[serde(rename = "type")]
    pub notification_type: String,
    /// Related due date, if any.
    pub due_date: Option<NaiveDate>,
    /// The owning client; absent when the lookup fails.
    pub client: Option<ClientRef>,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
}

/// One point of the monthly revenue series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenuePoint {
    /// Period label (`YYYY-MM`).
    pub month: String,
    /// Total payment amount for that period.
    pub total: Decimal,
}

/// The full dashboard payload: stats, preview lists, revenue series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Summary counters.
    pub stats: DashboardStats,
    /// Most recently created clients (at most 5).
    pub recent_clients: Vec<ClientPreview>,
    /// Most recently created open tickets (at most 5).
    pub open_tickets: Vec<TicketPreview>,
    /// Most recently created unread notifications (at most 5).
    pub recent_notifications: Vec<NotificationPreview>,
    /// Revenue per period for the last 12 months, ascending.
    pub monthly_revenue: Vec<RevenuePoint>,
}

impl DashboardSnapshot {
    /// The all-zero/empty snapshot returned when storage is unreachable.
    /// The dashboard always renders; it never propagates an error.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

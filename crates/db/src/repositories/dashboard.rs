//! Dashboard repository: statistics snapshot and preview lists.
//!
//! Every sub-computation runs as its own query and degrades independently;
//! the snapshot as a whole never fails. A dashboard request must always
//! render, even with storage partially (or entirely) unavailable.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveEnum, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};
use tracing::warn;
use uuid::Uuid;

use rtnet_core::dashboard::{
    ClientPreview, ClientRef, DashboardSnapshot, DashboardStats, NotificationPreview,
    PackagePreview, RevenuePoint, TicketPreview, monthly_series,
};
use rtnet_shared::{Clock, PeriodMonth};

use crate::entities::{
    clients, internet_packages, notifications, payments,
    sea_orm_active_enums::{ClientStatus, TicketStatus},
    tickets,
};

/// Rows per preview list.
const PREVIEW_LIMIT: u64 = 5;

/// Periods before the current one included in the revenue series
/// (12 periods in total, counting the current month).
const SERIES_MONTHS_BACK: u32 = 11;

/// Repository for dashboard metrics queries.
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct DashboardRepository {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Computes the full dashboard snapshot.
    ///
    /// Never returns an error: every sub-computation that fails degrades
    /// to its empty value (zero count, empty list, missing relation) and
    /// logs a warning. With storage fully unreachable this returns
    /// [`DashboardSnapshot::empty`].
    pub async fn snapshot(&self) -> DashboardSnapshot {
        let current_period = PeriodMonth::from_date(self.clock.today());

        let stats = DashboardStats {
            total_clients: self
                .count_or_zero(clients::Entity::find(), "clients.total")
                .await,
            active_clients: self
                .count_or_zero(
                    clients::Entity::find()
                        .filter(clients::Column::Status.eq(ClientStatus::Active)),
                    "clients.active",
                )
                .await,
            inactive_clients: self
                .count_or_zero(
                    clients::Entity::find()
                        .filter(clients::Column::Status.eq(ClientStatus::Inactive)),
                    "clients.inactive",
                )
                .await,
            total_packages: self
                .count_or_zero(internet_packages::Entity::find(), "packages.total")
                .await,
            active_packages: self
                .count_or_zero(
                    internet_packages::Entity::find()
                        .filter(internet_packages::Column::IsActive.eq(true)),
                    "packages.active",
                )
                .await,
            open_tickets: self
                .count_or_zero(
                    tickets::Entity::find()
                        .filter(tickets::Column::Status.eq(TicketStatus::Open)),
                    "tickets.open",
                )
                .await,
            unread_notifications: self
                .count_or_zero(
                    notifications::Entity::find()
                        .filter(notifications::Column::IsRead.eq(false)),
                    "notifications.unread",
                )
                .await,
            monthly_revenue: self.current_month_revenue(current_period).await,
        };

        DashboardSnapshot {
            stats,
            recent_clients: self.recent_clients().await,
            open_tickets: self.open_ticket_previews().await,
            recent_notifications: self.unread_notification_previews().await,
            monthly_revenue: self.revenue_series(current_period).await,
        }
    }

    // ========================================================================
    // Sub-computations
    // ========================================================================

    /// Sum of payment amounts whose period falls in the current month.
    ///
    /// Zero both when no payments match and when the query errors.
    async fn current_month_revenue(&self, period: PeriodMonth) -> Decimal {
        self.fetch_or_empty(
            payments::Entity::find()
                .filter(payments::Column::PeriodMonth.gte(period.first_day()))
                .filter(payments::Column::PeriodMonth.lt(period.next().first_day())),
            "payments.current_month",
        )
        .await
        .iter()
        .map(|p| p.amount)
        .sum()
    }

    /// Most recently created clients, each with its package when the
    /// lookup resolves.
    async fn recent_clients(&self) -> Vec<ClientPreview> {
        let rows = self
            .fetch_or_empty(
                clients::Entity::find()
                    .order_by_desc(clients::Column::CreatedAt)
                    .limit(PREVIEW_LIMIT),
                "clients.recent",
            )
            .await;
        if rows.is_empty() {
            return Vec::new();
        }

        let package_ids: Vec<Uuid> = rows.iter().map(|c| c.internet_package_id).collect();
        let packages: HashMap<Uuid, internet_packages::Model> = self
            .fetch_or_empty(
                internet_packages::Entity::find()
                    .filter(internet_packages::Column::Id.is_in(package_ids)),
                "clients.recent.packages",
            )
            .await
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        rows.into_iter()
            .map(|client| {
                let package = packages.get(&client.internet_package_id).map(|p| {
                    PackagePreview {
                        id: p.id,
                        name: p.name.clone(),
                        price: p.price,
                        speed: p.speed.clone(),
                    }
                });
                ClientPreview {
                    id: client.id,
                    name: client.name,
                    phone: client.phone,
                    status: client.status.to_value(),
                    installation_date: client.installation_date,
                    package,
                    created_at: client.created_at.into(),
                }
            })
            .collect()
    }

    /// Most recently created open tickets, each with its owning client
    /// when the lookup resolves.
    async fn open_ticket_previews(&self) -> Vec<TicketPreview> {
        let rows = self
            .fetch_or_empty(
                tickets::Entity::find()
                    .filter(tickets::Column::Status.eq(TicketStatus::Open))
                    .order_by_desc(tickets::Column::CreatedAt)
                    .limit(PREVIEW_LIMIT),
                "tickets.preview",
            )
            .await;
        if rows.is_empty() {
            return Vec::new();
        }

        let client_ids: Vec<Uuid> = rows.iter().map(|t| t.client_id).collect();
        let owners = self.client_refs(client_ids, "tickets.preview.clients").await;

        rows.into_iter()
            .map(|ticket| TicketPreview {
                id: ticket.id,
                title: ticket.title,
                priority: ticket.priority.to_value(),
                status: ticket.status.to_value(),
                client: owners.get(&ticket.client_id).cloned(),
                created_at: ticket.created_at.into(),
            })
            .collect()
    }

    /// Most recently created unread notifications, each with its owning
    /// client when the lookup resolves.
    async fn unread_notification_previews(&self) -> Vec<NotificationPreview> {
        let rows = self
            .fetch_or_empty(
                notifications::Entity::find()
                    .filter(notifications::Column::IsRead.eq(false))
                    .order_by_desc(notifications::Column::CreatedAt)
                    .limit(PREVIEW_LIMIT),
                "notifications.preview",
            )
            .await;
        if rows.is_empty() {
            return Vec::new();
        }

        let client_ids: Vec<Uuid> = rows.iter().map(|n| n.client_id).collect();
        let owners = self
            .client_refs(client_ids, "notifications.preview.clients")
            .await;

        rows.into_iter()
            .map(|notification| NotificationPreview {
                id: notification.id,
                title: notification.title,
                message: notification.message,
                notification_type: notification.notification_type.to_value(),
                due_date: notification.due_date,
                client: owners.get(&notification.client_id).cloned(),
                created_at: notification.created_at.into(),
            })
            .collect()
    }

    /// Revenue per period over the last 12 months, ascending.
    async fn revenue_series(&self, current: PeriodMonth) -> Vec<RevenuePoint> {
        let window_start = current.months_back(SERIES_MONTHS_BACK);
        let rows = self
            .fetch_or_empty(
                payments::Entity::find()
                    .filter(payments::Column::PeriodMonth.gte(window_start.first_day()))
                    .filter(payments::Column::PeriodMonth.lt(current.next().first_day())),
                "payments.series",
            )
            .await;

        monthly_series(
            rows.into_iter()
                .map(|p| (PeriodMonth::from_date(p.period_month), p.amount)),
        )
    }

    // ========================================================================
    // Degrade helpers
    // ========================================================================

    /// Runs a count query, degrading to zero on error.
    async fn count_or_zero<E>(&self, select: Select<E>, what: &str) -> u64
    where
        E: EntityTrait,
        E::Model: FromQueryResult + Send + Sync + 'static,
    {
        match select.count(&self.db).await {
            Ok(count) => count,
            Err(e) => {
                warn!(error = %e, what, "dashboard count degraded to zero");
                0
            }
        }
    }

    /// Runs a select, degrading to no rows on error.
    async fn fetch_or_empty<E>(&self, select: Select<E>, what: &str) -> Vec<E::Model>
    where
        E: EntityTrait,
        E::Model: FromQueryResult + Send + Sync + 'static,
    {
        match select.all(&self.db).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, what, "dashboard query degraded to empty");
                Vec::new()
            }
        }
    }

    /// Looks up clients by ID for preview relations; a failed lookup
    /// degrades to an empty map so previews render without their client.
    async fn client_refs(&self, ids: Vec<Uuid>, what: &str) -> HashMap<Uuid, ClientRef> {
        self.fetch_or_empty(
            clients::Entity::find().filter(clients::Column::Id.is_in(ids)),
            what,
        )
        .await
        .into_iter()
        .map(|c| (c.id, ClientRef {
            id: c.id,
            name: c.name,
        }))
        .collect()
    }
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;

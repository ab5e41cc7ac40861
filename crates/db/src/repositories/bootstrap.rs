//! Bootstrap repository: seed starter data into empty tables.
//!
//! Invoked by the dashboard handler before aggregation. Safe to call
//! arbitrarily often; it only ever inserts, and only when a table is empty.

use std::sync::Arc;

use chrono::Duration;
use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use rtnet_core::bootstrap::{STARTER_CLIENTS, STARTER_PACKAGES};
use rtnet_shared::Clock;

use crate::entities::{clients, internet_packages, sea_orm_active_enums::ClientStatus};

/// How many rows `ensure_seeded` inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapOutcome {
    /// Starter packages inserted (0 or 3).
    pub packages_seeded: u64,
    /// Starter clients inserted (0 or 2).
    pub clients_seeded: u64,
}

impl BootstrapOutcome {
    /// Whether anything was inserted.
    #[must_use]
    pub const fn seeded_anything(&self) -> bool {
        self.packages_seeded > 0 || self.clients_seeded > 0
    }
}

/// Repository for the idempotent bootstrap routine.
// `DatabaseConnection` is not `Clone` under sea-orm's `mock` feature (used by
// tests), so gate the derive the same way sea-orm gates its own.
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct BootstrapRepository {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

impl BootstrapRepository {
    /// Creates a new bootstrap repository.
    #[must_use]
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Inserts the starter catalog into empty tables.
    ///
    /// Existing rows are never touched. The whole check-and-insert runs in
    /// one transaction, so two concurrent first-ever requests cannot both
    /// seed; the unique package name constraint makes a lost race fail
    /// closed rather than double-insert.
    pub async fn ensure_seeded(&self) -> Result<BootstrapOutcome, DbErr> {
        let txn = self.db.begin().await?;
        let mut outcome = BootstrapOutcome::default();

        let package_count = internet_packages::Entity::find().count(&txn).await?;
        if package_count == 0 {
            let now = self.clock.now();
            let models: Vec<internet_packages::ActiveModel> = STARTER_PACKAGES
                .iter()
                .map(|p| internet_packages::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    name: Set(p.name.to_string()),
                    price: Set(p.price()),
                    speed: Set(p.speed.to_string()),
                    description: Set(Some(p.description.to_string())),
                    is_active: Set(true),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                })
                .collect();

            outcome.packages_seeded = internet_packages::Entity::insert_many(models)
                .exec_without_returning(&txn)
                .await?;
        }

        let client_count = clients::Entity::find().count(&txn).await?;
        if client_count == 0 {
            // Starter clients all point at the first available package.
            let first_package = internet_packages::Entity::find()
                .order_by_asc(internet_packages::Column::CreatedAt)
                .one(&txn)
                .await?;

            if let Some(package) = first_package {
                let now = self.clock.now();
                let today = self.clock.today();
                let models: Vec<clients::ActiveModel> = STARTER_CLIENTS
                    .iter()
                    .map(|c| clients::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        name: Set(c.name.to_string()),
                        address: Set(c.address.to_string()),
                        phone: Set(c.phone.to_string()),
                        internet_package_id: Set(package.id),
                        installation_date: Set(today - Duration::days(c.installed_days_ago)),
                        status: Set(ClientStatus::Active),
                        notes: Set(None),
                        created_at: Set(now.into()),
                        updated_at: Set(now.into()),
                    })
                    .collect();

                outcome.clients_seeded = clients::Entity::insert_many(models)
                    .exec_without_returning(&txn)
                    .await?;
            }
        }

        txn.commit().await?;

        if outcome.seeded_anything() {
            info!(
                packages = outcome.packages_seeded,
                clients = outcome.clients_seeded,
                "Seeded starter data into empty tables"
            );
        }

        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "bootstrap_tests.rs"]
mod tests;

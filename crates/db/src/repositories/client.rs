//! Client repository with relationship traversal.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use rtnet_shared::{AppError, PageRequest};

use crate::entities::{
    clients, internet_packages, notifications, payments, sea_orm_active_enums::ClientStatus,
    tickets,
};

/// Error types for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Client not found.
    #[error("Client not found: {0}")]
    NotFound(Uuid),

    /// Referenced package does not exist.
    #[error("Internet package not found: {0}")]
    PackageNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound(_) => Self::NotFound(err.to_string()),
            ClientError::PackageNotFound(_) => Self::Validation(err.to_string()),
            ClientError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Input for creating a client.
#[derive(Debug, Clone)]
pub struct CreateClientInput {
    /// Client full name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Phone number.
    pub phone: String,
    /// The package the client subscribes to.
    pub internet_package_id: Uuid,
    /// Installation date.
    pub installation_date: NaiveDate,
    /// Lifecycle status.
    pub status: ClientStatus,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Input for updating a client.
#[derive(Debug, Clone, Default)]
pub struct UpdateClientInput {
    /// New name.
    pub name: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New package reference.
    pub internet_package_id: Option<Uuid>,
    /// New installation date.
    pub installation_date: Option<NaiveDate>,
    /// New status.
    pub status: Option<ClientStatus>,
    /// New notes (outer `None` = unchanged, inner = cleared/set).
    pub notes: Option<Option<String>>,
}

/// A client with its package attached when the lookup resolves.
#[derive(Debug, Clone)]
pub struct ClientWithPackage {
    /// The client.
    pub client: clients::Model,
    /// The referenced package, if it resolved.
    pub package: Option<internet_packages::Model>,
}

/// A client with everything it owns, for the detail page.
#[derive(Debug, Clone)]
pub struct ClientDetail {
    /// The client.
    pub client: clients::Model,
    /// The referenced package, if it resolved.
    pub package: Option<internet_packages::Model>,
    /// Payments, most recent period first.
    pub payments: Vec<payments::Model>,
    /// Tickets, newest first.
    pub tickets: Vec<tickets::Model>,
    /// Notifications, newest first.
    pub notifications: Vec<notifications::Model>,
}

/// Repository for client operations.
#[derive(Debug)]
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct ClientRepository {
    db: DatabaseConnection,
}

impl ClientRepository {
    /// Creates a new client repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists clients newest-first with their packages attached.
    ///
    /// Returns the page of clients and the total client count.
    pub async fn list(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<ClientWithPackage>, u64), ClientError> {
        let page = page.clamped();

        let total = clients::Entity::find().count(&self.db).await?;

        let rows = clients::Entity::find()
            .order_by_desc(clients::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let package_ids: Vec<Uuid> = rows.iter().map(|c| c.internet_package_id).collect();
        let packages: HashMap<Uuid, internet_packages::Model> = internet_packages::Entity::find()
            .filter(internet_packages::Column::Id.is_in(package_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let result = rows
            .into_iter()
            .map(|client| {
                let package = packages.get(&client.internet_package_id).cloned();
                ClientWithPackage { client, package }
            })
            .collect();

        Ok((result, total))
    }

    /// Finds a client by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<clients::Model, ClientError> {
        clients::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ClientError::NotFound(id))
    }

    /// Fetches a client with its package and everything it owns.
    pub async fn find_detail(&self, id: Uuid) -> Result<ClientDetail, ClientError> {
        let client = self.find_by_id(id).await?;

        let package = internet_packages::Entity::find_by_id(client.internet_package_id)
            .one(&self.db)
            .await?;

        let payments = payments::Entity::find()
            .filter(payments::Column::ClientId.eq(client.id))
            .order_by_desc(payments::Column::PeriodMonth)
            .all(&self.db)
            .await?;

        let tickets = tickets::Entity::find()
            .filter(tickets::Column::ClientId.eq(client.id))
            .order_by_desc(tickets::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let notifications = notifications::Entity::find()
            .filter(notifications::Column::ClientId.eq(client.id))
            .order_by_desc(notifications::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(ClientDetail {
            client,
            package,
            payments,
            tickets,
            notifications,
        })
    }

    /// Creates a client. The referenced package must exist.
    pub async fn create(&self, input: CreateClientInput) -> Result<clients::Model, ClientError> {
        self.check_package_exists(input.internet_package_id).await?;

        let now = Utc::now();
        let client = clients::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            address: Set(input.address),
            phone: Set(input.phone),
            internet_package_id: Set(input.internet_package_id),
            installation_date: Set(input.installation_date),
            status: Set(input.status),
            notes: Set(input.notes),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        Ok(client.insert(&self.db).await?)
    }

    /// Updates a client.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateClientInput,
    ) -> Result<clients::Model, ClientError> {
        if let Some(package_id) = input.internet_package_id {
            self.check_package_exists(package_id).await?;
        }

        let client = self.find_by_id(id).await?;

        let mut active: clients::ActiveModel = client.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(address) = input.address {
            active.address = Set(address);
        }
        if let Some(phone) = input.phone {
            active.phone = Set(phone);
        }
        if let Some(package_id) = input.internet_package_id {
            active.internet_package_id = Set(package_id);
        }
        if let Some(installation_date) = input.installation_date {
            active.installation_date = Set(installation_date);
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(notes);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a client. Owned payments, tickets, and notifications go with it.
    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let client = self.find_by_id(id).await?;

        clients::Entity::delete_by_id(client.id)
            .exec(&self.db)
            .await?;

        Ok(())
    }

    async fn check_package_exists(&self, package_id: Uuid) -> Result<(), ClientError> {
        internet_packages::Entity::find_by_id(package_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or(ClientError::PackageNotFound(package_id))
    }
}

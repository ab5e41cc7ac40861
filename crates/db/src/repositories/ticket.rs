//! Support ticket repository.

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use rtnet_shared::{AppError, Clock, PageRequest};

use crate::entities::{
    clients, sea_orm_active_enums::{TicketPriority, TicketStatus},
    tickets,
};

/// Error types for ticket operations.
#[derive(Debug, thiserror::Error)]
pub enum TicketError {
    /// Ticket not found.
    #[error("Ticket not found: {0}")]
    NotFound(Uuid),

    /// Owning client does not exist.
    #[error("Client not found: {0}")]
    ClientNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<TicketError> for AppError {
    fn from(err: TicketError) -> Self {
        match err {
            TicketError::NotFound(_) | TicketError::ClientNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            TicketError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Input for opening a ticket.
#[derive(Debug, Clone)]
pub struct CreateTicketInput {
    /// Owning client.
    pub client_id: Uuid,
    /// Ticket title.
    pub title: String,
    /// Problem description.
    pub description: String,
    /// Priority; defaults to medium when not given.
    pub priority: Option<TicketPriority>,
}

/// Input for updating a ticket.
#[derive(Debug, Clone, Default)]
pub struct UpdateTicketInput {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New priority.
    pub priority: Option<TicketPriority>,
    /// New status. Moving into resolved/closed stamps `resolved_at`;
    /// moving back out clears it.
    pub status: Option<TicketStatus>,
    /// New resolution text (outer `None` = unchanged, inner = cleared/set).
    pub resolution: Option<Option<String>>,
}

/// Repository for ticket operations.
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct TicketRepository {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

impl TicketRepository {
    /// Creates a new ticket repository.
    #[must_use]
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Lists tickets newest-first, optionally filtered by status.
    ///
    /// Returns the page of tickets and the total matching count.
    pub async fn list(
        &self,
        status: Option<TicketStatus>,
        page: PageRequest,
    ) -> Result<(Vec<tickets::Model>, u64), TicketError> {
        let page = page.clamped();

        let mut query = tickets::Entity::find();
        if let Some(status) = status {
            query = query.filter(tickets::Column::Status.eq(status));
        }

        let total = query.clone().count(&self.db).await?;

        let rows = query
            .order_by_desc(tickets::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Finds a ticket by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<tickets::Model, TicketError> {
        tickets::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(TicketError::NotFound(id))
    }

    /// Opens a ticket for a client.
    pub async fn create(&self, input: CreateTicketInput) -> Result<tickets::Model, TicketError> {
        self.check_client_exists(input.client_id).await?;

        let now = self.clock.now();
        let ticket = tickets::ActiveModel {
            id: Set(Uuid::new_v4()),
            client_id: Set(input.client_id),
            title: Set(input.title),
            description: Set(input.description),
            priority: Set(input.priority.unwrap_or(TicketPriority::Medium)),
            status: Set(TicketStatus::Open),
            resolution: Set(None),
            resolved_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        Ok(ticket.insert(&self.db).await?)
    }

    /// Updates a ticket, maintaining the resolved-timestamp rule.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateTicketInput,
    ) -> Result<tickets::Model, TicketError> {
        let ticket = self.find_by_id(id).await?;
        let was_settled = is_settled(ticket.status);

        let mut active: tickets::ActiveModel = ticket.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(priority) = input.priority {
            active.priority = Set(priority);
        }
        if let Some(resolution) = input.resolution {
            active.resolution = Set(resolution);
        }
        if let Some(status) = input.status {
            let now_settled = is_settled(status);
            if now_settled && !was_settled {
                active.resolved_at = Set(Some(self.clock.now().into()));
            } else if !now_settled {
                active.resolved_at = Set(None);
            }
            active.status = Set(status);
        }
        active.updated_at = Set(self.clock.now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a ticket.
    pub async fn delete(&self, id: Uuid) -> Result<(), TicketError> {
        let ticket = self.find_by_id(id).await?;

        tickets::Entity::delete_by_id(ticket.id)
            .exec(&self.db)
            .await?;

        Ok(())
    }

    async fn check_client_exists(&self, client_id: Uuid) -> Result<(), TicketError> {
        clients::Entity::find_by_id(client_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or(TicketError::ClientNotFound(client_id))
    }
}

/// Whether a status counts as settled for the resolved-timestamp rule.
const fn is_settled(status: TicketStatus) -> bool {
    matches!(status, TicketStatus::Resolved | TicketStatus::Closed)
}

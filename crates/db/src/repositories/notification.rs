//! Notification repository.

use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use rtnet_shared::{AppError, PageRequest};

use crate::entities::{clients, notifications, sea_orm_active_enums::NotificationType};

/// Error types for notification operations.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// Notification not found.
    #[error("Notification not found: {0}")]
    NotFound(Uuid),

    /// Owning client does not exist.
    #[error("Client not found: {0}")]
    ClientNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<NotificationError> for AppError {
    fn from(err: NotificationError) -> Self {
        match err {
            NotificationError::NotFound(_) | NotificationError::ClientNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            NotificationError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Input for creating a notification.
#[derive(Debug, Clone)]
pub struct CreateNotificationInput {
    /// Owning client.
    pub client_id: Uuid,
    /// Notification title.
    pub title: String,
    /// Notification message.
    pub message: String,
    /// Category.
    pub notification_type: NotificationType,
    /// Related due date, if any.
    pub due_date: Option<NaiveDate>,
}

/// Repository for notification operations.
#[derive(Debug)]
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct NotificationRepository {
    db: DatabaseConnection,
}

impl NotificationRepository {
    /// Creates a new notification repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists notifications newest-first, optionally unread only.
    ///
    /// Returns the page of notifications and the total matching count.
    pub async fn list(
        &self,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<(Vec<notifications::Model>, u64), NotificationError> {
        let page = page.clamped();

        let mut query = notifications::Entity::find();
        if unread_only {
            query = query.filter(notifications::Column::IsRead.eq(false));
        }

        let total = query.clone().count(&self.db).await?;

        let rows = query
            .order_by_desc(notifications::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Creates a notification (unread).
    pub async fn create(
        &self,
        input: CreateNotificationInput,
    ) -> Result<notifications::Model, NotificationError> {
        self.check_client_exists(input.client_id).await?;

        let now = Utc::now();
        let notification = notifications::ActiveModel {
            id: Set(Uuid::new_v4()),
            client_id: Set(input.client_id),
            title: Set(input.title),
            message: Set(input.message),
            notification_type: Set(input.notification_type),
            is_read: Set(false),
            due_date: Set(input.due_date),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        Ok(notification.insert(&self.db).await?)
    }

    /// Marks a notification as read.
    pub async fn mark_read(&self, id: Uuid) -> Result<notifications::Model, NotificationError> {
        let notification = notifications::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(NotificationError::NotFound(id))?;

        let mut active: notifications::ActiveModel = notification.into();
        active.is_read = Set(true);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Marks all of a client's unread notifications as read.
    ///
    /// Returns how many rows were updated.
    pub async fn mark_all_read(&self, client_id: Uuid) -> Result<u64, NotificationError> {
        self.check_client_exists(client_id).await?;

        let result = notifications::Entity::update_many()
            .col_expr(notifications::Column::IsRead, Expr::value(true))
            .col_expr(notifications::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(notifications::Column::ClientId.eq(client_id))
            .filter(notifications::Column::IsRead.eq(false))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes a notification.
    pub async fn delete(&self, id: Uuid) -> Result<(), NotificationError> {
        let notification = notifications::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(NotificationError::NotFound(id))?;

        notifications::Entity::delete_by_id(notification.id)
            .exec(&self.db)
            .await?;

        Ok(())
    }

    async fn check_client_exists(&self, client_id: Uuid) -> Result<(), NotificationError> {
        clients::Entity::find_by_id(client_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or(NotificationError::ClientNotFound(client_id))
    }
}

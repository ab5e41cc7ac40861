//! Notification routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use rtnet_db::entities::sea_orm_active_enums::NotificationType;
use rtnet_db::repositories::notification::{CreateNotificationInput, NotificationRepository};
use rtnet_shared::{AppError, PageRequest, PageResponse};

use crate::AppState;
use crate::routes::error_response;

/// Creates the notification routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/{notification_id}/read", put(mark_read))
        .route("/notifications/{notification_id}", delete(delete_notification))
        .route("/clients/{client_id}/notifications", post(create_notification))
        .route("/clients/{client_id}/notifications/read", put(mark_all_read))
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Query parameters for listing notifications.
#[derive(Debug, Deserialize)]
pub struct ListNotificationsQuery {
    /// Only unread notifications.
    pub unread: Option<bool>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// Request body for creating a notification.
#[derive(Debug, Deserialize)]
pub struct CreateNotificationRequest {
    /// Notification title.
    pub title: String,
    /// Notification message.
    pub message: String,
    /// Category.
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// Related due date.
    pub due_date: Option<NaiveDate>,
}

/// Response for a notification.
#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    /// Notification ID.
    pub id: Uuid,
    /// Owning client.
    pub client_id: Uuid,
    /// Notification title.
    pub title: String,
    /// Notification message.
    pub message: String,
    /// Category.
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// Whether it has been read.
    pub is_read: bool,
    /// Related due date.
    pub due_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: String,
}

pub(crate) fn notification_response(
    notification: rtnet_db::entities::notifications::Model,
) -> NotificationResponse {
    NotificationResponse {
        id: notification.id,
        client_id: notification.client_id,
        title: notification.title,
        message: notification.message,
        notification_type: notification.notification_type,
        is_read: notification.is_read,
        due_date: notification.due_date,
        created_at: notification.created_at.to_rfc3339(),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /notifications
#[axum::debug_handler]
async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<ListNotificationsQuery>,
) -> impl IntoResponse {
    let repo = NotificationRepository::new((*state.db).clone());

    let mut page = PageRequest::default();
    if let Some(p) = query.page {
        page.page = p;
    }
    if let Some(per_page) = query.per_page {
        page.per_page = per_page;
    }
    let page = page.clamped();

    match repo.list(query.unread.unwrap_or(false), page).await {
        Ok((rows, total)) => {
            let data: Vec<NotificationResponse> =
                rows.into_iter().map(notification_response).collect();
            (
                StatusCode::OK,
                Json(PageResponse::new(data, page.page, page.per_page, total)),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list notifications");
            error_response(&AppError::from(e))
        }
    }
}

/// POST /clients/{client_id}/notifications
#[axum::debug_handler]
async fn create_notification(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
    Json(req): Json<CreateNotificationRequest>,
) -> impl IntoResponse {
    let repo = NotificationRepository::new((*state.db).clone());

    let input = CreateNotificationInput {
        client_id,
        title: req.title,
        message: req.message,
        notification_type: req.notification_type,
        due_date: req.due_date,
    };

    match repo.create(input).await {
        Ok(notification) => {
            info!(notification_id = %notification.id, client_id = %client_id, "Notification created");
            (StatusCode::CREATED, Json(notification_response(notification))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create notification");
            error_response(&AppError::from(e))
        }
    }
}

/// PUT /notifications/{notification_id}/read
#[axum::debug_handler]
async fn mark_read(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = NotificationRepository::new((*state.db).clone());

    match repo.mark_read(notification_id).await {
        Ok(notification) => {
            (StatusCode::OK, Json(notification_response(notification))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to mark notification read");
            error_response(&AppError::from(e))
        }
    }
}

/// PUT /clients/{client_id}/notifications/read
#[axum::debug_handler]
async fn mark_all_read(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = NotificationRepository::new((*state.db).clone());

    match repo.mark_all_read(client_id).await {
        Ok(updated) => (StatusCode::OK, Json(json!({ "updated": updated }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to mark notifications read");
            error_response(&AppError::from(e))
        }
    }
}

/// DELETE /notifications/{notification_id}
#[axum::debug_handler]
async fn delete_notification(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = NotificationRepository::new((*state.db).clone());

    match repo.delete(notification_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!(error = %e, "Failed to delete notification");
            error_response(&AppError::from(e))
        }
    }
}

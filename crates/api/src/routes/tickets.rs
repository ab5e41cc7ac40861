//! Support ticket routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use rtnet_db::entities::sea_orm_active_enums::{TicketPriority, TicketStatus};
use rtnet_db::repositories::ticket::{CreateTicketInput, TicketRepository, UpdateTicketInput};
use rtnet_shared::{AppError, PageRequest, PageResponse};

use crate::AppState;
use crate::routes::error_response;

/// Creates the ticket routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tickets", get(list_tickets))
        .route("/tickets/{ticket_id}", get(get_ticket))
        .route("/tickets/{ticket_id}", put(update_ticket))
        .route("/tickets/{ticket_id}", delete(delete_ticket))
        .route("/clients/{client_id}/tickets", post(create_ticket))
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Query parameters for listing tickets.
#[derive(Debug, Deserialize)]
pub struct ListTicketsQuery {
    /// Filter by status.
    pub status: Option<TicketStatus>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// Request body for opening a ticket.
#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    /// Ticket title.
    pub title: String,
    /// Problem description.
    pub description: String,
    /// Priority (default: medium).
    pub priority: Option<TicketPriority>,
}

/// Request body for updating a ticket.
#[derive(Debug, Deserialize)]
pub struct UpdateTicketRequest {
    /// Ticket title.
    pub title: Option<String>,
    /// Problem description.
    pub description: Option<String>,
    /// Priority.
    pub priority: Option<TicketPriority>,
    /// Status.
    pub status: Option<TicketStatus>,
    /// Resolution text.
    pub resolution: Option<String>,
}

/// Response for a ticket.
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    /// Ticket ID.
    pub id: Uuid,
    /// Owning client.
    pub client_id: Uuid,
    /// Ticket title.
    pub title: String,
    /// Problem description.
    pub description: String,
    /// Priority.
    pub priority: TicketPriority,
    /// Status.
    pub status: TicketStatus,
    /// Resolution text.
    pub resolution: Option<String>,
    /// When the ticket was resolved/closed.
    pub resolved_at: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

pub(crate) fn ticket_response(ticket: rtnet_db::entities::tickets::Model) -> TicketResponse {
    TicketResponse {
        id: ticket.id,
        client_id: ticket.client_id,
        title: ticket.title,
        description: ticket.description,
        priority: ticket.priority,
        status: ticket.status,
        resolution: ticket.resolution,
        resolved_at: ticket.resolved_at.map(|t| t.to_rfc3339()),
        created_at: ticket.created_at.to_rfc3339(),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /tickets
#[axum::debug_handler]
async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<ListTicketsQuery>,
) -> impl IntoResponse {
    let repo = TicketRepository::new((*state.db).clone(), state.clock.clone());

    let mut page = PageRequest::default();
    if let Some(p) = query.page {
        page.page = p;
    }
    if let Some(per_page) = query.per_page {
        page.per_page = per_page;
    }
    let page = page.clamped();

    match repo.list(query.status, page).await {
        Ok((rows, total)) => {
            let data: Vec<TicketResponse> = rows.into_iter().map(ticket_response).collect();
            (
                StatusCode::OK,
                Json(PageResponse::new(data, page.page, page.per_page, total)),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list tickets");
            error_response(&AppError::from(e))
        }
    }
}

/// GET /tickets/{ticket_id}
#[axum::debug_handler]
async fn get_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TicketRepository::new((*state.db).clone(), state.clock.clone());

    match repo.find_by_id(ticket_id).await {
        Ok(ticket) => (StatusCode::OK, Json(ticket_response(ticket))).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

/// POST /clients/{client_id}/tickets
#[axum::debug_handler]
async fn create_ticket(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
    Json(req): Json<CreateTicketRequest>,
) -> impl IntoResponse {
    let repo = TicketRepository::new((*state.db).clone(), state.clock.clone());

    let input = CreateTicketInput {
        client_id,
        title: req.title,
        description: req.description,
        priority: req.priority,
    };

    match repo.create(input).await {
        Ok(ticket) => {
            info!(ticket_id = %ticket.id, client_id = %client_id, "Ticket opened");
            (StatusCode::CREATED, Json(ticket_response(ticket))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to open ticket");
            error_response(&AppError::from(e))
        }
    }
}

/// PUT /tickets/{ticket_id}
#[axum::debug_handler]
async fn update_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
    Json(req): Json<UpdateTicketRequest>,
) -> impl IntoResponse {
    let repo = TicketRepository::new((*state.db).clone(), state.clock.clone());

    let input = UpdateTicketInput {
        title: req.title,
        description: req.description,
        priority: req.priority,
        status: req.status,
        resolution: req.resolution.map(Some),
    };

    match repo.update(ticket_id, input).await {
        Ok(ticket) => (StatusCode::OK, Json(ticket_response(ticket))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to update ticket");
            error_response(&AppError::from(e))
        }
    }
}

/// DELETE /tickets/{ticket_id}
#[axum::debug_handler]
async fn delete_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TicketRepository::new((*state.db).clone(), state.clock.clone());

    match repo.delete(ticket_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!(error = %e, "Failed to delete ticket");
            error_response(&AppError::from(e))
        }
    }
}

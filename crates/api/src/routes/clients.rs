//! Client management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use rtnet_db::entities::sea_orm_active_enums::ClientStatus;
use rtnet_db::repositories::client::{
    ClientDetail, ClientRepository, ClientWithPackage, CreateClientInput, UpdateClientInput,
};
use rtnet_shared::{AppError, PageRequest, PageResponse};

use crate::AppState;
use crate::routes::{
    error_response,
    notifications::{NotificationResponse, notification_response},
    packages::{PackageResponse, package_response},
    payments::{PaymentResponse, payment_response},
    tickets::{TicketResponse, ticket_response},
};

/// Creates the client routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients))
        .route("/clients", post(create_client))
        .route("/clients/{client_id}", get(get_client))
        .route("/clients/{client_id}", put(update_client))
        .route("/clients/{client_id}", delete(delete_client))
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Request body for creating a client.
#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    /// Client full name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Phone number.
    pub phone: String,
    /// The package to subscribe to.
    pub internet_package_id: Uuid,
    /// Installation date.
    pub installation_date: NaiveDate,
    /// Status (default: active).
    pub status: Option<ClientStatus>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Request body for updating a client.
#[derive(Debug, Deserialize)]
pub struct UpdateClientRequest {
    /// Client full name.
    pub name: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// The package to subscribe to.
    pub internet_package_id: Option<Uuid>,
    /// Installation date.
    pub installation_date: Option<NaiveDate>,
    /// Status.
    pub status: Option<ClientStatus>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Response for a client.
#[derive(Debug, Serialize)]
pub struct ClientResponse {
    /// Client ID.
    pub id: Uuid,
    /// Client full name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Phone number.
    pub phone: String,
    /// Installation date.
    pub installation_date: NaiveDate,
    /// Status.
    pub status: ClientStatus,
    /// Free-text notes.
    pub notes: Option<String>,
    /// The subscribed package; absent when the reference cannot resolve.
    pub package: Option<PackageResponse>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Response for the client detail page.
#[derive(Debug, Serialize)]
pub struct ClientDetailResponse {
    /// The client with its package.
    #[serde(flatten)]
    pub client: ClientResponse,
    /// Payments, most recent period first.
    pub payments: Vec<PaymentResponse>,
    /// Tickets, newest first.
    pub tickets: Vec<TicketResponse>,
    /// Notifications, newest first.
    pub notifications: Vec<NotificationResponse>,
}

fn client_response(
    client: rtnet_db::entities::clients::Model,
    package: Option<rtnet_db::entities::internet_packages::Model>,
) -> ClientResponse {
    ClientResponse {
        id: client.id,
        name: client.name,
        address: client.address,
        phone: client.phone,
        installation_date: client.installation_date,
        status: client.status,
        notes: client.notes,
        package: package.map(|p| package_response(p, None)),
        created_at: client.created_at.to_rfc3339(),
        updated_at: client.updated_at.to_rfc3339(),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /clients
#[axum::debug_handler]
async fn list_clients(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = ClientRepository::new((*state.db).clone());
    let page = page.clamped();

    match repo.list(page).await {
        Ok((rows, total)) => {
            let data: Vec<ClientResponse> = rows
                .into_iter()
                .map(|ClientWithPackage { client, package }| client_response(client, package))
                .collect();
            (
                StatusCode::OK,
                Json(PageResponse::new(data, page.page, page.per_page, total)),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list clients");
            error_response(&AppError::from(e))
        }
    }
}

/// GET /clients/{client_id}
#[axum::debug_handler]
async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ClientRepository::new((*state.db).clone());

    match repo.find_detail(client_id).await {
        Ok(ClientDetail {
            client,
            package,
            payments,
            tickets,
            notifications,
        }) => {
            let response = ClientDetailResponse {
                client: client_response(client, package),
                payments: payments.into_iter().map(payment_response).collect(),
                tickets: tickets.into_iter().map(ticket_response).collect(),
                notifications: notifications
                    .into_iter()
                    .map(notification_response)
                    .collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&AppError::from(e)),
    }
}

/// POST /clients
#[axum::debug_handler]
async fn create_client(
    State(state): State<AppState>,
    Json(req): Json<CreateClientRequest>,
) -> impl IntoResponse {
    let repo = ClientRepository::new((*state.db).clone());

    let input = CreateClientInput {
        name: req.name,
        address: req.address,
        phone: req.phone,
        internet_package_id: req.internet_package_id,
        installation_date: req.installation_date,
        status: req.status.unwrap_or(ClientStatus::Active),
        notes: req.notes,
    };

    match repo.create(input).await {
        Ok(client) => {
            info!(client_id = %client.id, name = %client.name, "Client created");
            (StatusCode::CREATED, Json(client_response(client, None))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create client");
            error_response(&AppError::from(e))
        }
    }
}

/// PUT /clients/{client_id}
#[axum::debug_handler]
async fn update_client(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
    Json(req): Json<UpdateClientRequest>,
) -> impl IntoResponse {
    let repo = ClientRepository::new((*state.db).clone());

    let input = UpdateClientInput {
        name: req.name,
        address: req.address,
        phone: req.phone,
        internet_package_id: req.internet_package_id,
        installation_date: req.installation_date,
        status: req.status,
        notes: req.notes.map(Some),
    };

    match repo.update(client_id, input).await {
        Ok(client) => (StatusCode::OK, Json(client_response(client, None))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to update client");
            error_response(&AppError::from(e))
        }
    }
}

/// DELETE /clients/{client_id}
///
/// Owned payments, tickets, and notifications are deleted with the client.
#[axum::debug_handler]
async fn delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ClientRepository::new((*state.db).clone());

    match repo.delete(client_id).await {
        Ok(()) => {
            info!(client_id = %client_id, "Client deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete client");
            error_response(&AppError::from(e))
        }
    }
}

//! Internet package management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use rtnet_db::repositories::internet_package::{
    CreatePackageInput, InternetPackageRepository, PackageWithClientCount, UpdatePackageInput,
};
use rtnet_shared::{AppError, PageRequest, PageResponse};

use crate::AppState;
use crate::routes::{error_response, format_money};

/// Creates the package routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/packages", get(list_packages))
        .route("/packages", post(create_package))
        .route("/packages/active", get(list_active_packages))
        .route("/packages/{package_id}", get(get_package))
        .route("/packages/{package_id}", put(update_package))
        .route("/packages/{package_id}", delete(delete_package))
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Request body for creating a package.
#[derive(Debug, Deserialize)]
pub struct CreatePackageRequest {
    /// Package name (unique).
    pub name: String,
    /// Monthly price.
    pub price: Decimal,
    /// Speed label, e.g. "25 Mbps".
    pub speed: String,
    /// Description.
    pub description: Option<String>,
    /// Whether the package is offered (default: true).
    pub is_active: Option<bool>,
}

/// Request body for updating a package.
#[derive(Debug, Deserialize)]
pub struct UpdatePackageRequest {
    /// Package name.
    pub name: Option<String>,
    /// Monthly price.
    pub price: Option<Decimal>,
    /// Speed label.
    pub speed: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Whether the package is offered.
    pub is_active: Option<bool>,
}

/// Response for a package.
#[derive(Debug, Serialize)]
pub struct PackageResponse {
    /// Package ID.
    pub id: Uuid,
    /// Package name.
    pub name: String,
    /// Monthly price.
    pub price: String,
    /// Speed label.
    pub speed: String,
    /// Description.
    pub description: Option<String>,
    /// Whether the package is offered.
    pub is_active: bool,
    /// Number of subscribed clients (list endpoint only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_count: Option<u64>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

pub(crate) fn package_response(
    package: rtnet_db::entities::internet_packages::Model,
    client_count: Option<u64>,
) -> PackageResponse {
    PackageResponse {
        id: package.id,
        name: package.name,
        price: format_money(package.price),
        speed: package.speed,
        description: package.description,
        is_active: package.is_active,
        client_count,
        created_at: package.created_at.to_rfc3339(),
        updated_at: package.updated_at.to_rfc3339(),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /packages
#[axum::debug_handler]
async fn list_packages(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = InternetPackageRepository::new((*state.db).clone());
    let page = page.clamped();

    match repo.list(page).await {
        Ok((rows, total)) => {
            let data: Vec<PackageResponse> = rows
                .into_iter()
                .map(|PackageWithClientCount { package, client_count }| {
                    package_response(package, Some(client_count))
                })
                .collect();
            (
                StatusCode::OK,
                Json(PageResponse::new(data, page.page, page.per_page, total)),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list packages");
            error_response(&AppError::from(e))
        }
    }
}

/// GET /packages/active
#[axum::debug_handler]
async fn list_active_packages(State(state): State<AppState>) -> impl IntoResponse {
    let repo = InternetPackageRepository::new((*state.db).clone());

    match repo.list_active().await {
        Ok(rows) => {
            let data: Vec<PackageResponse> =
                rows.into_iter().map(|p| package_response(p, None)).collect();
            (StatusCode::OK, Json(data)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list active packages");
            error_response(&AppError::from(e))
        }
    }
}

/// GET /packages/{package_id}
#[axum::debug_handler]
async fn get_package(
    State(state): State<AppState>,
    Path(package_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = InternetPackageRepository::new((*state.db).clone());

    match repo.find_by_id(package_id).await {
        Ok(package) => (StatusCode::OK, Json(package_response(package, None))).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

/// POST /packages
#[axum::debug_handler]
async fn create_package(
    State(state): State<AppState>,
    Json(req): Json<CreatePackageRequest>,
) -> impl IntoResponse {
    let repo = InternetPackageRepository::new((*state.db).clone());

    let input = CreatePackageInput {
        name: req.name,
        price: req.price,
        speed: req.speed,
        description: req.description,
        is_active: req.is_active.unwrap_or(true),
    };

    match repo.create(input).await {
        Ok(package) => {
            info!(package_id = %package.id, name = %package.name, "Package created");
            (StatusCode::CREATED, Json(package_response(package, None))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create package");
            error_response(&AppError::from(e))
        }
    }
}

/// PUT /packages/{package_id}
#[axum::debug_handler]
async fn update_package(
    State(state): State<AppState>,
    Path(package_id): Path<Uuid>,
    Json(req): Json<UpdatePackageRequest>,
) -> impl IntoResponse {
    let repo = InternetPackageRepository::new((*state.db).clone());

    let input = UpdatePackageInput {
        name: req.name,
        price: req.price,
        speed: req.speed,
        description: req.description.map(Some),
        is_active: req.is_active,
    };

    match repo.update(package_id, input).await {
        Ok(package) => (StatusCode::OK, Json(package_response(package, None))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to update package");
            error_response(&AppError::from(e))
        }
    }
}

/// DELETE /packages/{package_id}
///
/// Rejected with 409 while any client still references the package.
#[axum::debug_handler]
async fn delete_package(
    State(state): State<AppState>,
    Path(package_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = InternetPackageRepository::new((*state.db).clone());

    match repo.delete(package_id).await {
        Ok(()) => {
            info!(package_id = %package_id, "Package deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete package");
            error_response(&AppError::from(e))
        }
    }
}

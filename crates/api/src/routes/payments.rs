//! Payment recording routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use rtnet_db::entities::sea_orm_active_enums::PaymentMethod;
use rtnet_db::repositories::payment::{CreatePaymentInput, PaymentRepository};
use rtnet_shared::AppError;

use crate::AppState;
use crate::routes::{error_response, format_money};

/// Creates the payment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients/{client_id}/payments", get(list_payments))
        .route("/clients/{client_id}/payments", post(create_payment))
        .route("/payments/{payment_id}", delete(delete_payment))
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Request body for recording a payment.
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    /// Amount paid.
    pub amount: Decimal,
    /// Date the payment was made.
    pub payment_date: NaiveDate,
    /// Any date within the month being paid for.
    pub period_month: NaiveDate,
    /// Payment method (default: cash).
    pub payment_method: Option<PaymentMethod>,
    /// Notes.
    pub notes: Option<String>,
}

/// Response for a payment.
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    /// Payment ID.
    pub id: Uuid,
    /// Owning client.
    pub client_id: Uuid,
    /// Amount paid.
    pub amount: String,
    /// Date the payment was made.
    pub payment_date: NaiveDate,
    /// First day of the month paid for.
    pub period_month: NaiveDate,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Notes.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

pub(crate) fn payment_response(payment: rtnet_db::entities::payments::Model) -> PaymentResponse {
    PaymentResponse {
        id: payment.id,
        client_id: payment.client_id,
        amount: format_money(payment.amount),
        payment_date: payment.payment_date,
        period_month: payment.period_month,
        payment_method: payment.payment_method,
        notes: payment.notes,
        created_at: payment.created_at.to_rfc3339(),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /clients/{client_id}/payments
#[axum::debug_handler]
async fn list_payments(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = PaymentRepository::new((*state.db).clone());

    match repo.list_for_client(client_id).await {
        Ok(rows) => {
            let data: Vec<PaymentResponse> = rows.into_iter().map(payment_response).collect();
            (StatusCode::OK, Json(data)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list payments");
            error_response(&AppError::from(e))
        }
    }
}

/// POST /clients/{client_id}/payments
///
/// Rejected with 409 when a payment already exists for the same
/// (client, period-month) pair.
#[axum::debug_handler]
async fn create_payment(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
    Json(req): Json<CreatePaymentRequest>,
) -> impl IntoResponse {
    let repo = PaymentRepository::new((*state.db).clone());

    let input = CreatePaymentInput {
        client_id,
        amount: req.amount,
        payment_date: req.payment_date,
        period_month: req.period_month,
        payment_method: req.payment_method.unwrap_or(PaymentMethod::Cash),
        notes: req.notes,
    };

    match repo.create(input).await {
        Ok(payment) => {
            info!(payment_id = %payment.id, client_id = %client_id, "Payment recorded");
            (StatusCode::CREATED, Json(payment_response(payment))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to record payment");
            error_response(&AppError::from(e))
        }
    }
}

/// DELETE /payments/{payment_id}
#[axum::debug_handler]
async fn delete_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = PaymentRepository::new((*state.db).clone());

    match repo.delete(payment_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!(error = %e, "Failed to delete payment");
            error_response(&AppError::from(e))
        }
    }
}

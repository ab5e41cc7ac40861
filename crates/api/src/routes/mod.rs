//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde_json::json;

use crate::AppState;
use rtnet_shared::AppError;

pub mod clients;
pub mod dashboard;
pub mod health;
pub mod notifications;
pub mod packages;
pub mod payments;
pub mod tickets;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(dashboard::routes())
        .merge(packages::routes())
        .merge(clients::routes())
        .merge(payments::routes())
        .merge(tickets::routes())
        .merge(notifications::routes())
}

/// Builds the uniform error response for a repository error.
pub(crate) fn error_response(err: &AppError) -> Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}

/// Formats a Decimal amount as a string with 2 decimal places.
pub(crate) fn format_money(amount: Decimal) -> String {
    format!("{amount:.2}")
}

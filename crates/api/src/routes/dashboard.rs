//! Dashboard route.
//!
//! A dashboard request first runs the explicit bootstrap step (a no-op on
//! a populated database), then assembles the statistics snapshot. The
//! response always succeeds; degraded sub-computations show up as zeros
//! and empty lists.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde::Serialize;
use tracing::{info, warn};

use rtnet_core::dashboard::{
    ClientPreview, DashboardSnapshot, NotificationPreview, TicketPreview,
};
use rtnet_db::{BootstrapRepository, DashboardRepository};

use crate::AppState;
use crate::routes::format_money;

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Summary counters.
    pub stats: StatsResponse,
    /// Most recently created clients.
    pub recent_clients: Vec<ClientPreview>,
    /// Most recently created open tickets.
    pub open_tickets: Vec<TicketPreview>,
    /// Most recently created unread notifications.
    pub recent_notifications: Vec<NotificationPreview>,
    /// Revenue per month, ascending.
    pub monthly_revenue: Vec<RevenuePointResponse>,
}

/// Stats block of the dashboard response.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Total clients.
    pub total_clients: u64,
    /// Active clients.
    pub active_clients: u64,
    /// Inactive clients.
    pub inactive_clients: u64,
    /// Total packages.
    pub total_packages: u64,
    /// Active packages.
    pub active_packages: u64,
    /// Open tickets.
    pub open_tickets: u64,
    /// Unread notifications.
    pub unread_notifications: u64,
    /// Current-month revenue.
    pub monthly_revenue: String,
}

/// One revenue series point.
#[derive(Debug, Serialize)]
pub struct RevenuePointResponse {
    /// Period label (`YYYY-MM`).
    pub month: String,
    /// Total amount for the period.
    pub total: String,
}

impl From<DashboardSnapshot> for DashboardResponse {
    fn from(snapshot: DashboardSnapshot) -> Self {
        Self {
            stats: StatsResponse {
                total_clients: snapshot.stats.total_clients,
                active_clients: snapshot.stats.active_clients,
                inactive_clients: snapshot.stats.inactive_clients,
                total_packages: snapshot.stats.total_packages,
                active_packages: snapshot.stats.active_packages,
                open_tickets: snapshot.stats.open_tickets,
                unread_notifications: snapshot.stats.unread_notifications,
                monthly_revenue: format_money(snapshot.stats.monthly_revenue),
            },
            recent_clients: snapshot.recent_clients,
            open_tickets: snapshot.open_tickets,
            recent_notifications: snapshot.recent_notifications,
            monthly_revenue: snapshot
                .monthly_revenue
                .into_iter()
                .map(|p| RevenuePointResponse {
                    month: p.month,
                    total: format_money(p.total),
                })
                .collect(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /dashboard
#[axum::debug_handler]
async fn get_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    // Explicit bootstrap step before aggregation. A failure here is not
    // fatal; the dashboard renders whatever data exists.
    let bootstrap = BootstrapRepository::new((*state.db).clone(), state.clock.clone());
    match bootstrap.ensure_seeded().await {
        Ok(outcome) if outcome.seeded_anything() => {
            info!(
                packages = outcome.packages_seeded,
                clients = outcome.clients_seeded,
                "Starter data seeded before dashboard render"
            );
        }
        Ok(_) => {}
        Err(e) => {
            warn!(error = %e, "Bootstrap seeding failed; rendering dashboard anyway");
        }
    }

    let dashboard = DashboardRepository::new((*state.db).clone(), state.clock.clone());
    let snapshot = dashboard.snapshot().await;

    (StatusCode::OK, Json(DashboardResponse::from(snapshot))).into_response()
}

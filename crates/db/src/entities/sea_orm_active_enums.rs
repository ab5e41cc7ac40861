//! Postgres enum type mappings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Client lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "client_status")]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    /// Currently subscribed.
    #[sea_orm(string_value = "active")]
    Active,
    /// Service suspended or terminated.
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash collected in person.
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Bank transfer.
    #[sea_orm(string_value = "transfer")]
    Transfer,
    /// Anything else.
    #[sea_orm(string_value = "other")]
    Other,
}

/// Support ticket priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_priority")]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    /// Low priority.
    #[sea_orm(string_value = "low")]
    Low,
    /// Medium priority (default).
    #[sea_orm(string_value = "medium")]
    Medium,
    /// High priority.
    #[sea_orm(string_value = "high")]
    High,
    /// Needs immediate attention.
    #[sea_orm(string_value = "urgent")]
    Urgent,
}

/// Support ticket status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_status")]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Newly reported.
    #[sea_orm(string_value = "open")]
    Open,
    /// Being worked on.
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    /// Fixed, pending confirmation.
    #[sea_orm(string_value = "resolved")]
    Resolved,
    /// Done.
    #[sea_orm(string_value = "closed")]
    Closed,
}

/// Notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "notification_type")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// Payment coming due.
    #[sea_orm(string_value = "payment_due")]
    PaymentDue,
    /// Payment past due.
    #[sea_orm(string_value = "payment_overdue")]
    PaymentOverdue,
    /// Scheduled installation reminder.
    #[sea_orm(string_value = "installation_reminder")]
    InstallationReminder,
    /// Anything else.
    #[sea_orm(string_value = "general")]
    General,
}

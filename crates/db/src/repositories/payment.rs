//! Payment repository.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use rtnet_shared::{AppError, PeriodMonth};

use crate::entities::{clients, payments, sea_orm_active_enums::PaymentMethod};

/// Error types for payment operations.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// Payment not found.
    #[error("Payment not found: {0}")]
    NotFound(Uuid),

    /// Owning client does not exist.
    #[error("Client not found: {0}")]
    ClientNotFound(Uuid),

    /// Amount must be non-negative.
    #[error("Payment amount cannot be negative")]
    NegativeAmount,

    /// A payment already exists for this client and period.
    #[error("A payment for period {period} already exists for this client")]
    DuplicatePeriod {
        /// The owning client.
        client_id: Uuid,
        /// The period already paid for.
        period: PeriodMonth,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::NotFound(_) | PaymentError::ClientNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            PaymentError::NegativeAmount => Self::Validation(err.to_string()),
            PaymentError::DuplicatePeriod { .. } => Self::Conflict(err.to_string()),
            PaymentError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Input for recording a payment.
#[derive(Debug, Clone)]
pub struct CreatePaymentInput {
    /// Owning client.
    pub client_id: Uuid,
    /// Amount paid.
    pub amount: Decimal,
    /// Date the payment was made.
    pub payment_date: NaiveDate,
    /// Any date within the month being paid for; normalized to the
    /// period-month before storage.
    pub period_month: NaiveDate,
    /// How the payment was made.
    pub payment_method: PaymentMethod,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Repository for payment operations.
#[derive(Debug)]
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct PaymentRepository {
    db: DatabaseConnection,
}

impl PaymentRepository {
    /// Creates a new payment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a client's payments, most recent period first.
    pub async fn list_for_client(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<payments::Model>, PaymentError> {
        self.check_client_exists(client_id).await?;

        Ok(payments::Entity::find()
            .filter(payments::Column::ClientId.eq(client_id))
            .order_by_desc(payments::Column::PeriodMonth)
            .all(&self.db)
            .await?)
    }

    /// Records a payment.
    ///
    /// At most one payment may exist per (client, period-month); a second
    /// insert for the same pair is rejected with `DuplicatePeriod`.
    pub async fn create(&self, input: CreatePaymentInput) -> Result<payments::Model, PaymentError> {
        if input.amount < Decimal::ZERO {
            return Err(PaymentError::NegativeAmount);
        }

        self.check_client_exists(input.client_id).await?;

        let period = PeriodMonth::from_date(input.period_month);
        let now = Utc::now();
        let payment = payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            client_id: Set(input.client_id),
            amount: Set(input.amount),
            payment_date: Set(input.payment_date),
            period_month: Set(period.first_day()),
            payment_method: Set(input.payment_method),
            notes: Set(input.notes),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        payment.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => PaymentError::DuplicatePeriod {
                client_id: input.client_id,
                period,
            },
            _ => PaymentError::Database(e),
        })
    }

    /// Deletes a payment.
    pub async fn delete(&self, id: Uuid) -> Result<(), PaymentError> {
        let payment = payments::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PaymentError::NotFound(id))?;

        payments::Entity::delete_by_id(payment.id)
            .exec(&self.db)
            .await?;

        Ok(())
    }

    async fn check_client_exists(&self, client_id: Uuid) -> Result<(), PaymentError> {
        clients::Entity::find_by_id(client_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or(PaymentError::ClientNotFound(client_id))
    }
}

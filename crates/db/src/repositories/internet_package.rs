//! Internet package repository.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use rtnet_shared::{AppError, PageRequest};

use crate::entities::{clients, internet_packages};

/// Error types for internet package operations.
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    /// Package not found.
    #[error("Internet package not found: {0}")]
    NotFound(Uuid),

    /// A package with the same name already exists.
    #[error("An internet package named '{0}' already exists")]
    DuplicateName(String),

    /// Price must be non-negative.
    #[error("Package price cannot be negative")]
    NegativePrice,

    /// Package still referenced by clients.
    #[error("Cannot delete a package that still has {0} subscribed client(s)")]
    HasClients(u64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<PackageError> for AppError {
    fn from(err: PackageError) -> Self {
        match err {
            PackageError::NotFound(_) => Self::NotFound(err.to_string()),
            PackageError::DuplicateName(_) | PackageError::HasClients(_) => {
                Self::Conflict(err.to_string())
            }
            PackageError::NegativePrice => Self::Validation(err.to_string()),
            PackageError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Input for creating a package.
#[derive(Debug, Clone)]
pub struct CreatePackageInput {
    /// Unique package name.
    pub name: String,
    /// Monthly price.
    pub price: Decimal,
    /// Speed label.
    pub speed: String,
    /// Optional description.
    pub description: Option<String>,
    /// Whether the package is offered to new clients.
    pub is_active: bool,
}

/// Input for updating a package.
#[derive(Debug, Clone, Default)]
pub struct UpdatePackageInput {
    /// New name.
    pub name: Option<String>,
    /// New price.
    pub price: Option<Decimal>,
    /// New speed label.
    pub speed: Option<String>,
    /// New description (outer `None` = unchanged, inner = cleared/set).
    pub description: Option<Option<String>>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// A package together with the number of clients subscribed to it.
#[derive(Debug, Clone)]
pub struct PackageWithClientCount {
    /// The package.
    pub package: internet_packages::Model,
    /// How many clients reference it.
    pub client_count: u64,
}

/// Repository for internet package operations.
#[derive(Debug)]
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct InternetPackageRepository {
    db: DatabaseConnection,
}

impl InternetPackageRepository {
    /// Creates a new package repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists packages newest-first with their client counts.
    ///
    /// Returns the page of packages and the total package count.
    pub async fn list(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<PackageWithClientCount>, u64), PackageError> {
        let page = page.clamped();

        let total = internet_packages::Entity::find().count(&self.db).await?;

        let packages = internet_packages::Entity::find()
            .order_by_desc(internet_packages::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let mut result = Vec::with_capacity(packages.len());
        for package in packages {
            let client_count = clients::Entity::find()
                .filter(clients::Column::InternetPackageId.eq(package.id))
                .count(&self.db)
                .await?;
            result.push(PackageWithClientCount {
                package,
                client_count,
            });
        }

        Ok((result, total))
    }

    /// Lists active packages ordered by name, for client forms.
    pub async fn list_active(&self) -> Result<Vec<internet_packages::Model>, PackageError> {
        Ok(internet_packages::Entity::find()
            .filter(internet_packages::Column::IsActive.eq(true))
            .order_by_asc(internet_packages::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Finds a package by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<internet_packages::Model, PackageError> {
        internet_packages::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PackageError::NotFound(id))
    }

    /// Creates a package.
    pub async fn create(
        &self,
        input: CreatePackageInput,
    ) -> Result<internet_packages::Model, PackageError> {
        if input.price < Decimal::ZERO {
            return Err(PackageError::NegativePrice);
        }

        let name = input.name.clone();
        let now = Utc::now();
        let package = internet_packages::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            price: Set(input.price),
            speed: Set(input.speed),
            description: Set(input.description),
            is_active: Set(input.is_active),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        package.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => PackageError::DuplicateName(name),
            _ => PackageError::Database(e),
        })
    }

    /// Updates a package.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdatePackageInput,
    ) -> Result<internet_packages::Model, PackageError> {
        if let Some(price) = input.price
            && price < Decimal::ZERO
        {
            return Err(PackageError::NegativePrice);
        }

        let package = self.find_by_id(id).await?;
        let renamed_to = input.name.clone();

        let mut active: internet_packages::ActiveModel = package.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(speed) = input.speed {
            active.speed = Set(speed);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        active.update(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                PackageError::DuplicateName(renamed_to.unwrap_or_default())
            }
            _ => PackageError::Database(e),
        })
    }

    /// Deletes a package.
    ///
    /// Rejected while any client still references the package; the package
    /// and its clients are left intact.
    pub async fn delete(&self, id: Uuid) -> Result<(), PackageError> {
        let package = self.find_by_id(id).await?;

        let subscribed = clients::Entity::find()
            .filter(clients::Column::InternetPackageId.eq(package.id))
            .count(&self.db)
            .await?;
        if subscribed > 0 {
            return Err(PackageError::HasClients(subscribed));
        }

        internet_packages::Entity::delete_by_id(package.id)
            .exec(&self.db)
            .await?;

        Ok(())
    }
}

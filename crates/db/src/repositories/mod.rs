//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod bootstrap;
pub mod client;
pub mod dashboard;
pub mod internet_package;
pub mod notification;
pub mod payment;
pub mod ticket;

pub use bootstrap::{BootstrapOutcome, BootstrapRepository};
pub use client::{
    ClientDetail, ClientError, ClientRepository, ClientWithPackage, CreateClientInput,
    UpdateClientInput,
};
pub use dashboard::DashboardRepository;
pub use internet_package::{
    CreatePackageInput, InternetPackageRepository, PackageError, PackageWithClientCount,
    UpdatePackageInput,
};
pub use notification::{CreateNotificationInput, NotificationError, NotificationRepository};
pub use payment::{CreatePaymentInput, PaymentError, PaymentRepository};
pub use ticket::{CreateTicketInput, TicketError, TicketRepository, UpdateTicketInput};

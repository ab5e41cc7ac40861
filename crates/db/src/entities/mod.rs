//! `SeaORM` entity definitions.

pub mod clients;
pub mod internet_packages;
pub mod notifications;
pub mod payments;
pub mod sea_orm_active_enums;
pub mod tickets;

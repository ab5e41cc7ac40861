//! Core domain logic for the RT RW Net admin backend.
//!
//! This crate holds the pure pieces of the system:
//! - Dashboard snapshot types and the monthly revenue series computation
//! - The starter catalog inserted by the bootstrap routine
//!
//! Nothing here touches the database or the web layer.

pub mod bootstrap;
pub mod dashboard;

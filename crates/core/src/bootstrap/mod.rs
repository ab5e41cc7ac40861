//! Starter catalog for the bootstrap routine.
//!
//! When the dashboard is requested against an empty database, the bootstrap
//! routine inserts this fixed catalog so the page has something to show.
//! The data here is plain constants; the insert logic lives in the database
//! layer.

use rust_decimal::Decimal;

/// A starter internet package.
#[derive(Debug, Clone, Copy)]
pub struct StarterPackage {
    /// Unique package name.
    pub name: &'static str,
    /// Monthly price in whole rupiah.
    pub monthly_price: i64,
    /// Advertised speed label.
    pub speed: &'static str,
    /// Short description.
    pub description: &'static str,
}

impl StarterPackage {
    /// Monthly price as a decimal amount.
    #[must_use]
    pub fn price(&self) -> Decimal {
        Decimal::from(self.monthly_price)
    }
}

/// The fixed three-package catalog seeded when no packages exist.
pub const STARTER_PACKAGES: [StarterPackage; 3] = [
    StarterPackage {
        name: "Basic",
        monthly_price: 150_000,
        speed: "10 Mbps",
        description: "Basic internet package for light browsing and social media",
    },
    StarterPackage {
        name: "Standard",
        monthly_price: 250_000,
        speed: "25 Mbps",
        description: "Standard package for streaming and work from home",
    },
    StarterPackage {
        name: "Premium",
        monthly_price: 400_000,
        speed: "50 Mbps",
        description: "Premium package for heavy streaming and gaming",
    },
];

/// A starter client record.
#[derive(Debug, Clone, Copy)]
pub struct StarterClient {
    /// Client full name.
    pub name: &'static str,
    /// Street address.
    pub address: &'static str,
    /// Phone number.
    pub phone: &'static str,
    /// How many days before "today" the installation happened.
    pub installed_days_ago: i64,
}

/// The two starter clients seeded when no clients exist.
///
/// Both reference the earliest-created package; the bootstrap routine only
/// inserts them once at least one package is present.
pub const STARTER_CLIENTS: [StarterClient; 2] = [
    StarterClient {
        name: "Budi Santoso",
        address: "Jl. Merdeka No. 12, RT 03/RW 05",
        phone: "0812-3456-7890",
        installed_days_ago: 90,
    },
    StarterClient {
        name: "Siti Rahayu",
        address: "Jl. Kenanga No. 4, RT 02/RW 05",
        phone: "0813-9876-5432",
        installed_days_ago: 30,
    },
];

#[cfg(test)]
#[path = "tests.rs"]
mod tests;

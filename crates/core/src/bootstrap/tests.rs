//! Sanity checks over the starter catalog.

use std::collections::HashSet;

use rust_decimal::Decimal;

use super::{STARTER_CLIENTS, STARTER_PACKAGES};

#[test]
fn catalog_has_three_packages_with_unique_names() {
    assert_eq!(STARTER_PACKAGES.len(), 3);

    let names: HashSet<&str> = STARTER_PACKAGES.iter().map(|p| p.name).collect();
    assert_eq!(names.len(), STARTER_PACKAGES.len());
}

#[test]
fn package_prices_are_positive() {
    for package in &STARTER_PACKAGES {
        assert!(package.price() > Decimal::ZERO, "{}", package.name);
        assert!(!package.speed.is_empty());
        assert!(!package.description.is_empty());
    }
}

#[test]
fn two_starter_clients_installed_in_the_past() {
    assert_eq!(STARTER_CLIENTS.len(), 2);

    for client in &STARTER_CLIENTS {
        assert!(client.installed_days_ago > 0, "{}", client.name);
        assert!(!client.address.is_empty());
        assert!(!client.phone.is_empty());
    }
}

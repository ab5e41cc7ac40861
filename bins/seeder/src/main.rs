//! Database seeder for development and testing.
//!
//! Seeds a demo dataset: five packages (one retired), a roster of clients,
//! six months of payment history with deterministic gaps, tickets, and
//! payment notifications. Deterministic (fixed IDs, no RNG) and safe to
//! re-run; existing rows are skipped via duplicate-key tolerance.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use rtnet_db::entities::{
    clients, internet_packages, notifications, payments,
    sea_orm_active_enums::{
        ClientStatus, NotificationType, PaymentMethod, TicketPriority, TicketStatus,
    },
    tickets,
};
use rtnet_shared::PeriodMonth;

/// Demo packages: name, monthly price (rupiah), speed, description, active.
const PACKAGES: [(&str, i64, &str, &str, bool); 5] = [
    (
        "Basic",
        150_000,
        "10 Mbps",
        "Basic internet package for light browsing and social media",
        true,
    ),
    (
        "Standard",
        250_000,
        "25 Mbps",
        "Standard package for streaming and work from home",
        true,
    ),
    (
        "Premium",
        400_000,
        "50 Mbps",
        "Premium package for heavy streaming and gaming",
        true,
    ),
    (
        "Ultimate",
        600_000,
        "100 Mbps",
        "Ultimate package for businesses and heavy users",
        true,
    ),
    (
        "Legacy Basic",
        100_000,
        "5 Mbps",
        "Legacy package - no longer available",
        false,
    ),
];

/// Demo clients: name, address, phone.
const CLIENTS: [(&str, &str, &str); 12] = [
    ("Budi Santoso", "Jl. Merdeka No. 12, RT 03/RW 05", "0812-3456-7890"),
    ("Siti Rahayu", "Jl. Kenanga No. 4, RT 02/RW 05", "0813-9876-5432"),
    ("Agus Wijaya", "Jl. Melati No. 21, RT 01/RW 05", "0812-1111-2222"),
    ("Dewi Lestari", "Jl. Anggrek No. 7, RT 04/RW 05", "0815-3333-4444"),
    ("Eko Prasetyo", "Jl. Mawar No. 18, RT 03/RW 05", "0812-5555-6666"),
    ("Fitri Handayani", "Jl. Dahlia No. 2, RT 02/RW 05", "0813-7777-8888"),
    ("Gunawan Saputra", "Jl. Cempaka No. 30, RT 01/RW 05", "0812-9999-0000"),
    ("Hesti Nurjanah", "Jl. Flamboyan No. 11, RT 04/RW 05", "0815-1212-3434"),
    ("Indra Kusuma", "Jl. Teratai No. 5, RT 03/RW 05", "0812-5656-7878"),
    ("Joko Susilo", "Jl. Seroja No. 26, RT 02/RW 05", "0813-9090-1212"),
    ("Kartika Sari", "Jl. Kamboja No. 9, RT 01/RW 05", "0812-3434-5656"),
    ("Lukman Hakim", "Jl. Bougenville No. 14, RT 04/RW 05", "0815-7878-9090"),
];

/// Ticket pool rotated over clients that have one.
const TICKETS: [(&str, &str); 4] = [
    ("No internet since morning", "Connection completely down, router lights blinking red"),
    ("Slow speeds in the evening", "Download speed drops below 1 Mbps after 7pm"),
    ("Frequent disconnections", "Link drops for a few minutes several times a day"),
    ("WiFi range too short", "Signal does not reach the second floor"),
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = rtnet_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding internet packages...");
    seed_packages(&db).await;

    println!("Seeding clients...");
    seed_clients(&db).await;

    println!("Seeding payments...");
    seed_payments(&db).await;

    println!("Seeding tickets...");
    seed_tickets(&db).await;

    println!("Seeding notifications...");
    seed_notifications(&db).await;

    println!("Seeding complete!");
}

// Fixed IDs keep re-runs idempotent: a second run hits the primary key
// and is skipped.

fn package_id(index: usize) -> Uuid {
    Uuid::parse_str(&format!("00000000-0000-0000-0000-0000000001{index:02}")).unwrap()
}

fn client_id(index: usize) -> Uuid {
    Uuid::parse_str(&format!("00000000-0000-0000-0000-0000000002{index:02}")).unwrap()
}

fn payment_id(client: usize, month_back: usize) -> Uuid {
    Uuid::parse_str(&format!("00000000-0000-0000-0000-0003{client:04}{month_back:04}")).unwrap()
}

fn ticket_id(client: usize) -> Uuid {
    Uuid::parse_str(&format!("00000000-0000-0000-0000-0004{client:04}0000")).unwrap()
}

fn notification_id(client: usize, kind: usize) -> Uuid {
    Uuid::parse_str(&format!("00000000-0000-0000-0000-0005{client:04}{kind:04}")).unwrap()
}

/// Indices of active packages, in catalog order.
fn active_package_indices() -> Vec<usize> {
    PACKAGES
        .iter()
        .enumerate()
        .filter(|(_, p)| p.4)
        .map(|(i, _)| i)
        .collect()
}

/// The package a demo client subscribes to, spread across active packages.
fn assigned_package(client: usize) -> (Uuid, Decimal) {
    let active = active_package_indices();
    let index = active[client % active.len()];
    (package_id(index), Decimal::from(PACKAGES[index].1))
}

/// Whether a client has any payment history.
const fn has_payments(client: usize) -> bool {
    client % 5 != 4
}

/// Whether a client paid for the period `month_back` months ago.
const fn paid(client: usize, month_back: usize) -> bool {
    has_payments(client) && (client + month_back) % 7 != 0
}

async fn seed_packages(db: &DatabaseConnection) {
    let mut inserted = 0;
    for (index, (name, price, speed, description, is_active)) in PACKAGES.iter().enumerate() {
        let package = internet_packages::ActiveModel {
            id: Set(package_id(index)),
            name: Set((*name).to_string()),
            price: Set(Decimal::from(*price)),
            speed: Set((*speed).to_string()),
            description: Set(Some((*description).to_string())),
            is_active: Set(*is_active),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = package.insert(db).await {
            if !e.to_string().contains("duplicate key") {
                eprintln!("Failed to insert package {name}: {e}");
            }
        } else {
            inserted += 1;
        }
    }
    println!("  Inserted {inserted} packages");
}

async fn seed_clients(db: &DatabaseConnection) {
    let today = Utc::now().date_naive();
    let mut inserted = 0;

    for (index, (name, address, phone)) in CLIENTS.iter().enumerate() {
        let (package, _) = assigned_package(index);
        // Installation dates spread over roughly the last year.
        let installed = today - Duration::days(((index * 37) % 400 + 14) as i64);
        // A couple of lapsed subscribers for the inactive count.
        let status = if index % 6 == 5 {
            ClientStatus::Inactive
        } else {
            ClientStatus::Active
        };

        let client = clients::ActiveModel {
            id: Set(client_id(index)),
            name: Set((*name).to_string()),
            address: Set((*address).to_string()),
            phone: Set((*phone).to_string()),
            internet_package_id: Set(package),
            installation_date: Set(installed),
            status: Set(status),
            notes: Set(None),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = client.insert(db).await {
            if !e.to_string().contains("duplicate key") {
                eprintln!("Failed to insert client {name}: {e}");
            }
        } else {
            inserted += 1;
        }
    }
    println!("  Inserted {inserted} clients");
}

async fn seed_payments(db: &DatabaseConnection) {
    let current = PeriodMonth::from_date(Utc::now().date_naive());
    let methods = [PaymentMethod::Cash, PaymentMethod::Transfer, PaymentMethod::Other];
    let mut inserted = 0;

    for index in 0..CLIENTS.len() {
        let (_, price) = assigned_package(index);

        // Six months of history, oldest first, with deterministic gaps.
        for month_back in (0..6).rev() {
            if !paid(index, month_back) {
                continue;
            }

            let period = current.months_back(u32::try_from(month_back).unwrap_or(0));
            let pay_day = (index * 3 + month_back * 5) % 26 + 1;

            let payment = payments::ActiveModel {
                id: Set(payment_id(index, month_back)),
                client_id: Set(client_id(index)),
                amount: Set(price),
                payment_date: Set(period.first_day() + Duration::days(pay_day as i64)),
                period_month: Set(period.first_day()),
                payment_method: Set(methods[(index + month_back) % methods.len()]),
                notes: Set(None),
                created_at: Set(Utc::now().into()),
                updated_at: Set(Utc::now().into()),
            };

            if let Err(e) = payment.insert(db).await {
                if !e.to_string().contains("duplicate key") {
                    eprintln!("Failed to insert payment for client {index}: {e}");
                }
            } else {
                inserted += 1;
            }
        }
    }
    println!("  Inserted {inserted} payments (6 months, with gaps)");
}

async fn seed_tickets(db: &DatabaseConnection) {
    let mut inserted = 0;

    for index in 0..CLIENTS.len() {
        if index % 3 != 0 {
            continue;
        }

        let (title, description) = TICKETS[(index / 3) % TICKETS.len()];
        let priorities = [
            TicketPriority::Low,
            TicketPriority::Medium,
            TicketPriority::High,
            TicketPriority::Urgent,
        ];
        // Every other ticket is already resolved.
        let settled = index % 6 == 3;

        let ticket = tickets::ActiveModel {
            id: Set(ticket_id(index)),
            client_id: Set(client_id(index)),
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            priority: Set(priorities[index % priorities.len()]),
            status: Set(if settled {
                TicketStatus::Resolved
            } else {
                TicketStatus::Open
            }),
            resolution: Set(settled.then(|| "Replaced the faulty router".to_string())),
            resolved_at: Set(settled.then(|| Utc::now().into())),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = ticket.insert(db).await {
            if !e.to_string().contains("duplicate key") {
                eprintln!("Failed to insert ticket for client {index}: {e}");
            }
        } else {
            inserted += 1;
        }
    }
    println!("  Inserted {inserted} tickets");
}

async fn seed_notifications(db: &DatabaseConnection) {
    let today = Utc::now().date_naive();
    let mut inserted = 0;

    for index in 0..CLIENTS.len() {
        let (_, price) = assigned_package(index);

        // Routine reminder for half the roster.
        if index % 2 == 0 {
            let notification = notifications::ActiveModel {
                id: Set(notification_id(index, 0)),
                client_id: Set(client_id(index)),
                title: Set("Payment Reminder".to_string()),
                message: Set(format!(
                    "Your monthly payment of Rp {price} is due soon. Please pay before the due date."
                )),
                notification_type: Set(NotificationType::PaymentDue),
                is_read: Set(index % 4 == 2),
                due_date: Set(Some(today + Duration::days(3))),
                created_at: Set(Utc::now().into()),
                updated_at: Set(Utc::now().into()),
            };

            if let Err(e) = notification.insert(db).await {
                if !e.to_string().contains("duplicate key") {
                    eprintln!("Failed to insert notification for client {index}: {e}");
                }
            } else {
                inserted += 1;
            }
        }

        // Overdue notice for clients whose last period went unpaid.
        if !paid(index, 1) {
            let notification = notifications::ActiveModel {
                id: Set(notification_id(index, 1)),
                client_id: Set(client_id(index)),
                title: Set("Payment Overdue".to_string()),
                message: Set(format!(
                    "Your monthly payment of Rp {price} is overdue. Please pay immediately to avoid service disconnection."
                )),
                notification_type: Set(NotificationType::PaymentOverdue),
                is_read: Set(false),
                due_date: Set(Some(today - Duration::days(5))),
                created_at: Set(Utc::now().into()),
                updated_at: Set(Utc::now().into()),
            };

            if let Err(e) = notification.insert(db).await {
                if !e.to_string().contains("duplicate key") {
                    eprintln!("Failed to insert overdue notice for client {index}: {e}");
                }
            } else {
                inserted += 1;
            }
        }
    }
    println!("  Inserted {inserted} notifications");
}

//! # Seed Data Generator
//!
//! Populates a development database with a small, realistic salon ledger.
//!
//! ## Usage
//! ```bash
//! # Seed ./salon_dev.db with a week of appointments
//! cargo run -p salon-db --bin seed
//!
//! # Seed more days of appointments
//! cargo run -p salon-db --bin seed -- --days 14
//!
//! # Specify database path
//! cargo run -p salon-db --bin seed -- --db ./data/salon.db
//! ```
//!
//! ## Generated Data
//! - Suppliers for products, services and maintenance
//! - Staff: the three stylists plus a receptionist
//! - Inventory with a couple of items below their minimum
//! - This month's expenses (rent, wages, stock orders)
//! - Appointments on the next open days, booked through the same
//!   validation and commit path the CLI uses

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveTime};
use serde::Serialize;
use std::env;

use salon_core::booking::{validate_request, ReservationRequest};
use salon_core::{
    validation, Catalog, EmployeeRole, ExpenseCategory, Money, NewEmployee, NewExpense,
    NewInventoryItem, NewSupplier, PaymentMethod, ProductCategory, Schedule, SupplierCategory,
};
use salon_db::{Database, DbConfig, DbError};

const SUPPLIERS: &[(&str, &str, &str, SupplierCategory)] = &[
    ("Cosméticos del Sur", "María López", "+34 910 111 222", SupplierCategory::Products),
    ("Limpiezas Rápidas", "Javier Ruiz", "+34 910 333 444", SupplierCategory::Services),
    ("Técnica Salón", "Pilar Gómez", "+34 910 555 666", SupplierCategory::Maintenance),
];

/// (name, category, current, minimum, purchase, sale)
const INVENTORY: &[(&str, ProductCategory, i64, i64, i64, Option<i64>)] = &[
    ("Champú hidratante", ProductCategory::Shampoo, 12, 5, 450, Some(1200)),
    ("Champú anticaspa", ProductCategory::Shampoo, 2, 5, 520, Some(1350)),
    ("Tinte castaño 5.0", ProductCategory::Dye, 8, 6, 390, None),
    ("Tinte rubio 8.1", ProductCategory::Dye, 3, 6, 390, None),
    ("Tijeras de corte", ProductCategory::Tools, 4, 2, 3500, None),
    ("Capas de corte", ProductCategory::Accessories, 10, 4, 900, None),
];

/// (concept, category, whole units, payment method)
const EXPENSES: &[(&str, ExpenseCategory, i64, PaymentMethod)] = &[
    ("Alquiler local", ExpenseCategory::Rent, 900, PaymentMethod::Transfer),
    ("Nóminas", ExpenseCategory::Salaries, 4200, PaymentMethod::Transfer),
    ("Pedido de tintes", ExpenseCategory::Products, 180, PaymentMethod::Card),
    ("Revisión secadores", ExpenseCategory::Maintenance, 65, PaymentMethod::Cash),
];

const CLIENTS: &[(&str, &str)] = &[
    ("Lucía Fernández", "600 101 202"),
    ("Carlos Martín", "600 303 404"),
    ("Elena Sánchez", "600 505 606"),
    ("Pablo Díaz", "600 707 808"),
];

#[derive(Debug, Default, Serialize)]
struct SeedSummary {
    suppliers: usize,
    employees: usize,
    inventory_items: usize,
    expenses: usize,
    reservations: usize,
    skipped_bookings: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut days: i64 = 7;
    let mut db_path = String::from("./salon_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--days" | "-n" => {
                if i + 1 < args.len() {
                    days = args[i + 1].parse().unwrap_or(7);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Salon Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --days <N>     Days of appointments to generate (default: 7)");
                println!("  -d, --db <PATH>    Database file path (default: ./salon_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Salon Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!("Days:     {}", days);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if db.suppliers().list().await?.len() + db.employees().count().await? as usize > 0 {
        println!("⚠ Database already has data");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let today = Local::now().date_naive();
    let mut summary = SeedSummary::default();

    // Suppliers first: expenses and inventory reference them.
    let mut supplier_ids = Vec::new();
    for (name, contact, phone, category) in SUPPLIERS {
        let supplier = validation::validate_supplier(NewSupplier {
            name: name.to_string(),
            contact_person: contact.to_string(),
            phone: phone.to_string(),
            email: None,
            address: None,
            category: *category,
        })?;
        supplier_ids.push(db.suppliers().insert(supplier).await?.id);
        summary.suppliers += 1;
    }

    let catalog = Catalog::default();
    for (n, provider) in catalog.list_providers().iter().enumerate() {
        let employee = validation::validate_employee(NewEmployee {
            name: provider.clone(),
            phone: format!("611 000 {:03}", n + 1),
            email: None,
            role: EmployeeRole::Stylist,
            salary_cents: Money::from_units(1400).cents(),
            hire_date: NaiveDate::from_ymd_opt(2022, 9, 1 + n as u32).unwrap_or(today),
            schedule: Some("L-V 10:00-19:00, S 10:00-14:00".to_string()),
            commission_bps: Some(1000),
        })?;
        db.employees().insert(employee).await?;
        summary.employees += 1;
    }
    db.employees()
        .insert(validation::validate_employee(NewEmployee {
            name: "Marta Ortega".to_string(),
            phone: "611 000 100".to_string(),
            email: Some("recepcion@example.com".to_string()),
            role: EmployeeRole::Receptionist,
            salary_cents: Money::from_units(1150).cents(),
            hire_date: NaiveDate::from_ymd_opt(2023, 2, 1).unwrap_or(today),
            schedule: None,
            commission_bps: None,
        })?)
        .await?;
    summary.employees += 1;

    for (name, category, current, minimum, purchase, sale) in INVENTORY {
        let item = validation::validate_inventory_item(NewInventoryItem {
            name: name.to_string(),
            category: *category,
            current_stock: *current,
            minimum_stock: *minimum,
            purchase_price_cents: *purchase,
            sale_price_cents: *sale,
            supplier_id: supplier_ids.first().cloned(),
        })?;
        db.inventory().insert(item).await?;
        summary.inventory_items += 1;
    }

    let month_start = today.with_day(1).unwrap_or(today);
    for (n, (concept, category, units, method)) in EXPENSES.iter().enumerate() {
        let supplier_id = match category {
            ExpenseCategory::Products => supplier_ids.first().cloned(),
            ExpenseCategory::Maintenance => supplier_ids.get(2).cloned(),
            _ => None,
        };
        let expense = validation::validate_expense(NewExpense {
            concept: concept.to_string(),
            category: *category,
            amount_cents: Money::from_units(*units).cents(),
            date: (month_start + Duration::days(n as i64)).min(today),
            supplier_id,
            description: None,
            payment_method: *method,
        })?;
        db.expenses().insert(expense).await?;
        summary.expenses += 1;
    }

    let schedule = Schedule::default();
    let mut k = 0usize;
    for offset in 0..days {
        let date = today + Duration::days(offset);
        let grid = schedule.grid(date);
        if grid.is_empty() {
            continue;
        }

        for (p, provider) in catalog.list_providers().iter().enumerate() {
            for slot in [p * 2, p * 2 + 5, p * 2 + 9] {
                let Some(start) = grid.get(slot).copied() else {
                    continue;
                };
                let service = &catalog.list_services()[k % catalog.list_services().len()];
                let (client, phone) = CLIENTS[k % CLIENTS.len()];
                k += 1;

                let booked = book(
                    &db, &catalog, &schedule, today, provider, &service.name, date, start,
                    client, phone,
                )
                .await;
                match booked {
                    Ok(()) => summary.reservations += 1,
                    Err(e) => {
                        println!("⚠ Skipped {} {} {}: {}", provider, date, start, e);
                        summary.skipped_bookings += 1;
                    }
                }
            }
        }
    }

    println!();
    println!("✓ Seed complete!");
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn book(
    db: &Database,
    catalog: &Catalog,
    schedule: &Schedule,
    today: NaiveDate,
    provider: &str,
    service: &str,
    date: NaiveDate,
    start: NaiveTime,
    client: &str,
    phone: &str,
) -> Result<(), DbError> {
    let request = ReservationRequest {
        service_name: service.to_string(),
        provider_name: provider.to_string(),
        date: Some(date),
        start_time: Some(start),
        client_name: client.to_string(),
        client_phone: phone.to_string(),
        client_email: None,
    };

    let booking = validate_request(catalog, schedule, &request, today)?;
    db.reservations().commit_booking(booking).await?;
    Ok(())
}

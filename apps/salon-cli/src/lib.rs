//! # Salon CLI Library
//!
//! Front end for the salon scheduler. Parses the command line, loads the
//! configuration, opens the database and dispatches to a command.
//!
//! ## Module Organization
//! ```text
//! salon_cli/
//! ├── lib.rs             ◄─── You are here (startup & dispatch)
//! ├── cli.rs             ◄─── clap definitions
//! ├── state/
//! │   ├── mod.rs         ◄─── State type exports
//! │   ├── db.rs          ◄─── Database state wrapper
//! │   ├── config.rs      ◄─── Shop configuration (file + env)
//! │   └── booking_flow.rs◄─── Booking wizard state machine
//! ├── commands/
//! │   ├── catalog.rs     ◄─── services, providers
//! │   ├── availability.rs◄─── slots
//! │   ├── reservation.rs ◄─── book, cancel, reservations
//! │   ├── stats.rs       ◄─── stats, overview
//! │   └── ledger.rs      ◄─── expense, inventory, employee, supplier
//! └── error.rs           ◄─── API error type for commands
//! ```
//!
//! ## Output
//! Results go to stdout as pretty JSON; logs go to stderr so the two never
//! mix. A failed command prints its `ApiError` as JSON and exits with 1.

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use directories::ProjectDirs;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, EmployeeAction, ExpenseAction, InventoryAction, SupplierAction};
use commands::{availability, catalog, ledger, reservation, stats};
use error::ApiError;
use state::{ConfigError, ConfigState, DbState};
use salon_core::{NewEmployee, NewExpense, NewInventoryItem, NewSupplier, ReservationFilter};
use salon_db::{Database, DbConfig};

/// Runs one command.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                          Command Startup                                │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • salon.toml (or --config), then SALON_* environment                │
/// │     • Hours, slot step and catalog checked before anything else         │
/// │                                                                         │
/// │  2. Catalog commands answer here (no database needed)                   │
/// │                                                                         │
/// │  3. Determine Database Path ──────────────────────────────────────────► │
/// │     • --db, config database_path, SALON_DB_PATH, platform data dir      │
/// │                                                                         │
/// │  4. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode                                              │
/// │     • Run pending migrations                                            │
/// │                                                                         │
/// │  5. Dispatch & Print ─────────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ConfigState::load(cli.config.as_deref()).map_err(ApiError::from)?;
    info!(shop = %config.shop_name, "Configuration loaded");

    match &cli.command {
        Command::Services => return print_json(&catalog::list_services(&config)),
        Command::Providers => return print_json(&catalog::list_providers(&config)),
        _ => {}
    }

    let db_path = resolve_database_path(cli.db.as_deref(), &config)?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path))
        .await
        .map_err(ApiError::from)?;
    let db = DbState::new(db);

    dispatch(cli.command, &db, &config).await
}

async fn dispatch(command: Command, db: &DbState, config: &ConfigState) -> anyhow::Result<()> {
    let today = Local::now().date_naive();

    match command {
        Command::Services | Command::Providers => Ok(()),

        Command::Slots {
            date,
            provider,
            service,
        } => print_json(
            &availability::get_available_slots(db, config, date, &provider, service.as_deref())
                .await?,
        ),

        Command::Book(args) => {
            let input = reservation::BookingInput {
                service: args.service,
                provider: args.provider,
                date: args.date,
                time: args.time,
                client_name: args.name,
                client_phone: args.phone,
                client_email: args.email,
            };
            print_json(&reservation::book_at(db, config, &input, today).await?)
        }

        Command::Cancel { id } => print_json(&reservation::cancel_reservation(db, &id).await?),

        Command::Reservations { date, provider } => {
            let filter = ReservationFilter { date, provider };
            print_json(&reservation::list_reservations(db, &filter).await?)
        }

        Command::Stats { date } => {
            print_json(&stats::get_stats_snapshot(db, date.unwrap_or(today)).await?)
        }

        Command::Overview { limit } => {
            let now = Local::now().naive_local();
            print_json(&stats::provider_overview(db, config, now, limit).await?)
        }

        Command::Expense { action } => match action {
            ExpenseAction::Add {
                concept,
                category,
                amount,
                date,
                supplier_id,
                description,
                payment_method,
            } => {
                let expense = NewExpense {
                    concept,
                    category,
                    amount_cents: amount,
                    date: date.unwrap_or(today),
                    supplier_id,
                    description,
                    payment_method,
                };
                print_json(&ledger::add_expense(db, expense).await?)
            }
            ExpenseAction::List => print_json(&ledger::list_expenses(db).await?),
        },

        Command::Inventory { action } => match action {
            InventoryAction::Add {
                name,
                category,
                stock,
                minimum,
                purchase_price,
                sale_price,
                supplier_id,
            } => {
                let item = NewInventoryItem {
                    name,
                    category,
                    current_stock: stock,
                    minimum_stock: minimum,
                    purchase_price_cents: purchase_price,
                    sale_price_cents: sale_price,
                    supplier_id,
                };
                print_json(&ledger::add_inventory_item(db, item).await?)
            }
            InventoryAction::List { low } => print_json(&ledger::list_inventory(db, low).await?),
        },

        Command::Employee { action } => match action {
            EmployeeAction::Add {
                name,
                phone,
                email,
                role,
                salary,
                hire_date,
                schedule,
                commission_bps,
            } => {
                let employee = NewEmployee {
                    name,
                    phone,
                    email,
                    role,
                    salary_cents: salary,
                    hire_date: hire_date.unwrap_or(today),
                    schedule,
                    commission_bps,
                };
                print_json(&ledger::add_employee(db, employee).await?)
            }
            EmployeeAction::List => print_json(&ledger::list_employees(db).await?),
        },

        Command::Supplier { action } => match action {
            SupplierAction::Add {
                name,
                contact,
                phone,
                email,
                address,
                category,
            } => {
                let supplier = NewSupplier {
                    name,
                    contact_person: contact,
                    phone,
                    email,
                    address,
                    category,
                };
                print_json(&ledger::add_supplier(db, supplier).await?)
            }
            SupplierAction::List => print_json(&ledger::list_suppliers(db).await?),
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=salon_db=trace` - Show trace for the store only
/// - Default: INFO, with debug for the salon crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,salon=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the database file path.
///
/// ## Lookup Order
/// 1. `--db` on the command line
/// 2. `database_path` from the configuration
/// 3. `SALON_DB_PATH` environment variable
/// 4. Platform data directory:
///    - **macOS**: `~/Library/Application Support/com.salon.scheduler/salon.db`
///    - **Windows**: `%APPDATA%\salon\scheduler\data\salon.db`
///    - **Linux**: `~/.local/share/scheduler/salon.db`
pub fn resolve_database_path(
    cli_db: Option<&Path>,
    config: &ConfigState,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli_db {
        return Ok(path.to_path_buf());
    }

    if let Some(path) = &config.database_path {
        return Ok(path.clone());
    }

    if let Ok(path) = std::env::var("SALON_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("com", "salon", "scheduler")
        .ok_or_else(|| ApiError::from(ConfigError::NoDataDir))?;
    let data_dir = proj_dirs.data_dir();

    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;

    Ok(data_dir.join("salon.db"))
}

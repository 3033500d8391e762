//! # Command Line Definition
//!
//! ```text
//! salon [--config salon.toml] [--db salon.db] <COMMAND>
//!
//!   services | providers
//!   slots        --date 2025-06-10 --provider Andrés [--service "Tinte"]
//!   book         --service .. --provider .. --date .. --time 10:30 --name .. --phone ..
//!   cancel       <ID>
//!   reservations [--date ..] [--provider ..]
//!   stats        [--date ..]
//!   overview     [--limit 3]
//!   expense | inventory | employee | supplier   add .. | list
//! ```

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};

use salon_core::schedule::parse_hhmm;
use salon_core::{
    EmployeeRole, ExpenseCategory, PaymentMethod, ProductCategory, SupplierCategory,
    DEFAULT_UPCOMING_LIMIT,
};

#[derive(Debug, Parser)]
#[command(name = "salon")]
#[command(about = "Salon appointment scheduling and bookkeeping", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to ./salon.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overriding the configuration and `SALON_DB_PATH`
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the services with price and duration
    Services,

    /// List the providers
    Providers,

    /// Free start times for a provider on a date
    Slots {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        provider: String,
        /// Only starts where this service fits
        #[arg(long)]
        service: Option<String>,
    },

    /// Book an appointment
    Book(BookArgs),

    /// Cancel a reservation (kept on file as cancelled)
    Cancel { id: String },

    /// List reservations by date and time
    Reservations {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        provider: Option<String>,
    },

    /// Day and month figures
    Stats {
        /// Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Reservations per provider and their next appointments
    Overview {
        #[arg(long, default_value_t = DEFAULT_UPCOMING_LIMIT)]
        limit: usize,
    },

    /// Expense ledger
    Expense {
        #[command(subcommand)]
        action: ExpenseAction,
    },

    /// Stocked products
    Inventory {
        #[command(subcommand)]
        action: InventoryAction,
    },

    /// Staff records
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Suppliers
    Supplier {
        #[command(subcommand)]
        action: SupplierAction,
    },
}

#[derive(Debug, Args)]
pub struct BookArgs {
    #[arg(long)]
    pub service: String,
    #[arg(long)]
    pub provider: String,
    #[arg(long)]
    pub date: NaiveDate,
    /// Start time, HH:MM
    #[arg(long, value_parser = parse_time)]
    pub time: NaiveTime,
    /// Client name
    #[arg(long)]
    pub name: String,
    /// Client phone
    #[arg(long)]
    pub phone: String,
    /// Client email
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ExpenseAction {
    Add {
        #[arg(long)]
        concept: String,
        #[arg(long)]
        category: ExpenseCategory,
        /// Amount, e.g. 65 or 65.50
        #[arg(long, value_parser = parse_cents)]
        amount: i64,
        /// Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        supplier_id: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "cash")]
        payment_method: PaymentMethod,
    },
    List,
}

#[derive(Debug, Subcommand)]
pub enum InventoryAction {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: ProductCategory,
        #[arg(long)]
        stock: i64,
        #[arg(long)]
        minimum: i64,
        #[arg(long, value_parser = parse_cents)]
        purchase_price: i64,
        #[arg(long, value_parser = parse_cents)]
        sale_price: Option<i64>,
        #[arg(long)]
        supplier_id: Option<String>,
    },
    List {
        /// Only items at or below their minimum
        #[arg(long)]
        low: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum EmployeeAction {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: EmployeeRole,
        #[arg(long, value_parser = parse_cents)]
        salary: i64,
        /// Defaults to today
        #[arg(long)]
        hire_date: Option<NaiveDate>,
        /// Free text, e.g. "L-V 10:00-19:00"
        #[arg(long)]
        schedule: Option<String>,
        /// Commission in basis points (1000 = 10%)
        #[arg(long)]
        commission_bps: Option<u32>,
    },
    List,
}

#[derive(Debug, Subcommand)]
pub enum SupplierAction {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        contact: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        category: SupplierCategory,
    },
    List,
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    parse_hhmm(value).map_err(|e| e.to_string())
}

/// Parses "65", "65.5" or "65.50" into cents without going through floats.
pub fn parse_cents(value: &str) -> Result<i64, String> {
    let value = value.trim();
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

    let invalid = || format!("invalid amount '{}'", value);
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if whole.is_empty() || frac.len() > 2 || !all_digits(whole) || !all_digits(frac) {
        return Err(invalid());
    }

    let whole: i64 = whole.parse().map_err(|_| invalid())?;
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => frac.parse().map_err(|_| invalid())?,
    };

    let cents = whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac))
        .ok_or_else(invalid)?;
    Ok(if negative { -cents } else { cents })
}

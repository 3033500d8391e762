//! # salon-db: Ledger Store for the Salon Scheduler
//!
//! This crate persists reservations, expenses, inventory, staff and
//! suppliers in SQLite, and owns the atomic booking commit.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Salon Scheduler Data Flow                        │
//! │                                                                         │
//! │  CLI command (salon book ...)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  salon-core::booking::validate_request  ──►  ValidatedBooking           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     salon-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │  │   │
//! │  │   │               │    │ Reservations   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ Expenses       │    │ 001_init.sql │  │   │
//! │  │   │ BookingLocks  │    │ Inventory      │    │              │  │   │
//! │  │   │               │    │ Employees      │    │              │  │   │
//! │  │   │               │    │ Suppliers      │    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (WAL)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`locks`] - Per-(provider, date) booking locks
//! - [`error`] - Database error types
//! - [`repository`] - One repository per ledger table
//! - [`snapshot`] - Consistent read views across tables
//!
//! ## Usage
//!
//! ```rust,ignore
//! use salon_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("salon.db")).await?;
//!
//! let booking = salon_core::booking::validate_request(&catalog, &schedule, &request, today)?;
//! let reservation = db.reservations().commit_booking(booking).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod locks;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod snapshot;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use locks::BookingLocks;
pub use pool::{Database, DbConfig};
pub use snapshot::LedgerSnapshot;

// Repository re-exports for convenience
pub use repository::employee::EmployeeRepository;
pub use repository::expense::ExpenseRepository;
pub use repository::inventory::InventoryRepository;
pub use repository::reservation::ReservationRepository;
pub use repository::supplier::SupplierRepository;

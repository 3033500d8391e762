//! # Repository Module
//!
//! Database repository implementations for the salon ledger.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Command                                                               │
//! │       │                                                                 │
//! │       │  db.reservations().commit_booking(booking)                     │
//! │       ▼                                                                 │
//! │  ReservationRepository                                                 │
//! │  ├── list(&self, filter)                                               │
//! │  ├── list_in_booking_order(&self)                                      │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── commit_booking(&self, booking)                                    │
//! │  ├── cancel(&self, id)                                                 │
//! │  └── count(&self)                                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every repository holds a clone of the pool; create them freely through
//! [`crate::Database`]. Inserts take records that already passed
//! `salon_core::validation` and return the stored form with its new id.
//!
//! ## Available Repositories
//!
//! - [`ReservationRepository`](reservation::ReservationRepository) - Listing, booking commit, cancellation
//! - [`ExpenseRepository`](expense::ExpenseRepository) - Expense ledger
//! - [`InventoryRepository`](inventory::InventoryRepository) - Stock levels
//! - [`EmployeeRepository`](employee::EmployeeRepository) - Staff records
//! - [`SupplierRepository`](supplier::SupplierRepository) - Supplier directory

pub mod employee;
pub mod expense;
pub mod inventory;
pub mod reservation;
pub mod supplier;

/// Fresh UUID v4 string for a new ledger row.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

//! # State Module
//!
//! Application state shared by the commands.
//!
//! ## Why Multiple State Types?
//! Each command takes only the state it needs: catalog reads need the
//! configuration alone, ledger writes need the database alone, booking
//! needs both.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────────────┐  │
//! │  │   DbState    │  │   ConfigState    │  │   BookingFlow            │  │
//! │  │              │  │                  │  │                          │  │
//! │  │  Database    │  │  shop_name       │  │  SelectingService        │  │
//! │  │  (SQLite     │  │  schedule        │  │  SelectingProviderDate   │  │
//! │  │   pool,      │  │  catalog         │  │  SelectingTime           │  │
//! │  │   locks)     │  │  database_path   │  │  EnteringContact         │  │
//! │  │              │  │                  │  │  Confirmed               │  │
//! │  └──────────────┘  └──────────────────┘  └──────────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: Database has internal connection pool (thread-safe)        │
//! │  • ConfigState: Read-only after initialization                         │
//! │  • BookingFlow: a plain value, one per booking in progress             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod booking_flow;
mod config;
mod db;

pub use booking_flow::{BookingFlow, FlowError};
pub use self::config::{ConfigError, ConfigState};
pub use db::DbState;

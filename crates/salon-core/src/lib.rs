//! # salon-core: Pure Scheduling Logic for the Salon
//!
//! This crate is the **heart** of the salon scheduler. It decides which
//! appointment times are open, whether a booking is acceptable, and what the
//! dashboard shows, all as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Salon Scheduler Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front end (`salon` CLI)                      │   │
//! │  │  Service ──► Provider/Date ──► Time ──► Contact ──► Confirmed  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ salon-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌────────────┐ ┌──────────┐ ┌─────────┐          │   │
//! │  │  │ catalog  │ │availability│ │ booking  │ │  stats  │          │   │
//! │  │  │ schedule │ │   slots    │ │ validate │ │summarize│          │   │
//! │  │  └──────────┘ └────────────┘ └──────────┘ └─────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    salon-db (Ledger Store)                      │   │
//! │  │        SQLite, migrations, repositories, booking commit         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Reservation and ledger records
//! - [`money`] - Money type with integer arithmetic
//! - [`schedule`] - Business hours, the slot grid, time ranges
//! - [`catalog`] - Services and providers
//! - [`availability`] - Free start times for a provider and date
//! - [`booking`] - Booking request validation and conflict detection
//! - [`stats`] - Dashboard figures
//! - [`validation`] - Field rules for contact data and ledger records
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output. "Today" is a parameter.
//! 2. **No I/O**: database, network and file system access live elsewhere
//! 3. **Integer Money**: all monetary values are cents (i64)
//! 4. **Explicit Errors**: every rejection is a typed error naming its field
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use salon_core::{availability, Catalog, Schedule};
//!
//! let tuesday = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
//! let slots = availability::slots_for_service(
//!     &Schedule::default(),
//!     &Catalog::default(),
//!     tuesday,
//!     "Andrés",
//!     &[],
//!     "Corte de cabello",
//! );
//!
//! assert_eq!(slots.len(), 18); // 10:00 … 18:30
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod availability;
pub mod booking;
pub mod catalog;
pub mod error;
pub mod money;
pub mod schedule;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use salon_core::Money` instead of
// `use salon_core::money::Money`

pub use booking::{ReservationRequest, ValidatedBooking};
pub use catalog::{Catalog, Service};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use schedule::{BusinessHours, OpeningHours, Schedule, TimeRange};
pub use stats::{ProviderOverview, StatsSnapshot};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default step between candidate start times, in minutes.
pub const DEFAULT_SLOT_MINUTES: u32 = 30;

/// Upcoming appointments shown per provider in the overview.
pub const DEFAULT_UPCOMING_LIMIT: usize = 3;

/// Maximum length of names, phones and emails.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of free-text fields (descriptions, addresses).
pub const MAX_TEXT_LEN: usize = 500;

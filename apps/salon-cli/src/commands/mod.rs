//! # Commands Module
//!
//! Every operation the front end exposes. Each command takes only the state
//! it needs and returns `Result<T, ApiError>` with a serializable `T`.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs           ◄─── You are here (exports)
//! ├── catalog.rs       ◄─── list_services, list_providers
//! ├── availability.rs  ◄─── get_available_slots
//! ├── reservation.rs   ◄─── create_reservation, book, cancel, list
//! ├── stats.rs         ◄─── get_stats_snapshot, provider_overview
//! └── ledger.rs        ◄─── expenses, inventory, employees, suppliers
//! ```
//!
//! ## State Injection
//! ```rust,ignore
//! // Only needs configuration
//! fn list_services(config: &ConfigState) -> Vec<ServiceDto>
//!
//! // Only needs the database
//! async fn cancel_reservation(db: &DbState, id: &str)
//!
//! // Needs both
//! async fn create_reservation(db: &DbState, config: &ConfigState, request: &ReservationRequest)
//! ```

pub mod availability;
pub mod catalog;
pub mod ledger;
pub mod reservation;
pub mod stats;

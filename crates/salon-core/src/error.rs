//! # Error Types
//!
//! Domain-specific error types for salon-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  salon-core errors (this file)                                         │
//! │  ├── CoreError        - Booking conflicts, missing reservations        │
//! │  └── ValidationError  - Input validation failures (per field)          │
//! │                                                                         │
//! │  salon-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the caller sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Caller       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is recoverable. A rejected booking never touches the
//! ledger, so the caller can simply re-query availability and try again.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested interval overlaps an existing reservation.
    ///
    /// ## When This Occurs
    /// - The slot was booked between the availability query and submission
    /// - Two submissions raced for the same slot and this one lost
    /// - The request targets a time the client never saw as available
    ///
    /// ## User Workflow
    /// ```text
    /// Submit 10:00 with Andrés
    ///      │
    ///      ▼
    /// Existing: 10:00-10:30 (confirmed)
    ///      │
    ///      ▼
    /// SlotConflict { provider: "Andrés", start: "10:00", .. }
    ///      │
    ///      ▼
    /// UI re-queries availability and offers 10:30
    /// ```
    #[error("Time slot {start} on {date} with {provider} is no longer available")]
    SlotConflict {
        provider: String,
        date: String,
        start: String,
        /// Id of the reservation that holds the slot, when known.
        conflicting_id: Option<String>,
    },

    /// Reservation id does not exist in the ledger.
    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    /// The catalog or schedule cannot produce a consistent slot grid.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Each variant names the failing field so the caller can point at it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid phone, invalid time).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Reference to something the catalog does not know.
    #[error("Unknown {field}: '{value}'")]
    Unknown { field: String, value: String },

    /// Date lies strictly before today.
    #[error("{field} {value} is in the past")]
    InPast { field: String, value: String },

    /// Time is not a bookable start on that day's grid.
    #[error("{field} {value} is not a bookable time: {reason}")]
    OffGrid {
        field: String,
        value: String,
        reason: String,
    },
}

impl ValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. }
            | ValidationError::Unknown { field, .. }
            | ValidationError::InPast { field, .. }
            | ValidationError::OffGrid { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

//! # Database State
//!
//! Wraps the `Database` connection for use in commands.
//!
//! ## Thread Safety
//! The `Database` from `salon-db` holds a `SqlitePool` and the shared
//! booking locks, both safe to use from concurrent tasks.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn list_reservations(
//!     db: &DbState,
//!     filter: &ReservationFilter,
//! ) -> Result<Vec<Reservation>, ApiError> {
//!     Ok(db.inner().reservations().list(filter).await?)
//! }
//! ```

use salon_db::Database;

/// Wrapper around `Database` handed to every command.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}

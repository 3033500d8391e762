//! # Reservation Repository
//!
//! Listing, booking commit, and cancellation of reservations.
//!
//! ## Booking Commit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       commit_booking(booking)                           │
//! │                                                                         │
//! │  1. LOCK       BookingLocks::acquire(provider, date)                   │
//! │                └── other providers/days proceed untouched              │
//! │                                                                         │
//! │  2. RE-READ    list(provider, date)                                    │
//! │                └── check_conflict(booking, existing) → SlotConflict?   │
//! │                                                                         │
//! │  3. INSERT     INSERT … SELECT … WHERE NOT EXISTS (overlap)            │
//! │                └── one statement, atomic in SQLite, so a writer in     │
//! │                    another process cannot slip in between 2 and 3      │
//! │                                                                         │
//! │  4. RESULT     1 row  → stored Reservation (confirmed, snapshot)       │
//! │                0 rows → SlotConflict, nothing written                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Storage
//! Start times are stored as `start_minute` (minutes from midnight) so the
//! overlap test can run in SQL. Only `status` is ever updated.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::locks::BookingLocks;
use crate::repository::new_id;
use salon_core::booking::{check_conflict, ValidatedBooking};
use salon_core::schedule::{format_hhmm, minutes_of, time_at};
use salon_core::{CoreError, Reservation, ReservationFilter, ReservationStatus};

const SELECT_COLUMNS: &str = r#"
    SELECT
        id,
        service_name,
        provider_name,
        date,
        start_minute,
        duration_minutes,
        price_cents,
        client_name,
        client_phone,
        client_email,
        status,
        created_at
    FROM reservations
"#;

/// Row shape of the `reservations` table.
#[derive(Debug, sqlx::FromRow)]
struct ReservationRow {
    id: String,
    service_name: String,
    provider_name: String,
    date: NaiveDate,
    start_minute: i64,
    duration_minutes: i64,
    price_cents: i64,
    client_name: String,
    client_phone: String,
    client_email: Option<String>,
    status: ReservationStatus,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = DbError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        let corrupt = |what: &str| {
            DbError::Internal(format!("reservation {} has an invalid {}", row.id, what))
        };

        let start_time = u32::try_from(row.start_minute)
            .ok()
            .and_then(time_at)
            .ok_or_else(|| corrupt("start_minute"))?;
        let duration_minutes =
            u32::try_from(row.duration_minutes).map_err(|_| corrupt("duration_minutes"))?;

        Ok(Reservation {
            id: row.id,
            service_name: row.service_name,
            provider_name: row.provider_name,
            date: row.date,
            start_time,
            duration_minutes,
            price_cents: row.price_cents,
            client_name: row.client_name,
            client_phone: row.client_phone,
            client_email: row.client_email,
            status: row.status,
            created_at: row.created_at,
        })
    }
}

fn into_reservations(rows: Vec<ReservationRow>) -> DbResult<Vec<Reservation>> {
    rows.into_iter().map(Reservation::try_from).collect()
}

/// Every reservation in insertion order, read on the given connection.
pub(crate) async fn list_in_booking_order_on(
    conn: &mut SqliteConnection,
) -> DbResult<Vec<Reservation>> {
    let sql = format!("{} ORDER BY rowid", SELECT_COLUMNS);
    let rows: Vec<ReservationRow> = sqlx::query_as(&sql).fetch_all(&mut *conn).await?;

    into_reservations(rows)
}

/// Repository for reservation database operations.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
    locks: Arc<BookingLocks>,
}

impl ReservationRepository {
    /// Creates a new ReservationRepository.
    pub fn new(pool: SqlitePool, locks: Arc<BookingLocks>) -> Self {
        ReservationRepository { pool, locks }
    }

    /// Lists reservations matching the filter, ordered by date then start.
    ///
    /// Cancelled reservations are included; callers decide whether they
    /// count.
    pub async fn list(&self, filter: &ReservationFilter) -> DbResult<Vec<Reservation>> {
        debug!(date = ?filter.date, provider = ?filter.provider, "Listing reservations");

        let sql = format!(
            "{} WHERE (?1 IS NULL OR date = ?1) AND (?2 IS NULL OR provider_name = ?2) \
             ORDER BY date, start_minute, rowid",
            SELECT_COLUMNS
        );
        let rows: Vec<ReservationRow> = sqlx::query_as(&sql)
            .bind(filter.date)
            .bind(filter.provider.as_deref())
            .fetch_all(&self.pool)
            .await?;

        into_reservations(rows)
    }

    /// Every reservation in the order it was booked.
    ///
    /// Statistics rely on this order to break popularity ties.
    pub async fn list_in_booking_order(&self) -> DbResult<Vec<Reservation>> {
        let mut conn = self.pool.acquire().await?;
        list_in_booking_order_on(&mut conn).await
    }

    /// Gets a reservation by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Reservation>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let row: Option<ReservationRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Reservation::try_from).transpose()
    }

    /// Number of reservations that still hold their slot.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE status != 'cancelled'")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Persists a validated booking, unless the slot was taken meanwhile.
    ///
    /// ## Returns
    /// * `Ok(Reservation)` - stored, confirmed, with price/duration snapshot
    /// * `Err(DbError::Domain(CoreError::SlotConflict { .. }))` - nothing written
    pub async fn commit_booking(&self, booking: ValidatedBooking) -> DbResult<Reservation> {
        let _guard = self.locks.acquire(&booking.provider, booking.date).await;

        let existing = self
            .list(&ReservationFilter::for_slot(&booking.provider, booking.date))
            .await?;
        check_conflict(&booking, &existing)?;

        let taken = booking.slot_taken();
        let reservation = booking.into_reservation(new_id(), Utc::now());

        if !self.insert_if_free(&reservation).await? {
            debug!(
                provider = %reservation.provider_name,
                date = %reservation.date,
                "Guarded insert found the slot taken"
            );
            return Err(taken.into());
        }

        info!(
            id = %reservation.id,
            provider = %reservation.provider_name,
            date = %reservation.date,
            start = %format_hhmm(reservation.start_time),
            service = %reservation.service_name,
            "Reservation booked"
        );

        Ok(reservation)
    }

    /// Inserts the reservation only if no active reservation of the same
    /// provider and date overlaps it. Returns whether a row was written.
    async fn insert_if_free(&self, r: &Reservation) -> DbResult<bool> {
        let start = i64::from(minutes_of(r.start_time));
        let duration = i64::from(r.duration_minutes);

        let result = sqlx::query(
            r#"
            INSERT INTO reservations (
                id, service_name, provider_name, date,
                start_minute, duration_minutes, price_cents,
                client_name, client_phone, client_email,
                status, created_at
            )
            SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12
            WHERE NOT EXISTS (
                SELECT 1 FROM reservations
                WHERE provider_name = ?3
                  AND date = ?4
                  AND status != 'cancelled'
                  AND start_minute < ?5 + ?6
                  AND ?5 < start_minute + duration_minutes
            )
            "#,
        )
        .bind(&r.id)
        .bind(&r.service_name)
        .bind(&r.provider_name)
        .bind(r.date)
        .bind(start)
        .bind(duration)
        .bind(r.price_cents)
        .bind(&r.client_name)
        .bind(&r.client_phone)
        .bind(&r.client_email)
        .bind(r.status)
        .bind(r.created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Cancels a reservation. The row stays; only its status changes.
    ///
    /// Cancelling an already-cancelled reservation returns it unchanged.
    pub async fn cancel(&self, id: &str) -> DbResult<Reservation> {
        let result = sqlx::query("UPDATE reservations SET status = ?1 WHERE id = ?2")
            .bind(ReservationStatus::Cancelled)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::ReservationNotFound(id.to_string()).into());
        }

        info!(id = %id, "Reservation cancelled");

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Reservation", id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

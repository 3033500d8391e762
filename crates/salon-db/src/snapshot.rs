//! # Ledger Snapshots
//!
//! A read-only view of the whole ledger at one point in time, used when
//! several tables must agree (dashboard figures).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  db.snapshot()          BEGIN (deferred)                               │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  first SELECT ───────── WAL read mark taken here                       │
//! │      │                  writers on other connections keep committing,  │
//! │      ▼                  but nothing they write is visible below        │
//! │  more SELECTs                                                           │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  finish()               COMMIT (releases the read mark)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dropping a snapshot without `finish` rolls it back, which for a read-only
//! transaction is the same thing.

use chrono::NaiveDate;
use sqlx::{Sqlite, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::{employee, expense, inventory, reservation};
use salon_core::{Employee, Expense, InventoryItem, Reservation};

/// One read transaction over the ledger.
#[derive(Debug)]
pub struct LedgerSnapshot {
    tx: Transaction<'static, Sqlite>,
}

impl Database {
    /// Opens a consistent read view of every ledger table.
    pub async fn snapshot(&self) -> DbResult<LedgerSnapshot> {
        let tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!("Ledger snapshot opened");
        Ok(LedgerSnapshot { tx })
    }
}

impl LedgerSnapshot {
    /// Every reservation in the order it was booked.
    pub async fn reservations_in_booking_order(&mut self) -> DbResult<Vec<Reservation>> {
        reservation::list_in_booking_order_on(&mut self.tx).await
    }

    /// Expenses dated within `[from, to]`.
    pub async fn expenses_between(
        &mut self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<Vec<Expense>> {
        expense::list_between_on(&mut self.tx, from, to).await
    }

    /// All inventory items.
    pub async fn inventory(&mut self) -> DbResult<Vec<InventoryItem>> {
        inventory::list_on(&mut self.tx).await
    }

    /// All employees.
    pub async fn employees(&mut self) -> DbResult<Vec<Employee>> {
        employee::list_on(&mut self.tx).await
    }

    /// Ends the read transaction.
    pub async fn finish(self) -> DbResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;
    use salon_core::{ExpenseCategory, NewExpense, PaymentMethod};
    use std::path::PathBuf;

    /// File-backed database removed on drop; in-memory pools have a single
    /// connection, so a second writer could not run alongside the snapshot.
    struct ScratchFile(PathBuf);

    impl ScratchFile {
        fn new() -> Self {
            let name = format!("salon-snapshot-{}.db", uuid::Uuid::new_v4());
            ScratchFile(std::env::temp_dir().join(name))
        }
    }

    impl Drop for ScratchFile {
        fn drop(&mut self) {
            for suffix in ["", "-wal", "-shm"] {
                let mut path = self.0.clone().into_os_string();
                path.push(suffix);
                let _ = std::fs::remove_file(path);
            }
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(cents: i64) -> NewExpense {
        NewExpense {
            concept: "Toallas".to_string(),
            category: ExpenseCategory::Products,
            amount_cents: cents,
            date: date(2025, 6, 3),
            supplier_id: None,
            description: None,
            payment_method: PaymentMethod::Cash,
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_write_after_first_read_is_not_seen() {
        let file = ScratchFile::new();
        let db = Database::new(DbConfig::new(&file.0)).await.unwrap();
        let (from, to) = (date(2025, 6, 1), date(2025, 6, 30));

        db.expenses().insert(expense(10000)).await.unwrap();

        let mut snapshot = db.snapshot().await.unwrap();
        assert!(snapshot.reservations_in_booking_order().await.unwrap().is_empty());

        // Commits on another pool connection while the snapshot is open
        db.expenses().insert(expense(5000)).await.unwrap();

        let seen = snapshot.expenses_between(from, to).await.unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].amount_cents, 10000);
        snapshot.finish().await.unwrap();

        let after = db.expenses().list_between(from, to).await.unwrap();
        assert_eq!(after.len(), 2);

        db.close().await;
    }

    #[tokio::test]
    async fn test_snapshot_reads_every_table() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.expenses().insert(expense(2500)).await.unwrap();

        let mut snapshot = db.snapshot().await.unwrap();
        assert_eq!(
            snapshot.expenses_between(date(2025, 6, 1), date(2025, 6, 30)).await.unwrap().len(),
            1
        );
        assert!(snapshot.inventory().await.unwrap().is_empty());
        assert!(snapshot.employees().await.unwrap().is_empty());
        snapshot.finish().await.unwrap();

        // The single in-memory connection is free again
        assert_eq!(db.expenses().list().await.unwrap().len(), 1);
    }
}

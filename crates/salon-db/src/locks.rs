//! # Booking Locks
//!
//! In-process async locks keyed by (provider, date).
//!
//! ```text
//! commit_booking("Andrés", 2025-06-10) ──► lock ("Andrés", 2025-06-10) ──┐
//! commit_booking("Andrés", 2025-06-10) ──► waits ◄────────────────────────┘
//! commit_booking("Adrián", 2025-06-10) ──► lock ("Adrián", 2025-06-10)  (no contention)
//! ```
//!
//! The lock only orders writers inside this process. The guarded insert in
//! the reservation repository is what keeps other processes honest.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{Mutex, OwnedMutexGuard};

type SlotKey = (String, NaiveDate);

/// Registry of per-(provider, date) mutexes.
#[derive(Debug, Default)]
pub struct BookingLocks {
    inflight: Mutex<HashMap<SlotKey, Arc<Mutex<()>>>>,
}

impl BookingLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to one provider's day.
    ///
    /// Entries nobody holds or waits on are pruned on the way in.
    pub async fn acquire(&self, provider: &str, date: NaiveDate) -> OwnedMutexGuard<()> {
        let lock = {
            let mut inflight = self.inflight.lock().await;
            inflight.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(
                inflight
                    .entry((provider.to_string(), date))
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        lock.lock_owned().await
    }

    /// Number of keys currently tracked.
    pub async fn len(&self) -> usize {
        self.inflight.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

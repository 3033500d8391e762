//! # Statistics Commands
//!
//! Dashboard figures, recomputed from the ledger on every call.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, DbState};
use salon_core::stats::{self, ProviderOverview, StatsSnapshot};

/// First and last day of the month containing `date`.
fn month_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = date.with_day(1)?;
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

/// Snapshot of the day and month containing `as_of`.
///
/// All four ledger reads share one transaction and see the same state.
pub async fn get_stats_snapshot(db: &DbState, as_of: NaiveDate) -> Result<StatsSnapshot, ApiError> {
    debug!(%as_of, "get_stats_snapshot command");

    let (from, to) = month_bounds(as_of)
        .ok_or_else(|| ApiError::validation(format!("date out of range: {}", as_of)))?;

    let mut snapshot = db.inner().snapshot().await?;
    let reservations = snapshot.reservations_in_booking_order().await?;
    let expenses = snapshot.expenses_between(from, to).await?;
    let inventory = snapshot.inventory().await?;
    let employees = snapshot.employees().await?;
    snapshot.finish().await?;

    Ok(stats::summarize(
        as_of,
        &reservations,
        &expenses,
        &inventory,
        &employees,
    ))
}

/// Per-provider totals and the next `limit` appointments from `now`.
pub async fn provider_overview(
    db: &DbState,
    config: &ConfigState,
    now: NaiveDateTime,
    limit: usize,
) -> Result<Vec<ProviderOverview>, ApiError> {
    debug!(%now, limit, "provider_overview command");

    let reservations = db.inner().reservations().list_in_booking_order().await?;
    Ok(stats::provider_overview(&config.catalog, &reservations, now, limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::reservation::create_reservation_at;
    use chrono::NaiveTime;
    use salon_core::{
        ExpenseCategory, Money, NewExpense, NewInventoryItem, PaymentMethod, ProductCategory,
        ReservationRequest,
    };
    use salon_db::{Database, DbConfig};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup() -> (DbState, ConfigState) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (DbState::new(db), ConfigState::default())
    }

    async fn book(db: &DbState, config: &ConfigState, service: &str, provider: &str, on: NaiveDate, h: u32) {
        let request = ReservationRequest {
            service_name: service.to_string(),
            provider_name: provider.to_string(),
            date: Some(on),
            start_time: NaiveTime::from_hms_opt(h, 0, 0),
            client_name: "Elena Sánchez".to_string(),
            client_phone: "600 505 606".to_string(),
            client_email: None,
        };
        create_reservation_at(db, config, &request, on).await.unwrap();
    }

    fn expense(cents: i64, on: NaiveDate) -> NewExpense {
        NewExpense {
            concept: "Pedido".to_string(),
            category: ExpenseCategory::Products,
            amount_cents: cents,
            date: on,
            supplier_id: None,
            description: None,
            payment_method: PaymentMethod::Cash,
        }
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_bounds(date(2025, 6, 10)), Some((date(2025, 6, 1), date(2025, 6, 30))));
        assert_eq!(month_bounds(date(2025, 12, 31)), Some((date(2025, 12, 1), date(2025, 12, 31))));
        assert_eq!(month_bounds(date(2024, 2, 14)), Some((date(2024, 2, 1), date(2024, 2, 29))));
    }

    #[tokio::test]
    async fn test_profit_can_go_negative() {
        let (db, config) = setup().await;
        let today = date(2025, 6, 10);

        db.inner().expenses().insert(expense(10000, date(2025, 6, 2))).await.unwrap();
        db.inner().expenses().insert(expense(5000, today)).await.unwrap();
        // Previous month, ignored
        db.inner().expenses().insert(expense(9900, date(2025, 5, 31))).await.unwrap();
        book(&db, &config, "Corte de cabello", "Andrés", today, 10).await;

        let stats = get_stats_snapshot(&db, today).await.unwrap();
        assert_eq!(stats.reservations_today, 1);
        assert_eq!(stats.revenue_today, Money::from_units(15));
        assert_eq!(stats.expenses_this_month, Money::from_units(150));
        assert_eq!(stats.profit_this_month, Money::from_units(-135));
    }

    #[tokio::test]
    async fn test_low_stock_and_popularity() {
        let (db, config) = setup().await;
        let today = date(2025, 6, 10);

        for (name, current) in [("Champú", 2), ("Laca", 10)] {
            db.inner()
                .inventory()
                .insert(NewInventoryItem {
                    name: name.to_string(),
                    category: ProductCategory::Shampoo,
                    current_stock: current,
                    minimum_stock: 5,
                    purchase_price_cents: 300,
                    sale_price_cents: None,
                    supplier_id: None,
                })
                .await
                .unwrap();
        }

        book(&db, &config, "Tinte", "Adrián", today, 10).await;
        book(&db, &config, "Corte de cabello", "Andrés", today, 10).await;
        book(&db, &config, "Tinte", "Adrián", today, 12).await;
        book(&db, &config, "Tinte", "Alejandro", today, 15).await;

        let stats = get_stats_snapshot(&db, today).await.unwrap();
        assert_eq!(stats.low_stock_count, 1);
        assert_eq!(stats.most_popular_service.as_deref(), Some("Tinte"));
        assert_eq!(stats.total_reservations, 4);
    }

    #[tokio::test]
    async fn test_snapshot_is_idempotent() {
        let (db, config) = setup().await;
        let today = date(2025, 6, 10);
        book(&db, &config, "Peinado", "Alejandro", today, 11).await;

        let first = get_stats_snapshot(&db, today).await.unwrap();
        let second = get_stats_snapshot(&db, today).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_overview_lists_upcoming_per_provider() {
        let (db, config) = setup().await;
        let today = date(2025, 6, 10);
        book(&db, &config, "Peinado", "Andrés", today, 11).await;
        book(&db, &config, "Peinado", "Andrés", today, 14).await;

        let now = today.and_hms_opt(12, 0, 0).unwrap();
        let overview = provider_overview(&db, &config, now, 3).await.unwrap();

        assert_eq!(overview.len(), 3);
        assert_eq!(overview[0].provider, "Andrés");
        assert_eq!(overview[0].total_reservations, 2);
        assert_eq!(overview[0].upcoming.len(), 1);
        assert_eq!(overview[1].total_reservations, 0);
    }
}

//! # Statistics Aggregator
//!
//! Derives the dashboard figures from ledger snapshots. Nothing is cached;
//! every call recomputes from its inputs, so identical inputs always give an
//! identical [`StatsSnapshot`].
//!
//! ## Figures
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  reservations_today     active reservations dated as_of                │
//! │  revenue_today          Σ price snapshot of those                      │
//! │  revenue_this_month     Σ price snapshot, same month and year          │
//! │  expenses_this_month    Σ expense amounts, same month and year         │
//! │  profit_this_month      revenue − expenses (may be negative)           │
//! │  low_stock_count        items with current ≤ minimum                   │
//! │  active_employee_count  every employee on file                         │
//! │  most_popular_service   most booked, first seen wins ties              │
//! │  total_reservations     all active reservations                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "Active" means not cancelled throughout.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::money::Money;
use crate::types::{Employee, Expense, InventoryItem, Reservation};

// =============================================================================
// Snapshot
// =============================================================================

/// Dashboard figures as of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatsSnapshot {
    #[ts(as = "String")]
    pub as_of: NaiveDate,
    pub reservations_today: usize,
    pub revenue_today: Money,
    pub revenue_this_month: Money,
    pub expenses_this_month: Money,
    pub profit_this_month: Money,
    pub low_stock_count: usize,
    pub active_employee_count: usize,
    pub most_popular_service: Option<String>,
    pub total_reservations: usize,
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Computes the dashboard figures.
///
/// `reservations` should be in booking order; it decides ties for the most
/// popular service.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use salon_core::stats::summarize;
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
/// let snapshot = summarize(today, &[], &[], &[], &[]);
/// assert_eq!(snapshot.reservations_today, 0);
/// assert!(snapshot.most_popular_service.is_none());
/// ```
pub fn summarize(
    as_of: NaiveDate,
    reservations: &[Reservation],
    expenses: &[Expense],
    inventory: &[InventoryItem],
    employees: &[Employee],
) -> StatsSnapshot {
    let active: Vec<&Reservation> = reservations.iter().filter(|r| r.is_active()).collect();

    let today: Vec<&&Reservation> = active.iter().filter(|r| r.date == as_of).collect();
    let revenue_today: Money = today.iter().map(|r| r.price()).sum();

    let revenue_this_month: Money = active
        .iter()
        .filter(|r| same_month(r.date, as_of))
        .map(|r| r.price())
        .sum();

    let expenses_this_month: Money = expenses
        .iter()
        .filter(|e| same_month(e.date, as_of))
        .map(Expense::amount)
        .sum();

    StatsSnapshot {
        as_of,
        reservations_today: today.len(),
        revenue_today,
        revenue_this_month,
        expenses_this_month,
        profit_this_month: revenue_this_month - expenses_this_month,
        low_stock_count: inventory.iter().filter(|i| i.is_low_stock()).count(),
        active_employee_count: employees.len(),
        most_popular_service: most_popular_service(&active),
        total_reservations: active.len(),
    }
}

/// Most booked service; on a tie the one that appears first wins.
fn most_popular_service(active: &[&Reservation]) -> Option<String> {
    // (service, count) in order of first appearance
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for r in active {
        match counts.iter_mut().find(|(name, _)| *name == r.service_name) {
            Some((_, count)) => *count += 1,
            None => counts.push((r.service_name.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (name, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((name, count));
        }
    }
    best.map(|(name, _)| name.to_string())
}

// =============================================================================
// Provider Overview
// =============================================================================

/// One stylist's workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProviderOverview {
    pub provider: String,
    pub total_reservations: usize,
    /// Next appointments from `now`, soonest first.
    pub upcoming: Vec<Reservation>,
}

/// Per-provider totals and next appointments, in catalog order.
///
/// Appointments starting exactly at `now` count as upcoming.
pub fn provider_overview(
    catalog: &Catalog,
    reservations: &[Reservation],
    now: NaiveDateTime,
    limit: usize,
) -> Vec<ProviderOverview> {
    catalog
        .list_providers()
        .iter()
        .map(|provider| {
            let mine: Vec<&Reservation> = reservations
                .iter()
                .filter(|r| r.is_active() && &r.provider_name == provider)
                .collect();

            let mut upcoming: Vec<&Reservation> =
                mine.iter().copied().filter(|r| r.starts_at() >= now).collect();
            upcoming.sort_by_key(|r| r.starts_at());

            ProviderOverview {
                provider: provider.clone(),
                total_reservations: mine.len(),
                upcoming: upcoming.into_iter().take(limit).cloned().collect(),
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        EmployeeRole, ExpenseCategory, PaymentMethod, ProductCategory, ReservationStatus,
    };
    use chrono::{NaiveTime, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reservation(service: &str, provider: &str, day: NaiveDate, hour: u32, price: i64) -> Reservation {
        Reservation {
            id: format!("{}-{}-{}", provider, day, hour),
            service_name: service.to_string(),
            provider_name: provider.to_string(),
            date: day,
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            duration_minutes: 30,
            price_cents: Money::from_units(price).cents(),
            client_name: "Cliente".to_string(),
            client_phone: "600000000".to_string(),
            client_email: None,
            status: ReservationStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    fn expense(amount: i64, day: NaiveDate) -> Expense {
        Expense {
            id: format!("e-{}-{}", amount, day),
            concept: "Productos".to_string(),
            category: ExpenseCategory::Products,
            amount_cents: Money::from_units(amount).cents(),
            date: day,
            supplier_id: None,
            description: None,
            payment_method: PaymentMethod::Cash,
            created_at: Utc::now(),
        }
    }

    fn item(current: i64, minimum: i64) -> InventoryItem {
        InventoryItem {
            id: format!("i-{}-{}", current, minimum),
            name: "Champú".to_string(),
            category: ProductCategory::Shampoo,
            current_stock: current,
            minimum_stock: minimum,
            purchase_price_cents: 500,
            sale_price_cents: None,
            supplier_id: None,
            created_at: Utc::now(),
        }
    }

    fn employee(name: &str) -> Employee {
        Employee {
            id: name.to_string(),
            name: name.to_string(),
            phone: "600000000".to_string(),
            email: None,
            role: EmployeeRole::Stylist,
            salary_cents: 150000,
            hire_date: date(2024, 1, 1),
            schedule: None,
            commission_bps: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_revenue_expenses_and_profit() {
        let today = date(2025, 6, 10);
        let reservations = [reservation("Corte de cabello", "Andrés", today, 10, 15)];
        let expenses = [expense(100, date(2025, 6, 2)), expense(50, date(2025, 6, 9))];

        let s = summarize(today, &reservations, &expenses, &[], &[]);
        assert_eq!(s.reservations_today, 1);
        assert_eq!(s.revenue_today, Money::from_units(15));
        assert_eq!(s.revenue_this_month, Money::from_units(15));
        assert_eq!(s.expenses_this_month, Money::from_units(150));
        assert_eq!(s.profit_this_month, Money::from_units(-135));
    }

    #[test]
    fn test_month_boundaries() {
        let today = date(2025, 6, 10);
        let reservations = [
            reservation("Tinte", "Adrián", date(2025, 6, 1), 10, 45),
            reservation("Tinte", "Adrián", date(2025, 5, 31), 10, 45),
            reservation("Tinte", "Adrián", date(2024, 6, 10), 10, 45),
        ];
        let expenses = [expense(20, date(2025, 7, 1)), expense(30, date(2025, 6, 30))];

        let s = summarize(today, &reservations, &expenses, &[], &[]);
        assert_eq!(s.reservations_today, 0);
        assert_eq!(s.revenue_this_month, Money::from_units(45));
        assert_eq!(s.expenses_this_month, Money::from_units(30));
        assert_eq!(s.total_reservations, 3);
    }

    #[test]
    fn test_low_stock_and_employees() {
        let today = date(2025, 6, 10);
        let inventory = [item(2, 5), item(10, 5)];
        let employees = [employee("Andrés"), employee("Alejandro")];

        let s = summarize(today, &[], &[], &inventory, &employees);
        assert_eq!(s.low_stock_count, 1);
        assert_eq!(s.active_employee_count, 2);
    }

    #[test]
    fn test_most_popular_service() {
        let today = date(2025, 6, 10);
        let reservations = [
            reservation("Y", "Andrés", today, 10, 10),
            reservation("X", "Andrés", today, 11, 10),
            reservation("X", "Alejandro", today, 11, 10),
            reservation("X", "Adrián", today, 11, 10),
        ];
        let s = summarize(today, &reservations, &[], &[], &[]);
        assert_eq!(s.most_popular_service.as_deref(), Some("X"));
    }

    #[test]
    fn test_most_popular_tie_goes_to_first_seen() {
        let today = date(2025, 6, 10);
        let reservations = [
            reservation("Peinado", "Andrés", today, 10, 20),
            reservation("Tinte", "Andrés", today, 11, 45),
            reservation("Tinte", "Andrés", today, 12, 45),
            reservation("Peinado", "Andrés", today, 13, 20),
        ];
        let s = summarize(today, &reservations, &[], &[], &[]);
        assert_eq!(s.most_popular_service.as_deref(), Some("Peinado"));
    }

    #[test]
    fn test_cancelled_reservations_excluded() {
        let today = date(2025, 6, 10);
        let mut cancelled = reservation("Mechas", "Andrés", today, 10, 60);
        cancelled.status = ReservationStatus::Cancelled;

        let s = summarize(today, &[cancelled], &[], &[], &[]);
        assert_eq!(s.reservations_today, 0);
        assert!(s.revenue_today.is_zero());
        assert_eq!(s.most_popular_service, None);
        assert_eq!(s.total_reservations, 0);
    }

    #[test]
    fn test_summarize_is_deterministic() {
        let today = date(2025, 6, 10);
        let reservations = [reservation("Tinte", "Adrián", today, 10, 45)];
        let expenses = [expense(10, today)];

        assert_eq!(
            summarize(today, &reservations, &expenses, &[], &[]),
            summarize(today, &reservations, &expenses, &[], &[])
        );
    }

    #[test]
    fn test_provider_overview() {
        let catalog = Catalog::default();
        let now = date(2025, 6, 10).and_hms_opt(12, 0, 0).unwrap();
        let reservations = [
            reservation("Tinte", "Andrés", date(2025, 6, 11), 10, 45),
            reservation("Tinte", "Andrés", date(2025, 6, 10), 9, 45),
            reservation("Tinte", "Andrés", date(2025, 6, 10), 15, 45),
            reservation("Tinte", "Andrés", date(2025, 6, 10), 12, 45),
            reservation("Tinte", "Andrés", date(2025, 6, 12), 10, 45),
            reservation("Peinado", "Adrián", date(2025, 6, 10), 16, 20),
        ];

        let overview = provider_overview(&catalog, &reservations, now, 3);
        assert_eq!(overview.len(), 3);

        let andres = &overview[0];
        assert_eq!(andres.provider, "Andrés");
        assert_eq!(andres.total_reservations, 5);
        let starts: Vec<NaiveDateTime> = andres.upcoming.iter().map(Reservation::starts_at).collect();
        assert_eq!(
            starts,
            vec![
                date(2025, 6, 10).and_hms_opt(12, 0, 0).unwrap(),
                date(2025, 6, 10).and_hms_opt(15, 0, 0).unwrap(),
                date(2025, 6, 11).and_hms_opt(10, 0, 0).unwrap(),
            ]
        );

        assert_eq!(overview[1].provider, "Alejandro");
        assert_eq!(overview[1].total_reservations, 0);
        assert!(overview[1].upcoming.is_empty());
        assert_eq!(overview[2].total_reservations, 1);
    }
}

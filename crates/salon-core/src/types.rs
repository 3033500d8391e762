//! # Domain Types
//!
//! Records kept by the salon: reservations plus the bookkeeping ledgers.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌─────────────────┐  ┌──────────────────┐        │
//! │  │   Reservation    │  │     Expense     │  │  InventoryItem   │        │
//! │  │  ──────────────  │  │  ─────────────  │  │  ──────────────  │        │
//! │  │  id (UUID)       │  │  id (UUID)      │  │  id (UUID)       │        │
//! │  │  service_name    │  │  concept        │  │  name            │        │
//! │  │  provider_name   │  │  amount_cents   │  │  current_stock   │        │
//! │  │  date + start    │  │  supplier_id ───┼──┼─► Supplier       │        │
//! │  │  price snapshot  │  │  payment_method │  │  minimum_stock   │        │
//! │  │  status          │  └─────────────────┘  └──────────────────┘        │
//! │  └──────────────────┘                                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌─────────────────┐                              │
//! │  │     Employee     │  │    Supplier     │                              │
//! │  │  role, salary    │  │  contact, phone │                              │
//! │  │  commission_bps  │  │  category       │                              │
//! │  └──────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A reservation freezes the service's price and duration when it is booked.
//! Revenue and overlap checks read the snapshot, so editing the catalog never
//! rewrites history.
//!
//! `New*` structs are the insert forms: everything except the id and the
//! creation timestamp, which the ledger assigns.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::schedule::{hhmm, TimeRange};

fn not_allowed(field: &str, allowed: &[&str]) -> ValidationError {
    ValidationError::NotAllowed {
        field: field.to_string(),
        allowed: allowed.iter().map(|s| s.to_string()).collect(),
    }
}

// =============================================================================
// Reservation Status
// =============================================================================

/// Lifecycle of a reservation. Only this field ever changes after booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Requested but not yet confirmed (imported or legacy records).
    Pending,
    /// Accepted by the booking validator.
    Confirmed,
    /// Cancelled; frees its slot and drops out of statistics.
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for ReservationStatus {
    fn default() -> Self {
        ReservationStatus::Confirmed
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" | "canceled" => Ok(ReservationStatus::Cancelled),
            _ => Err(not_allowed("status", &["pending", "confirmed", "cancelled"])),
        }
    }
}

// =============================================================================
// Reservation
// =============================================================================

/// A booked appointment.
///
/// For a fixed (provider, date) no two non-cancelled reservations have
/// overlapping `[start, start + duration)` intervals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Reservation {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Service name as it appeared in the catalog at booking time.
    pub service_name: String,

    /// Stylist performing the service.
    pub provider_name: String,

    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Start time, always a grid point of that day.
    #[serde(with = "hhmm")]
    #[ts(as = "String")]
    pub start_time: NaiveTime,

    /// Service duration at booking time (frozen).
    pub duration_minutes: u32,

    /// Service price in cents at booking time (frozen).
    pub price_cents: i64,

    pub client_name: String,
    pub client_phone: String,
    pub client_email: Option<String>,

    pub status: ReservationStatus,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Whether the reservation still holds its slot.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status != ReservationStatus::Cancelled
    }

    /// Occupied interval in minutes from midnight.
    #[inline]
    pub fn time_range(&self) -> TimeRange {
        TimeRange::starting_at(self.start_time, self.duration_minutes)
    }

    /// Price snapshot as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Start of the appointment as a local date-time.
    #[inline]
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }
}

/// Narrows a reservation listing. Empty filter lists everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReservationFilter {
    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,
    pub provider: Option<String>,
}

impl ReservationFilter {
    /// Every reservation.
    pub fn all() -> Self {
        ReservationFilter::default()
    }

    /// Every reservation on one date.
    pub fn on(date: NaiveDate) -> Self {
        ReservationFilter {
            date: Some(date),
            provider: None,
        }
    }

    /// One provider's reservations on one date (the unit of booking).
    pub fn for_slot(provider: impl Into<String>, date: NaiveDate) -> Self {
        ReservationFilter {
            date: Some(date),
            provider: Some(provider.into()),
        }
    }

    /// Applies the filter to an in-memory reservation.
    pub fn matches(&self, reservation: &Reservation) -> bool {
        self.date.map_or(true, |d| reservation.date == d)
            && self
                .provider
                .as_deref()
                .map_or(true, |p| reservation.provider_name == p)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    /// Accepts the English names and the salon's Spanish labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" | "efectivo" => Ok(PaymentMethod::Cash),
            "card" | "tarjeta" => Ok(PaymentMethod::Card),
            "transfer" | "transferencia" => Ok(PaymentMethod::Transfer),
            _ => Err(not_allowed("payment_method", &["cash", "card", "transfer"])),
        }
    }
}

// =============================================================================
// Expense
// =============================================================================

#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Products,
    Services,
    Salaries,
    Maintenance,
    Rent,
    Other,
}

impl FromStr for ExpenseCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "products" | "productos" => Ok(ExpenseCategory::Products),
            "services" | "servicios" => Ok(ExpenseCategory::Services),
            "salaries" | "sueldos" => Ok(ExpenseCategory::Salaries),
            "maintenance" | "mantenimiento" => Ok(ExpenseCategory::Maintenance),
            "rent" | "alquiler" => Ok(ExpenseCategory::Rent),
            "other" | "otros" => Ok(ExpenseCategory::Other),
            _ => Err(not_allowed(
                "category",
                &["products", "services", "salaries", "maintenance", "rent", "other"],
            )),
        }
    }
}

/// Money paid out by the salon. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Expense {
    pub id: String,
    pub concept: String,
    pub category: ExpenseCategory,
    /// Amount in cents (never negative).
    pub amount_cents: i64,
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Supplier this was paid to, if any.
    pub supplier_id: Option<String>,
    pub description: Option<String>,
    pub payment_method: PaymentMethod,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Expense {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// Insert form of [`Expense`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewExpense {
    pub concept: String,
    pub category: ExpenseCategory,
    pub amount_cents: i64,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub supplier_id: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Inventory
// =============================================================================

#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Shampoo,
    Dye,
    Tools,
    Accessories,
    Other,
}

impl FromStr for ProductCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shampoo" => Ok(ProductCategory::Shampoo),
            "dye" | "tinte" => Ok(ProductCategory::Dye),
            "tools" | "herramientas" => Ok(ProductCategory::Tools),
            "accessories" | "accesorios" => Ok(ProductCategory::Accessories),
            "other" | "otros" => Ok(ProductCategory::Other),
            _ => Err(not_allowed(
                "category",
                &["shampoo", "dye", "tools", "accessories", "other"],
            )),
        }
    }
}

/// A stocked product (shampoo, dye, tools...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category: ProductCategory,
    pub current_stock: i64,
    pub minimum_stock: i64,
    pub purchase_price_cents: i64,
    pub sale_price_cents: Option<i64>,
    pub supplier_id: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Stock at or below its minimum. Derived, never stored.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.minimum_stock
    }
}

/// Insert form of [`InventoryItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewInventoryItem {
    pub name: String,
    pub category: ProductCategory,
    pub current_stock: i64,
    pub minimum_stock: i64,
    pub purchase_price_cents: i64,
    pub sale_price_cents: Option<i64>,
    pub supplier_id: Option<String>,
}

// =============================================================================
// Employee
// =============================================================================

#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    Stylist,
    Receptionist,
    Cleaning,
    Manager,
}

impl FromStr for EmployeeRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stylist" | "peluquero" => Ok(EmployeeRole::Stylist),
            "receptionist" | "recepcionista" => Ok(EmployeeRole::Receptionist),
            "cleaning" | "limpieza" => Ok(EmployeeRole::Cleaning),
            "manager" | "gerente" => Ok(EmployeeRole::Manager),
            _ => Err(not_allowed(
                "role",
                &["stylist", "receptionist", "cleaning", "manager"],
            )),
        }
    }
}

/// A member of staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub role: EmployeeRole,
    pub salary_cents: i64,
    #[ts(as = "String")]
    pub hire_date: NaiveDate,
    /// Free-form working hours, e.g. "L-V 10:00-19:00".
    pub schedule: Option<String>,
    /// Commission in basis points (1500 = 15%).
    pub commission_bps: Option<u32>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Insert form of [`Employee`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewEmployee {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub role: EmployeeRole,
    pub salary_cents: i64,
    #[ts(as = "String")]
    pub hire_date: NaiveDate,
    pub schedule: Option<String>,
    pub commission_bps: Option<u32>,
}

// =============================================================================
// Supplier
// =============================================================================

#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SupplierCategory {
    Products,
    Services,
    Maintenance,
    Other,
}

impl FromStr for SupplierCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "products" | "productos" => Ok(SupplierCategory::Products),
            "services" | "servicios" => Ok(SupplierCategory::Services),
            "maintenance" | "mantenimiento" => Ok(SupplierCategory::Maintenance),
            "other" | "otros" => Ok(SupplierCategory::Other),
            _ => Err(not_allowed(
                "category",
                &["products", "services", "maintenance", "other"],
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub category: SupplierCategory,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Insert form of [`Supplier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewSupplier {
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub category: SupplierCategory,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(provider: &str, date: NaiveDate, status: ReservationStatus) -> Reservation {
        Reservation {
            id: "r1".to_string(),
            service_name: "Corte de cabello".to_string(),
            provider_name: provider.to_string(),
            date,
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            duration_minutes: 30,
            price_cents: 1500,
            client_name: "Lucía".to_string(),
            client_phone: "600 123 456".to_string(),
            client_email: None,
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_reservation_derived_values() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let r = reservation("Andrés", date, ReservationStatus::Confirmed);

        assert!(r.is_active());
        assert_eq!(r.time_range(), TimeRange { start: 600, end: 630 });
        assert_eq!(r.price(), Money::from_units(15));

        let cancelled = reservation("Andrés", date, ReservationStatus::Cancelled);
        assert!(!cancelled.is_active());
    }

    #[test]
    fn test_reservation_serializes_time_as_hhmm() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let json = serde_json::to_value(reservation("Andrés", date, ReservationStatus::Confirmed))
            .unwrap();

        assert_eq!(json["start_time"], "10:00");
        assert_eq!(json["date"], "2025-06-10");
        assert_eq!(json["status"], "confirmed");
    }

    #[test]
    fn test_filter_matches() {
        let tuesday = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let wednesday = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();
        let r = reservation("Andrés", tuesday, ReservationStatus::Confirmed);

        assert!(ReservationFilter::all().matches(&r));
        assert!(ReservationFilter::on(tuesday).matches(&r));
        assert!(!ReservationFilter::on(wednesday).matches(&r));
        assert!(ReservationFilter::for_slot("Andrés", tuesday).matches(&r));
        assert!(!ReservationFilter::for_slot("Adrián", tuesday).matches(&r));
    }

    #[test]
    fn test_status_default_and_parse() {
        assert_eq!(ReservationStatus::default(), ReservationStatus::Confirmed);
        assert_eq!(
            "Canceled".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::Cancelled
        );
        assert!("done".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn test_category_parse_accepts_spanish_labels() {
        assert_eq!("sueldos".parse::<ExpenseCategory>().unwrap(), ExpenseCategory::Salaries);
        assert_eq!("tinte".parse::<ProductCategory>().unwrap(), ProductCategory::Dye);
        assert_eq!("peluquero".parse::<EmployeeRole>().unwrap(), EmployeeRole::Stylist);
        assert_eq!("Tarjeta".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!(
            "mantenimiento".parse::<SupplierCategory>().unwrap(),
            SupplierCategory::Maintenance
        );

        let err = "lottery".parse::<ExpenseCategory>().unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
        assert_eq!(err.field(), "category");
    }

    #[test]
    fn test_low_stock() {
        let mut item = InventoryItem {
            id: "i1".to_string(),
            name: "Champú".to_string(),
            category: ProductCategory::Shampoo,
            current_stock: 2,
            minimum_stock: 5,
            purchase_price_cents: 800,
            sale_price_cents: Some(1500),
            supplier_id: None,
            created_at: Utc::now(),
        };
        assert!(item.is_low_stock());

        item.current_stock = 5;
        assert!(item.is_low_stock());

        item.current_stock = 10;
        assert!(!item.is_low_stock());
    }
}

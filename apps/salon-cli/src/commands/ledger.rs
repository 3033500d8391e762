//! # Ledger Commands
//!
//! Add and list the bookkeeping records: expenses, inventory, staff and
//! suppliers. Every add runs the matching `salon_core::validation` check
//! first, so nothing malformed reaches the database.

use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::DbState;
use salon_core::validation;
use salon_core::{
    Employee, Expense, InventoryItem, NewEmployee, NewExpense, NewInventoryItem, NewSupplier,
    Supplier,
};

// =============================================================================
// Expenses
// =============================================================================

pub async fn add_expense(db: &DbState, expense: NewExpense) -> Result<Expense, ApiError> {
    debug!(concept = %expense.concept, "add_expense command");

    let expense = validation::validate_expense(expense)?;
    let stored = db.inner().expenses().insert(expense).await?;

    info!(id = %stored.id, amount_cents = stored.amount_cents, "Expense added");
    Ok(stored)
}

pub async fn list_expenses(db: &DbState) -> Result<Vec<Expense>, ApiError> {
    Ok(db.inner().expenses().list().await?)
}

// =============================================================================
// Inventory
// =============================================================================

pub async fn add_inventory_item(
    db: &DbState,
    item: NewInventoryItem,
) -> Result<InventoryItem, ApiError> {
    debug!(name = %item.name, "add_inventory_item command");

    let item = validation::validate_inventory_item(item)?;
    Ok(db.inner().inventory().insert(item).await?)
}

/// Lists inventory; with `low_only`, just the items at or below minimum.
pub async fn list_inventory(db: &DbState, low_only: bool) -> Result<Vec<InventoryItem>, ApiError> {
    let repo = db.inner().inventory();
    let items = if low_only {
        repo.list_low_stock().await?
    } else {
        repo.list().await?
    };
    Ok(items)
}

// =============================================================================
// Employees
// =============================================================================

pub async fn add_employee(db: &DbState, employee: NewEmployee) -> Result<Employee, ApiError> {
    debug!(name = %employee.name, role = ?employee.role, "add_employee command");

    let employee = validation::validate_employee(employee)?;
    Ok(db.inner().employees().insert(employee).await?)
}

pub async fn list_employees(db: &DbState) -> Result<Vec<Employee>, ApiError> {
    Ok(db.inner().employees().list().await?)
}

// =============================================================================
// Suppliers
// =============================================================================

pub async fn add_supplier(db: &DbState, supplier: NewSupplier) -> Result<Supplier, ApiError> {
    debug!(name = %supplier.name, "add_supplier command");

    let supplier = validation::validate_supplier(supplier)?;
    Ok(db.inner().suppliers().insert(supplier).await?)
}

pub async fn list_suppliers(db: &DbState) -> Result<Vec<Supplier>, ApiError> {
    Ok(db.inner().suppliers().list().await?)
}

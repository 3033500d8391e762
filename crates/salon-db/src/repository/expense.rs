//! # Expense Repository
//!
//! Append-only expense ledger. Expenses are never edited once recorded.

use chrono::{NaiveDate, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::DbResult;
use crate::repository::new_id;
use salon_core::{Expense, NewExpense};

const SELECT_COLUMNS: &str = r#"
    SELECT
        id,
        concept,
        category,
        amount_cents,
        date,
        supplier_id,
        description,
        payment_method,
        created_at
    FROM expenses
"#;

/// Repository for expense database operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    /// Creates a new ExpenseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseRepository { pool }
    }

    /// Records an expense.
    ///
    /// A `supplier_id` that names no supplier fails with
    /// `DbError::ForeignKeyViolation`.
    pub async fn insert(&self, new: NewExpense) -> DbResult<Expense> {
        let expense = Expense {
            id: new_id(),
            concept: new.concept,
            category: new.category,
            amount_cents: new.amount_cents,
            date: new.date,
            supplier_id: new.supplier_id,
            description: new.description,
            payment_method: new.payment_method,
            created_at: Utc::now(),
        };

        debug!(id = %expense.id, amount_cents = expense.amount_cents, "Inserting expense");

        sqlx::query(
            r#"
            INSERT INTO expenses (
                id, concept, category, amount_cents, date,
                supplier_id, description, payment_method, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.concept)
        .bind(expense.category)
        .bind(expense.amount_cents)
        .bind(expense.date)
        .bind(&expense.supplier_id)
        .bind(&expense.description)
        .bind(expense.payment_method)
        .bind(expense.created_at)
        .execute(&self.pool)
        .await?;

        info!(id = %expense.id, concept = %expense.concept, "Expense recorded");
        Ok(expense)
    }

    /// All expenses, most recent date first.
    pub async fn list(&self) -> DbResult<Vec<Expense>> {
        let sql = format!("{} ORDER BY date DESC, created_at DESC", SELECT_COLUMNS);
        let expenses = sqlx::query_as::<_, Expense>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(expenses)
    }

    /// Expenses dated within `[from, to]`, oldest first.
    pub async fn list_between(&self, from: NaiveDate, to: NaiveDate) -> DbResult<Vec<Expense>> {
        let mut conn = self.pool.acquire().await?;
        list_between_on(&mut conn, from, to).await
    }
}

pub(crate) async fn list_between_on(
    conn: &mut SqliteConnection,
    from: NaiveDate,
    to: NaiveDate,
) -> DbResult<Vec<Expense>> {
    debug!(%from, %to, "Listing expenses in range");

    let sql = format!(
        "{} WHERE date >= ?1 AND date <= ?2 ORDER BY date, created_at",
        SELECT_COLUMNS
    );
    let expenses = sqlx::query_as::<_, Expense>(&sql)
        .bind(from)
        .bind(to)
        .fetch_all(&mut *conn)
        .await?;

    Ok(expenses)
}

// =============================================================================
// Unit Tests
// =============================================================================

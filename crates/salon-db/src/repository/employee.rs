//! # Employee Repository

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use crate::repository::new_id;
use salon_core::{Employee, NewEmployee};

/// Repository for staff records.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    /// Creates a new EmployeeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EmployeeRepository { pool }
    }

    /// Adds an employee.
    pub async fn insert(&self, new: NewEmployee) -> DbResult<Employee> {
        let employee = Employee {
            id: new_id(),
            name: new.name,
            phone: new.phone,
            email: new.email,
            role: new.role,
            salary_cents: new.salary_cents,
            hire_date: new.hire_date,
            schedule: new.schedule,
            commission_bps: new.commission_bps,
            created_at: Utc::now(),
        };

        debug!(id = %employee.id, role = ?employee.role, "Inserting employee");

        sqlx::query(
            r#"
            INSERT INTO employees (
                id, name, phone, email, role, salary_cents,
                hire_date, schedule, commission_bps, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&employee.id)
        .bind(&employee.name)
        .bind(&employee.phone)
        .bind(&employee.email)
        .bind(employee.role)
        .bind(employee.salary_cents)
        .bind(employee.hire_date)
        .bind(&employee.schedule)
        .bind(employee.commission_bps)
        .bind(employee.created_at)
        .execute(&self.pool)
        .await?;

        Ok(employee)
    }

    /// All employees, earliest hire first.
    pub async fn list(&self) -> DbResult<Vec<Employee>> {
        let mut conn = self.pool.acquire().await?;
        list_on(&mut conn).await
    }

    /// Number of employees on file.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

pub(crate) async fn list_on(conn: &mut SqliteConnection) -> DbResult<Vec<Employee>> {
    let employees = sqlx::query_as::<_, Employee>(
        r#"
        SELECT
            id, name, phone, email, role, salary_cents,
            hire_date, schedule, commission_bps, created_at
        FROM employees
        ORDER BY hire_date, rowid
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(employees)
}

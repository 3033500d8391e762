//! # Supplier Repository
//!
//! Suppliers are referenced by expenses and inventory items through
//! `supplier_id`; the foreign keys live on those tables.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::new_id;
use salon_core::{NewSupplier, Supplier};

const SELECT_COLUMNS: &str = r#"
    SELECT
        id,
        name,
        contact_person,
        phone,
        email,
        address,
        category,
        created_at
    FROM suppliers
"#;

/// Repository for supplier database operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Adds a supplier.
    pub async fn insert(&self, new: NewSupplier) -> DbResult<Supplier> {
        let supplier = Supplier {
            id: new_id(),
            name: new.name,
            contact_person: new.contact_person,
            phone: new.phone,
            email: new.email,
            address: new.address,
            category: new.category,
            created_at: Utc::now(),
        };

        debug!(id = %supplier.id, name = %supplier.name, "Inserting supplier");

        sqlx::query(
            r#"
            INSERT INTO suppliers (
                id, name, contact_person, phone, email, address, category, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&supplier.id)
        .bind(&supplier.name)
        .bind(&supplier.contact_person)
        .bind(&supplier.phone)
        .bind(&supplier.email)
        .bind(&supplier.address)
        .bind(supplier.category)
        .bind(supplier.created_at)
        .execute(&self.pool)
        .await?;

        Ok(supplier)
    }

    /// All suppliers, alphabetically.
    pub async fn list(&self) -> DbResult<Vec<Supplier>> {
        let sql = format!("{} ORDER BY name COLLATE NOCASE, rowid", SELECT_COLUMNS);
        let suppliers = sqlx::query_as::<_, Supplier>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(suppliers)
    }

    /// Gets a supplier by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Supplier>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let supplier = sqlx::query_as::<_, Supplier>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(supplier)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

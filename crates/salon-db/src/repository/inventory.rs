//! # Inventory Repository
//!
//! Stocked products and their reorder thresholds.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use crate::repository::new_id;
use salon_core::{InventoryItem, NewInventoryItem};

const SELECT_COLUMNS: &str = r#"
    SELECT
        id,
        name,
        category,
        current_stock,
        minimum_stock,
        purchase_price_cents,
        sale_price_cents,
        supplier_id,
        created_at
    FROM inventory_items
"#;

/// Repository for inventory database operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Adds an item to the inventory.
    pub async fn insert(&self, new: NewInventoryItem) -> DbResult<InventoryItem> {
        let item = InventoryItem {
            id: new_id(),
            name: new.name,
            category: new.category,
            current_stock: new.current_stock,
            minimum_stock: new.minimum_stock,
            purchase_price_cents: new.purchase_price_cents,
            sale_price_cents: new.sale_price_cents,
            supplier_id: new.supplier_id,
            created_at: Utc::now(),
        };

        debug!(id = %item.id, name = %item.name, stock = item.current_stock, "Inserting inventory item");

        sqlx::query(
            r#"
            INSERT INTO inventory_items (
                id, name, category, current_stock, minimum_stock,
                purchase_price_cents, sale_price_cents, supplier_id, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.category)
        .bind(item.current_stock)
        .bind(item.minimum_stock)
        .bind(item.purchase_price_cents)
        .bind(item.sale_price_cents)
        .bind(&item.supplier_id)
        .bind(item.created_at)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    /// All items, alphabetically.
    pub async fn list(&self) -> DbResult<Vec<InventoryItem>> {
        let mut conn = self.pool.acquire().await?;
        list_on(&mut conn).await
    }

    /// Items at or below their minimum stock.
    ///
    /// Uses the same rule as `InventoryItem::is_low_stock`.
    pub async fn list_low_stock(&self) -> DbResult<Vec<InventoryItem>> {
        let sql = format!(
            "{} WHERE current_stock <= minimum_stock ORDER BY name COLLATE NOCASE, rowid",
            SELECT_COLUMNS
        );
        let items = sqlx::query_as::<_, InventoryItem>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }
}

pub(crate) async fn list_on(conn: &mut SqliteConnection) -> DbResult<Vec<InventoryItem>> {
    let sql = format!("{} ORDER BY name COLLATE NOCASE, rowid", SELECT_COLUMNS);
    let items = sqlx::query_as::<_, InventoryItem>(&sql)
        .fetch_all(&mut *conn)
        .await?;

    Ok(items)
}

// =============================================================================
// Unit Tests
// =============================================================================

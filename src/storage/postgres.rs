//! PostgreSQL-backed inventory store.

use super::{InventoryStore, StoreError, StoreResult};
use crate::domain::{
    InventoryLogEntry, NewInventoryLog, NewPriceChange, PriceChangeEntry, Product, ProductDraft,
    ProductPatch,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

const PRODUCT_COLUMNS: &str = "id, barcode, name, category, description, image_url, sku, \
     price, cost, stock, min_stock, is_active, created_at, updated_at";

const INVENTORY_LOG_COLUMNS: &str =
    "id, product_id, previous_stock, new_stock, change_amount, reason, changed_by, changed_at";

const PRICE_CHANGE_COLUMNS: &str =
    "id, product_id, previous_price, new_price, reason, changed_by, changed_at";

// No foreign key on the log tables: history survives a hard delete.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS products (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        barcode TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        category TEXT,
        description TEXT,
        image_url TEXT,
        sku TEXT,
        price NUMERIC(12, 2) NOT NULL CHECK (price >= 0),
        cost NUMERIC(12, 2) CHECK (cost >= 0),
        stock INTEGER NOT NULL DEFAULT 0 CHECK (stock >= 0),
        min_stock INTEGER NOT NULL DEFAULT 0 CHECK (min_stock >= 0),
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS inventory_logs (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        product_id UUID NOT NULL,
        previous_stock INTEGER NOT NULL,
        new_stock INTEGER NOT NULL,
        change_amount INTEGER NOT NULL,
        reason TEXT NOT NULL,
        changed_by TEXT,
        changed_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE INDEX IF NOT EXISTS inventory_logs_product_changed_at
        ON inventory_logs (product_id, changed_at DESC)",
    "CREATE TABLE IF NOT EXISTS price_changes (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        product_id UUID NOT NULL,
        previous_price NUMERIC(12, 2) NOT NULL,
        new_price NUMERIC(12, 2) NOT NULL,
        reason TEXT NOT NULL,
        changed_by TEXT,
        changed_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE INDEX IF NOT EXISTS price_changes_product_changed_at
        ON price_changes (product_id, changed_at DESC)",
];

/// Maps a unique-constraint violation to [`StoreError::Conflict`].
fn classify(err: sqlx::Error, conflict: impl FnOnce() -> String) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict(conflict()),
        _ => StoreError::Database(err),
    }
}

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects and makes sure the three tables exist.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("inventory schema is in place");
        Ok(())
    }
}

#[async_trait]
impl InventoryStore for PostgresStore {
    async fn product_by_id(&self, id: Uuid) -> StoreResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        Ok(sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn product_by_barcode(&self, barcode: &str) -> StoreResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE barcode = $1", PRODUCT_COLUMNS);
        Ok(sqlx::query_as::<_, Product>(&sql)
            .bind(barcode)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn active_products(&self) -> StoreResult<Vec<Product>> {
        let sql = format!(
            "SELECT {} FROM products WHERE is_active ORDER BY created_at",
            PRODUCT_COLUMNS
        );
        Ok(sqlx::query_as::<_, Product>(&sql).fetch_all(&self.pool).await?)
    }

    async fn low_stock_products(&self) -> StoreResult<Vec<Product>> {
        let sql = format!(
            "SELECT {} FROM products WHERE is_active AND stock < min_stock ORDER BY stock ASC",
            PRODUCT_COLUMNS
        );
        Ok(sqlx::query_as::<_, Product>(&sql).fetch_all(&self.pool).await?)
    }

    async fn insert_product(&self, draft: &ProductDraft) -> StoreResult<Product> {
        let sql = format!(
            "INSERT INTO products
                (barcode, name, category, description, image_url, sku, price, cost, stock, min_stock, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {}",
            PRODUCT_COLUMNS
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(&draft.barcode)
            .bind(&draft.name)
            .bind(&draft.category)
            .bind(&draft.description)
            .bind(&draft.image_url)
            .bind(&draft.sku)
            .bind(draft.price)
            .bind(draft.cost)
            .bind(draft.stock)
            .bind(draft.min_stock)
            .bind(draft.is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                classify(e, || {
                    format!("A product with barcode {} already exists", draft.barcode)
                })
            })
    }

    async fn update_product(
        &self,
        id: Uuid,
        patch: &ProductPatch,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Product>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE products SET updated_at = ");
        qb.push_bind(updated_at);

        if let Some(name) = &patch.name {
            qb.push(", name = ").push_bind(name.clone());
        }
        if let Some(category) = &patch.category {
            qb.push(", category = ").push_bind(category.clone());
        }
        if let Some(description) = &patch.description {
            qb.push(", description = ").push_bind(description.clone());
        }
        if let Some(image_url) = &patch.image_url {
            qb.push(", image_url = ").push_bind(image_url.clone());
        }
        if let Some(sku) = &patch.sku {
            qb.push(", sku = ").push_bind(sku.clone());
        }
        if let Some(price) = patch.price {
            qb.push(", price = ").push_bind(price);
        }
        if let Some(cost) = patch.cost {
            qb.push(", cost = ").push_bind(cost);
        }
        if let Some(stock) = patch.stock {
            qb.push(", stock = ").push_bind(stock);
        }
        if let Some(min_stock) = patch.min_stock {
            qb.push(", min_stock = ").push_bind(min_stock);
        }
        if let Some(is_active) = patch.is_active {
            qb.push(", is_active = ").push_bind(is_active);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING ").push(PRODUCT_COLUMNS);

        Ok(qb
            .build_query_as::<Product>()
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_product(&self, id: Uuid) -> StoreResult<Option<Product>> {
        let sql = format!("DELETE FROM products WHERE id = $1 RETURNING {}", PRODUCT_COLUMNS);
        Ok(sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_inventory_log(
        &self,
        entry: &NewInventoryLog,
    ) -> StoreResult<InventoryLogEntry> {
        let sql = format!(
            "INSERT INTO inventory_logs
                (product_id, previous_stock, new_stock, change_amount, reason, changed_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {}",
            INVENTORY_LOG_COLUMNS
        );
        Ok(sqlx::query_as::<_, InventoryLogEntry>(&sql)
            .bind(entry.product_id)
            .bind(entry.previous_stock)
            .bind(entry.new_stock)
            .bind(entry.change_amount)
            .bind(&entry.reason)
            .bind(&entry.changed_by)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn insert_price_change(&self, entry: &NewPriceChange) -> StoreResult<PriceChangeEntry> {
        let sql = format!(
            "INSERT INTO price_changes
                (product_id, previous_price, new_price, reason, changed_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            PRICE_CHANGE_COLUMNS
        );
        Ok(sqlx::query_as::<_, PriceChangeEntry>(&sql)
            .bind(entry.product_id)
            .bind(entry.previous_price)
            .bind(entry.new_price)
            .bind(&entry.reason)
            .bind(&entry.changed_by)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn inventory_logs(
        &self,
        product_id: Option<Uuid>,
    ) -> StoreResult<Vec<InventoryLogEntry>> {
        let sql = format!(
            "SELECT {} FROM inventory_logs
             WHERE $1::uuid IS NULL OR product_id = $1
             ORDER BY changed_at DESC",
            INVENTORY_LOG_COLUMNS
        );
        Ok(sqlx::query_as::<_, InventoryLogEntry>(&sql)
            .bind(product_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn price_changes(&self, product_id: Option<Uuid>) -> StoreResult<Vec<PriceChangeEntry>> {
        let sql = format!(
            "SELECT {} FROM price_changes
             WHERE $1::uuid IS NULL OR product_id = $1
             ORDER BY changed_at DESC",
            PRICE_CHANGE_COLUMNS
        );
        Ok(sqlx::query_as::<_, PriceChangeEntry>(&sql)
            .bind(product_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

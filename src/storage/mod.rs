//! Storage collaborator for the inventory core.
//!
//! The core only needs simple CRUD against three tables. A fetch that matches no row is
//! `Ok(None)`, never an error.

use crate::domain::{
    InventoryLogEntry, NewInventoryLog, NewPriceChange, PriceChangeEntry, Product, ProductDraft,
    ProductPatch,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// A uniqueness rule rejected the write (duplicate barcode).
    #[error("{0}")]
    Conflict(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Trait that any backing store for products and their audit logs must implement.
///
/// Listings of log entries are ordered newest-first by `changed_at`.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn product_by_id(&self, id: Uuid) -> StoreResult<Option<Product>>;

    async fn product_by_barcode(&self, barcode: &str) -> StoreResult<Option<Product>>;

    async fn active_products(&self) -> StoreResult<Vec<Product>>;

    /// Active products with `stock < min_stock`, lowest stock first.
    async fn low_stock_products(&self) -> StoreResult<Vec<Product>>;

    async fn insert_product(&self, draft: &ProductDraft) -> StoreResult<Product>;

    /// Writes only the fields present in `patch`, plus `updated_at`.
    async fn update_product(
        &self,
        id: Uuid,
        patch: &ProductPatch,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Product>>;

    async fn delete_product(&self, id: Uuid) -> StoreResult<Option<Product>>;

    async fn insert_inventory_log(&self, entry: &NewInventoryLog) -> StoreResult<InventoryLogEntry>;

    async fn insert_price_change(&self, entry: &NewPriceChange) -> StoreResult<PriceChangeEntry>;

    async fn inventory_logs(&self, product_id: Option<Uuid>) -> StoreResult<Vec<InventoryLogEntry>>;

    async fn price_changes(&self, product_id: Option<Uuid>) -> StoreResult<Vec<PriceChangeEntry>>;

    /// Cheap connectivity probe for health checks.
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

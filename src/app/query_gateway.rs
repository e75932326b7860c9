//! Read-only lookups over products and both audit logs.

use crate::domain::{InventoryError, InventoryLogEntry, InventoryResult, PriceChangeEntry, Product};
use crate::storage::InventoryStore;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

#[derive(Clone)]
pub struct QueryGateway {
    store: Arc<dyn InventoryStore>,
}

impl QueryGateway {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Zero-or-one lookup; a miss is `Ok(None)`.
    pub async fn find_product(&self, id: Uuid) -> InventoryResult<Option<Product>> {
        Ok(self.store.product_by_id(id).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> InventoryResult<Product> {
        debug!("looking up product");
        self.find_product(id)
            .await?
            .ok_or_else(|| InventoryError::product_not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn get_product_by_barcode(&self, barcode: &str) -> InventoryResult<Product> {
        debug!("looking up product by barcode");
        self.store
            .product_by_barcode(barcode)
            .await?
            .ok_or_else(|| InventoryError::NotFound(format!("product with barcode {}", barcode)))
    }

    pub async fn list_active_products(&self) -> InventoryResult<Vec<Product>> {
        Ok(self.store.active_products().await?)
    }

    pub async fn list_low_stock_products(&self) -> InventoryResult<Vec<Product>> {
        Ok(self.store.low_stock_products().await?)
    }

    /// Newest first. `None` lists every product's entries.
    pub async fn list_inventory_logs(
        &self,
        product_id: Option<Uuid>,
    ) -> InventoryResult<Vec<InventoryLogEntry>> {
        Ok(self.store.inventory_logs(product_id).await?)
    }

    /// Newest first. `None` lists every product's entries.
    pub async fn list_price_changes(
        &self,
        product_id: Option<Uuid>,
    ) -> InventoryResult<Vec<PriceChangeEntry>> {
        Ok(self.store.price_changes(product_id).await?)
    }
}

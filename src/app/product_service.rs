//! Product mutation service.
//!
//! Every write to price or stock goes through [`ProductService::update_product`], which
//! captures the pre-image, applies the partial update, and then hands both fields to the
//! audit log writer.

use crate::app::audit_log::AuditLogWriter;
use crate::app::query_gateway::QueryGateway;
use crate::domain::{InventoryError, InventoryResult, NewProduct, Product, ProductPatch};
use crate::storage::InventoryStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn InventoryStore>,
    queries: QueryGateway,
    audit: AuditLogWriter,
}

impl ProductService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self {
            queries: QueryGateway::new(store.clone()),
            audit: AuditLogWriter::new(store.clone()),
            store,
        }
    }

    /// Inserts a product. Initial price and stock are not audited; the trail starts at the
    /// first change.
    #[instrument(skip(self, product), fields(barcode = ?product.barcode))]
    pub async fn create_product(&self, product: NewProduct) -> InventoryResult<Product> {
        let draft = product.validate()?;
        let created = self.store.insert_product(&draft).await?;
        info!(product_id = %created.id, "product created");
        Ok(created)
    }

    /// Applies `patch` to product `id` and audits price/stock moves on behalf of `actor`.
    ///
    /// Order: validate, fetch pre-image, update, then the two audit appends (which run
    /// concurrently and never fail the call).
    #[instrument(skip(self, patch))]
    pub async fn update_product(
        &self,
        id: Uuid,
        patch: ProductPatch,
        actor: Option<&str>,
    ) -> InventoryResult<Product> {
        patch.validate()?;

        let before = self
            .queries
            .find_product(id)
            .await?
            .ok_or_else(|| InventoryError::product_not_found(id))?;

        let updated = self
            .store
            .update_product(id, &patch, Utc::now())
            .await?
            .ok_or_else(|| InventoryError::product_not_found(id))?;

        let (price, stock) = tokio::join!(
            self.audit.record_price(id, before.price, patch.price, actor),
            self.audit.record_stock(id, before.stock, patch.stock, actor),
        );
        info!(?price, ?stock, "product updated");

        Ok(updated)
    }

    /// Hides the product from active listings without touching its history.
    pub async fn deactivate_product(
        &self,
        id: Uuid,
        actor: Option<&str>,
    ) -> InventoryResult<Product> {
        self.update_product(id, ProductPatch::activation(false), actor).await
    }

    pub async fn reactivate_product(
        &self,
        id: Uuid,
        actor: Option<&str>,
    ) -> InventoryResult<Product> {
        self.update_product(id, ProductPatch::activation(true), actor).await
    }

    /// Permanently removes the product. Audit entries referencing it are left in place.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> InventoryResult<Product> {
        let deleted = self
            .store
            .delete_product(id)
            .await?
            .ok_or_else(|| InventoryError::product_not_found(id))?;
        info!(barcode = %deleted.barcode, "product deleted");
        Ok(deleted)
    }
}

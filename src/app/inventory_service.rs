//! The inventory service: one handle over mutations, lookups and reporting.

use crate::app::product_service::ProductService;
use crate::app::query_gateway::QueryGateway;
use crate::domain::report::build_report;
use crate::domain::{
    InventoryLogEntry, InventoryResult, NewProduct, PriceChangeEntry, Product, ProductPatch,
    ReportView,
};
use crate::storage::{InventoryStore, StoreResult};
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Stateless between calls; cloning is cheap and all clones share the same store.
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
    products: ProductService,
    queries: QueryGateway,
}

impl InventoryService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self {
            products: ProductService::new(store.clone()),
            queries: QueryGateway::new(store.clone()),
            store,
        }
    }

    pub async fn ping(&self) -> StoreResult<()> {
        self.store.ping().await
    }

    pub async fn create_product(&self, product: NewProduct) -> InventoryResult<Product> {
        self.products.create_product(product).await
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        patch: ProductPatch,
        actor: Option<&str>,
    ) -> InventoryResult<Product> {
        self.products.update_product(id, patch, actor).await
    }

    pub async fn deactivate_product(
        &self,
        id: Uuid,
        actor: Option<&str>,
    ) -> InventoryResult<Product> {
        self.products.deactivate_product(id, actor).await
    }

    pub async fn reactivate_product(
        &self,
        id: Uuid,
        actor: Option<&str>,
    ) -> InventoryResult<Product> {
        self.products.reactivate_product(id, actor).await
    }

    pub async fn delete_product(&self, id: Uuid) -> InventoryResult<Product> {
        self.products.delete_product(id).await
    }

    pub async fn get_product(&self, id: Uuid) -> InventoryResult<Product> {
        self.queries.get_product(id).await
    }

    pub async fn get_product_by_barcode(&self, barcode: &str) -> InventoryResult<Product> {
        self.queries.get_product_by_barcode(barcode).await
    }

    pub async fn list_active_products(&self) -> InventoryResult<Vec<Product>> {
        self.queries.list_active_products().await
    }

    pub async fn list_low_stock_products(&self) -> InventoryResult<Vec<Product>> {
        self.queries.list_low_stock_products().await
    }

    pub async fn list_inventory_logs(
        &self,
        product_id: Option<Uuid>,
    ) -> InventoryResult<Vec<InventoryLogEntry>> {
        self.queries.list_inventory_logs(product_id).await
    }

    pub async fn list_price_changes(
        &self,
        product_id: Option<Uuid>,
    ) -> InventoryResult<Vec<PriceChangeEntry>> {
        self.queries.list_price_changes(product_id).await
    }

    /// Loads active products and both full logs, then aggregates them.
    #[instrument(skip(self))]
    pub async fn report(&self) -> InventoryResult<ReportView> {
        let (products, logs, price_changes) = tokio::try_join!(
            self.queries.list_active_products(),
            self.queries.list_inventory_logs(None),
            self.queries.list_price_changes(None),
        )?;
        debug!(
            products = products.len(),
            logs = logs.len(),
            price_changes = price_changes.len(),
            "building report"
        );
        Ok(build_report(&products, &logs, &price_changes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InventoryError;
    use crate::storage::MemoryStore;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn report_reflects_an_audited_update() {
        let service = InventoryService::new(Arc::new(MemoryStore::new()));
        let product = service
            .create_product(
                NewProduct::new("5449000000996", "Cola 330ml", dec!(10.00)).with_stock(5, 3),
            )
            .await
            .unwrap();
        service
            .create_product(
                NewProduct::new("5449000000997", "Water 500ml", dec!(1.00)).with_stock(10, 2),
            )
            .await
            .unwrap();

        let patch = ProductPatch {
            price: Some(dec!(12.00)),
            stock: Some(2),
            ..ProductPatch::default()
        };
        service.update_product(product.id, patch, Some("alice")).await.unwrap();

        let report = service.report().await.unwrap();
        assert_eq!(report.total_products, 2);
        assert_eq!(report.low_stock_count, 1);
        assert_eq!(report.stock_status.low, 1);
        assert_eq!(report.stock_status.optimal, 1);
        assert_eq!(report.inventory_value, dec!(34.00));
        assert_eq!(report.total_recent_changes, 2);
        assert_eq!(report.most_edited_products[0].name, "Cola 330ml");
        assert_eq!(report.most_edited_products[0].changes, 2);
        assert_eq!(report.activity_by_user[0].name, "alice");
        assert_eq!(report.activity_by_user[0].changes, 2);
        assert_eq!(report.recent_price_changes[0].percent_change, Some(dec!(20.00)));
        assert_eq!(report.recent_stock_adjustments[0].change, -3);
    }

    #[tokio::test]
    async fn deleted_products_show_as_unknown_in_reports() {
        let service = InventoryService::new(Arc::new(MemoryStore::new()));
        let product = service
            .create_product(NewProduct::new("111", "Gone soon", dec!(2.00)).with_stock(1, 0))
            .await
            .unwrap();
        service
            .update_product(product.id, ProductPatch::stock(0), Some("bob"))
            .await
            .unwrap();
        service.delete_product(product.id).await.unwrap();

        let report = service.report().await.unwrap();
        assert_eq!(report.total_products, 0);
        assert_eq!(report.recent_stock_adjustments[0].product, "Unknown");
        assert_eq!(report.most_edited_products[0].name, "Unknown");
    }

    #[tokio::test]
    async fn barcode_miss_is_not_found() {
        let service = InventoryService::new(Arc::new(MemoryStore::new()));
        let err = service.get_product_by_barcode("000").await.unwrap_err();
        assert!(matches!(err, InventoryError::NotFound(_)));
    }
}

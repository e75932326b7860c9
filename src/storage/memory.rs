//! In-process store backed by maps behind a `tokio` lock.
//!
//! Used by the test suites and for running the API without a database. Enforces the same
//! barcode uniqueness rule as the Postgres schema.

use super::{InventoryStore, StoreError, StoreResult};
use crate::domain::{
    InventoryLogEntry, NewInventoryLog, NewPriceChange, PriceChangeEntry, Product, ProductDraft,
    ProductPatch,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    products: IndexMap<Uuid, Product>,
    inventory_logs: Vec<InventoryLogEntry>,
    price_changes: Vec<PriceChangeEntry>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn product_count(&self) -> usize {
        self.tables.read().await.products.len()
    }
}

fn newest_first<T: Clone>(
    rows: impl DoubleEndedIterator<Item = T>,
    at: impl Fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
    // reverse insertion order first so equal timestamps still list the latest append first
    let mut out: Vec<T> = rows.rev().collect();
    out.sort_by(|a, b| at(b).cmp(&at(a)));
    out
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn product_by_id(&self, id: Uuid) -> StoreResult<Option<Product>> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn product_by_barcode(&self, barcode: &str) -> StoreResult<Option<Product>> {
        let tables = self.tables.read().await;
        Ok(tables.products.values().find(|p| p.barcode == barcode).cloned())
    }

    async fn active_products(&self) -> StoreResult<Vec<Product>> {
        let tables = self.tables.read().await;
        Ok(tables.products.values().filter(|p| p.is_active).cloned().collect())
    }

    async fn low_stock_products(&self) -> StoreResult<Vec<Product>> {
        let tables = self.tables.read().await;
        let mut low: Vec<Product> = tables
            .products
            .values()
            .filter(|p| p.is_active && p.is_below_minimum())
            .cloned()
            .collect();
        low.sort_by_key(|p| p.stock);
        Ok(low)
    }

    async fn insert_product(&self, draft: &ProductDraft) -> StoreResult<Product> {
        let mut tables = self.tables.write().await;
        if tables.products.values().any(|p| p.barcode == draft.barcode) {
            return Err(StoreError::Conflict(format!(
                "A product with barcode {} already exists",
                draft.barcode
            )));
        }
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            barcode: draft.barcode.clone(),
            name: draft.name.clone(),
            category: draft.category.clone(),
            description: draft.description.clone(),
            image_url: draft.image_url.clone(),
            sku: draft.sku.clone(),
            price: draft.price,
            cost: draft.cost,
            stock: draft.stock,
            min_stock: draft.min_stock,
            is_active: draft.is_active,
            created_at: now,
            updated_at: now,
        };
        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: Uuid,
        patch: &ProductPatch,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Product>> {
        let mut tables = self.tables.write().await;
        let Some(product) = tables.products.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply_to(product);
        product.updated_at = updated_at;
        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, id: Uuid) -> StoreResult<Option<Product>> {
        Ok(self.tables.write().await.products.shift_remove(&id))
    }

    async fn insert_inventory_log(
        &self,
        entry: &NewInventoryLog,
    ) -> StoreResult<InventoryLogEntry> {
        let row = InventoryLogEntry {
            id: Uuid::new_v4(),
            product_id: entry.product_id,
            previous_stock: entry.previous_stock,
            new_stock: entry.new_stock,
            change_amount: entry.change_amount,
            reason: entry.reason.clone(),
            changed_by: Some(entry.changed_by.clone()),
            changed_at: Utc::now(),
        };
        self.tables.write().await.inventory_logs.push(row.clone());
        Ok(row)
    }

    async fn insert_price_change(&self, entry: &NewPriceChange) -> StoreResult<PriceChangeEntry> {
        let row = PriceChangeEntry {
            id: Uuid::new_v4(),
            product_id: entry.product_id,
            previous_price: entry.previous_price,
            new_price: entry.new_price,
            reason: entry.reason.clone(),
            changed_by: Some(entry.changed_by.clone()),
            changed_at: Utc::now(),
        };
        self.tables.write().await.price_changes.push(row.clone());
        Ok(row)
    }

    async fn inventory_logs(
        &self,
        product_id: Option<Uuid>,
    ) -> StoreResult<Vec<InventoryLogEntry>> {
        let tables = self.tables.read().await;
        let rows = tables
            .inventory_logs
            .iter()
            .filter(|l| product_id.map_or(true, |id| l.product_id == id))
            .cloned()
            .collect::<Vec<_>>();
        Ok(newest_first(rows.into_iter(), |l| l.changed_at))
    }

    async fn price_changes(&self, product_id: Option<Uuid>) -> StoreResult<Vec<PriceChangeEntry>> {
        let tables = self.tables.read().await;
        let rows = tables
            .price_changes
            .iter()
            .filter(|c| product_id.map_or(true, |id| c.product_id == id))
            .cloned()
            .collect::<Vec<_>>();
        Ok(newest_first(rows.into_iter(), |c| c.changed_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewProduct;
    use rust_decimal_macros::dec;

    fn draft(barcode: &str, stock: i32, min_stock: i32) -> ProductDraft {
        NewProduct::new(barcode, format!("Item {}", barcode), dec!(1.00))
            .with_stock(stock, min_stock)
            .validate()
            .unwrap()
    }

    #[tokio::test]
    async fn duplicate_barcode_is_a_conflict() {
        let store = MemoryStore::new();
        store.insert_product(&draft("111", 1, 0)).await.unwrap();
        let err = store.insert_product(&draft("111", 2, 0)).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.product_count().await, 1);
    }

    #[tokio::test]
    async fn low_stock_lists_active_products_lowest_first() {
        let store = MemoryStore::new();
        store.insert_product(&draft("a", 2, 5)).await.unwrap();
        store.insert_product(&draft("b", 1, 5)).await.unwrap();
        store.insert_product(&draft("c", 9, 5)).await.unwrap();
        let hidden = store.insert_product(&draft("d", 0, 5)).await.unwrap();
        store
            .update_product(hidden.id, &ProductPatch::activation(false), Utc::now())
            .await
            .unwrap();

        let low = store.low_stock_products().await.unwrap();
        let barcodes: Vec<&str> = low.iter().map(|p| p.barcode.as_str()).collect();
        assert_eq!(barcodes, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn logs_are_listed_newest_first_and_filtered() {
        let store = MemoryStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        store.insert_inventory_log(&NewInventoryLog::manual(a, 0, 1, None)).await.unwrap();
        store.insert_inventory_log(&NewInventoryLog::manual(b, 0, 2, None)).await.unwrap();
        store.insert_inventory_log(&NewInventoryLog::manual(a, 1, 3, None)).await.unwrap();

        let all = store.inventory_logs(None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].new_stock, 3);

        let only_a = store.inventory_logs(Some(a)).await.unwrap();
        assert_eq!(only_a.iter().map(|l| l.new_stock).collect::<Vec<_>>(), vec![3, 1]);
    }
}

//! Audit log writer.
//!
//! Appends a history row when an update actually moves a price or a stock level. A failed
//! append is logged and swallowed: losing an audit row is acceptable, failing the product
//! update that already committed is not.

use crate::domain::{AuditKind, NewInventoryLog, NewPriceChange};
use crate::storage::InventoryStore;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// What happened to one audited field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    /// The field was not part of the request.
    Untouched,
    /// The new value equals the old one.
    Unchanged,
    Recorded,
    /// The append failed; the error was logged.
    Dropped,
}

#[derive(Clone)]
pub struct AuditLogWriter {
    store: Arc<dyn InventoryStore>,
}

impl AuditLogWriter {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Records a price change if `new_price` is present and differs from `previous_price`.
    ///
    /// Equality is exact decimal equality.
    pub async fn record_price(
        &self,
        product_id: Uuid,
        previous_price: Decimal,
        new_price: Option<Decimal>,
        actor: Option<&str>,
    ) -> AuditOutcome {
        let Some(new_price) = new_price else {
            return AuditOutcome::Untouched;
        };
        if new_price == previous_price {
            debug!(%product_id, "price unchanged, nothing to audit");
            return AuditOutcome::Unchanged;
        }
        let entry = NewPriceChange::manual(product_id, previous_price, new_price, actor);
        let result = self.store.insert_price_change(&entry).await.map(|_| ());
        settle(AuditKind::Price, product_id, &entry.changed_by, result)
    }

    /// Records a stock adjustment if `new_stock` is present and differs from `previous_stock`.
    pub async fn record_stock(
        &self,
        product_id: Uuid,
        previous_stock: i32,
        new_stock: Option<i32>,
        actor: Option<&str>,
    ) -> AuditOutcome {
        let Some(new_stock) = new_stock else {
            return AuditOutcome::Untouched;
        };
        if new_stock == previous_stock {
            debug!(%product_id, "stock unchanged, nothing to audit");
            return AuditOutcome::Unchanged;
        }
        let entry = NewInventoryLog::manual(product_id, previous_stock, new_stock, actor);
        let result = self.store.insert_inventory_log(&entry).await.map(|_| ());
        settle(AuditKind::Stock, product_id, &entry.changed_by, result)
    }
}

fn settle(
    kind: AuditKind,
    product_id: Uuid,
    actor: &str,
    result: crate::storage::StoreResult<()>,
) -> AuditOutcome {
    match result {
        Ok(()) => {
            info!(%product_id, kind = kind.as_str(), actor, "audit entry recorded");
            AuditOutcome::Recorded
        }
        Err(e) => {
            error!(%product_id, kind = kind.as_str(), error = %e, "failed to record audit entry");
            AuditOutcome::Dropped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn records_only_real_changes() {
        let store = Arc::new(MemoryStore::new());
        let writer = AuditLogWriter::new(store.clone());
        let id = Uuid::new_v4();

        assert_eq!(
            writer.record_price(id, dec!(10), None, Some("alice")).await,
            AuditOutcome::Untouched
        );
        assert_eq!(writer.record_stock(id, 5, None, None).await, AuditOutcome::Untouched);
        assert_eq!(
            writer.record_price(id, dec!(10), Some(dec!(10.00)), Some("alice")).await,
            AuditOutcome::Unchanged
        );
        assert_eq!(
            writer.record_price(id, dec!(10), Some(dec!(12)), None).await,
            AuditOutcome::Recorded
        );
        assert_eq!(writer.record_stock(id, 5, Some(5), None).await, AuditOutcome::Unchanged);
        assert_eq!(
            writer.record_stock(id, 5, Some(8), Some("bob")).await,
            AuditOutcome::Recorded
        );

        let prices = store.price_changes(Some(id)).await.unwrap();
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].changed_by.as_deref(), Some("unknown"));
        assert_eq!(prices[0].reason, "Manual update");

        let logs = store.inventory_logs(Some(id)).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].change_amount, 3);
        assert_eq!(logs[0].changed_by.as_deref(), Some("bob"));
    }
}

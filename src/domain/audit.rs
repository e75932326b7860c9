//! Append-only history records for price and stock changes.
//!
//! Entries reference a product by id only. The product may be hard-deleted later while its
//! history stays behind, so readers must tolerate ids that no longer resolve.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Actor recorded when a mutation arrives without one.
pub const UNKNOWN_ACTOR: &str = "unknown";

/// The two audited columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditKind {
    Price,
    Stock,
}

impl AuditKind {
    /// Reason stamped on entries produced by a manual edit.
    pub fn default_reason(self) -> &'static str {
        match self {
            AuditKind::Price => "Manual update",
            AuditKind::Stock => "Manual adjustment",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AuditKind::Price => "price",
            AuditKind::Stock => "stock",
        }
    }
}

/// Maps an empty or missing actor to [`UNKNOWN_ACTOR`].
pub fn resolve_actor(actor: Option<&str>) -> String {
    match actor.map(str::trim) {
        Some(a) if !a.is_empty() => a.to_string(),
        _ => UNKNOWN_ACTOR.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct InventoryLogEntry {
    pub id: Uuid,
    pub product_id: Uuid,
    pub previous_stock: i32,
    pub new_stock: i32,
    /// `new_stock - previous_stock`
    pub change_amount: i32,
    pub reason: String,
    /// Empty only for rows written outside this service.
    pub changed_by: Option<String>,
    pub changed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct PriceChangeEntry {
    pub id: Uuid,
    pub product_id: Uuid,
    pub previous_price: Decimal,
    pub new_price: Decimal,
    pub reason: String,
    pub changed_by: Option<String>,
    pub changed_at: DateTime<Utc>,
}

/// A stock entry about to be appended. The store assigns `id` and `changed_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInventoryLog {
    pub product_id: Uuid,
    pub previous_stock: i32,
    pub new_stock: i32,
    pub change_amount: i32,
    pub reason: String,
    pub changed_by: String,
}

impl NewInventoryLog {
    pub fn manual(
        product_id: Uuid,
        previous_stock: i32,
        new_stock: i32,
        actor: Option<&str>,
    ) -> Self {
        Self {
            product_id,
            previous_stock,
            new_stock,
            change_amount: new_stock - previous_stock,
            reason: AuditKind::Stock.default_reason().to_string(),
            changed_by: resolve_actor(actor),
        }
    }
}

/// A price entry about to be appended. The store assigns `id` and `changed_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPriceChange {
    pub product_id: Uuid,
    pub previous_price: Decimal,
    pub new_price: Decimal,
    pub reason: String,
    pub changed_by: String,
}

impl NewPriceChange {
    pub fn manual(
        product_id: Uuid,
        previous_price: Decimal,
        new_price: Decimal,
        actor: Option<&str>,
    ) -> Self {
        Self {
            product_id,
            previous_price,
            new_price,
            reason: AuditKind::Price.default_reason().to_string(),
            changed_by: resolve_actor(actor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_actor_falls_back_to_sentinel() {
        assert_eq!(resolve_actor(None), "unknown");
        assert_eq!(resolve_actor(Some("")), "unknown");
        assert_eq!(resolve_actor(Some("   ")), "unknown");
        assert_eq!(resolve_actor(Some("alice")), "alice");
    }

    #[test]
    fn stock_entry_computes_delta() {
        let entry = NewInventoryLog::manual(Uuid::new_v4(), 5, 2, Some("alice"));
        assert_eq!(entry.change_amount, -3);
        assert_eq!(entry.reason, "Manual adjustment");
        assert_eq!(entry.changed_by, "alice");
    }
}

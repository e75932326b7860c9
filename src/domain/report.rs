//! Reporting aggregation over the product table and both audit logs.
//!
//! Everything here is recomputed from scratch on each call; there is no cache and no
//! incremental state.

use crate::domain::audit::{InventoryLogEntry, PriceChangeEntry, UNKNOWN_ACTOR};
use crate::domain::product::{Product, StockLevel};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

/// Name shown for log entries whose product has been deleted.
pub const UNKNOWN_PRODUCT: &str = "Unknown";

const MOST_EDITED_LIMIT: usize = 5;
const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReportView {
    pub total_products: usize,
    pub low_stock_count: usize,
    pub inventory_value: Decimal,
    /// Size of both logs combined.
    pub total_recent_changes: usize,
    pub stock_status: StockStatus,
    pub most_edited_products: Vec<ProductEditCount>,
    pub activity_by_user: Vec<UserActivity>,
    pub recent_price_changes: Vec<PriceChangeRow>,
    pub recent_stock_adjustments: Vec<StockAdjustmentRow>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StockStatus {
    pub optimal: usize,
    pub low: usize,
    pub out_of_stock: usize,
}

impl StockStatus {
    pub fn total(&self) -> usize {
        self.optimal + self.low + self.out_of_stock
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProductEditCount {
    pub product_id: Uuid,
    pub name: String,
    pub changes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserActivity {
    pub name: String,
    pub changes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PriceChangeRow {
    pub product_id: Uuid,
    pub product: String,
    pub old_price: Decimal,
    pub new_price: Decimal,
    /// `new_price - old_price`, two decimals.
    pub difference: Decimal,
    /// Two decimals; `None` when the old price was zero or the ratio is out of range.
    pub percent_change: Option<Decimal>,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StockAdjustmentRow {
    pub product_id: Uuid,
    pub product: String,
    pub old_stock: i32,
    pub new_stock: i32,
    pub change: i32,
    pub user: String,
    pub changed_at: DateTime<Utc>,
}

/// Builds every report view from the three inputs.
///
/// `logs` and `price_changes` are expected newest-first; the recent-activity tables take
/// their heads without re-sorting.
pub fn build_report(
    products: &[Product],
    logs: &[InventoryLogEntry],
    price_changes: &[PriceChangeEntry],
) -> ReportView {
    let names: HashMap<Uuid, &str> = products.iter().map(|p| (p.id, p.name.as_str())).collect();
    let name_of = |id: &Uuid| {
        names
            .get(id)
            .map(|n| n.to_string())
            .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string())
    };

    ReportView {
        total_products: products.len(),
        low_stock_count: products.iter().filter(|p| p.is_below_minimum()).count(),
        inventory_value: inventory_value(products),
        total_recent_changes: logs.len() + price_changes.len(),
        stock_status: stock_status(products),
        most_edited_products: most_edited(logs, price_changes)
            .into_iter()
            .map(|(product_id, changes)| ProductEditCount {
                name: name_of(&product_id),
                product_id,
                changes,
            })
            .collect(),
        activity_by_user: activity_by_user(logs, price_changes),
        recent_price_changes: price_changes
            .iter()
            .take(RECENT_LIMIT)
            .map(|c| PriceChangeRow {
                product_id: c.product_id,
                product: name_of(&c.product_id),
                old_price: c.previous_price,
                new_price: c.new_price,
                difference: c.new_price.saturating_sub(c.previous_price).round_dp(2),
                percent_change: percent_change(c.previous_price, c.new_price),
                changed_by: actor_label(c.changed_by.as_deref()),
                changed_at: c.changed_at,
            })
            .collect(),
        recent_stock_adjustments: logs
            .iter()
            .take(RECENT_LIMIT)
            .map(|l| StockAdjustmentRow {
                product_id: l.product_id,
                product: name_of(&l.product_id),
                old_stock: l.previous_stock,
                new_stock: l.new_stock,
                change: l.change_amount,
                user: actor_label(l.changed_by.as_deref()),
                changed_at: l.changed_at,
            })
            .collect(),
    }
}

/// Σ price × stock, saturating at `Decimal::MAX`.
pub fn inventory_value(products: &[Product]) -> Decimal {
    products.iter().fold(Decimal::ZERO, |total, p| {
        p.price
            .checked_mul(Decimal::from(p.stock))
            .and_then(|value| total.checked_add(value))
            .unwrap_or(Decimal::MAX)
    })
}

pub fn stock_status(products: &[Product]) -> StockStatus {
    products
        .iter()
        .fold(StockStatus::default(), |mut acc, p| {
            match p.stock_level() {
                StockLevel::Optimal => acc.optimal += 1,
                StockLevel::Low => acc.low += 1,
                StockLevel::OutOfStock => acc.out_of_stock += 1,
            }
            acc
        })
}

/// Edit counts per product across both logs, highest first, top five.
///
/// Ties keep first-seen order (stock log before price log).
pub fn most_edited(
    logs: &[InventoryLogEntry],
    price_changes: &[PriceChangeEntry],
) -> Vec<(Uuid, usize)> {
    let keys = logs
        .iter()
        .map(|l| l.product_id)
        .chain(price_changes.iter().map(|c| c.product_id));
    let mut ranked = count_desc(keys);
    ranked.truncate(MOST_EDITED_LIMIT);
    ranked
}

/// Edit counts per actor across both logs, highest first. Entries with no actor are skipped.
pub fn activity_by_user(
    logs: &[InventoryLogEntry],
    price_changes: &[PriceChangeEntry],
) -> Vec<UserActivity> {
    let actors = logs
        .iter()
        .map(|l| l.changed_by.as_deref())
        .chain(price_changes.iter().map(|c| c.changed_by.as_deref()))
        .flatten()
        .filter(|a| !a.is_empty())
        .map(str::to_string);

    count_desc(actors)
        .into_iter()
        .map(|(name, changes)| UserActivity { name, changes })
        .collect()
}

/// `(new - previous) / previous × 100`, rounded to two decimals.
///
/// `None` when `previous` is zero or the ratio does not fit in a `Decimal`.
pub fn percent_change(previous: Decimal, new: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    new.checked_sub(previous)?
        .checked_div(previous)?
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|pct| pct.round_dp(2))
}

fn count_desc<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: std::hash::Hash + Eq,
    I: IntoIterator<Item = K>,
{
    let mut counts: IndexMap<K, usize> = IndexMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    let mut ranked: Vec<(K, usize)> = counts.into_iter().collect();
    // stable: equal counts keep insertion order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

fn actor_label(actor: Option<&str>) -> String {
    match actor {
        Some(a) if !a.is_empty() => a.to_string(),
        _ => UNKNOWN_ACTOR.to_string(),
    }
}

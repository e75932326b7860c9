//! Product records and the write-side rules that guard them.

use crate::domain::error::{InventoryError, InventoryResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A product row as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub barcode: String,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub sku: Option<String>,
    pub price: Decimal,
    pub cost: Option<Decimal>,
    pub stock: i32,
    pub min_stock: i32,
    /// Soft-visibility flag. Hard deletes ignore it.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Where a product sits relative to its reorder threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Optimal,
    Low,
    OutOfStock,
}

impl Product {
    /// `stock < min_stock`, the rule behind the low-stock list and counter.
    pub fn is_below_minimum(&self) -> bool {
        self.stock < self.min_stock
    }

    /// Classification used by the stock-status distribution.
    ///
    /// Note the boundary differs from [`Product::is_below_minimum`]: a product sitting exactly
    /// at `min_stock` is `Low` here but not below minimum.
    pub fn stock_level(&self) -> StockLevel {
        if self.stock > self.min_stock {
            StockLevel::Optimal
        } else if self.stock > 0 {
            StockLevel::Low
        } else {
            StockLevel::OutOfStock
        }
    }
}

/// Creation request. Required fields are optional here so that a missing one surfaces as
/// `InvalidArgument` rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewProduct {
    pub barcode: Option<String>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub sku: Option<String>,
    pub cost: Option<Decimal>,
    pub stock: Option<i32>,
    pub min_stock: Option<i32>,
}

/// A creation request that passed validation, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub barcode: String,
    pub name: String,
    pub price: Decimal,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub sku: Option<String>,
    pub cost: Option<Decimal>,
    pub stock: i32,
    pub min_stock: i32,
    pub is_active: bool,
}

impl NewProduct {
    pub fn new(barcode: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            barcode: Some(barcode.into()),
            name: Some(name.into()),
            price: Some(price),
            ..Self::default()
        }
    }

    pub fn with_stock(mut self, stock: i32, min_stock: i32) -> Self {
        self.stock = Some(stock);
        self.min_stock = Some(min_stock);
        self
    }

    /// Checks required fields and value ranges, and fills in stock defaults.
    pub fn validate(self) -> InventoryResult<ProductDraft> {
        let barcode = self.barcode.filter(|b| !b.trim().is_empty());
        let name = self.name.filter(|n| !n.trim().is_empty());
        let (barcode, name, price) = match (barcode, name, self.price) {
            (Some(b), Some(n), Some(p)) => (b, n, p),
            _ => {
                return Err(InventoryError::invalid(
                    "Missing required fields: barcode, name, price",
                ))
            }
        };

        ensure_non_negative_price("price", price)?;
        if let Some(cost) = self.cost {
            ensure_non_negative_price("cost", cost)?;
        }
        let stock = self.stock.unwrap_or(0);
        let min_stock = self.min_stock.unwrap_or(0);
        ensure_non_negative_count("stock", stock)?;
        ensure_non_negative_count("min_stock", min_stock)?;

        Ok(ProductDraft {
            barcode,
            name,
            price,
            category: self.category,
            description: self.description,
            image_url: self.image_url,
            sku: self.sku,
            cost: self.cost,
            stock,
            min_stock,
            is_active: true,
        })
    }
}

/// Partial update. `None` leaves a column untouched; for nullable columns `Some(None)`
/// clears it (an explicit JSON `null`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct ProductPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub sku: Option<Option<String>>,
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<f64>)]
    pub cost: Option<Option<Decimal>>,
    pub stock: Option<i32>,
    pub min_stock: Option<i32>,
    pub is_active: Option<bool>,
}

/// Marks a field as present, keeping an explicit `null` as `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ProductPatch {
    pub fn price(price: Decimal) -> Self {
        Self {
            price: Some(price),
            ..Self::default()
        }
    }

    pub fn stock(stock: i32) -> Self {
        Self {
            stock: Some(stock),
            ..Self::default()
        }
    }

    pub fn activation(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }

    /// Range checks on the provided fields. Runs before the store is touched.
    pub fn validate(&self) -> InventoryResult<()> {
        if let Some(price) = self.price {
            ensure_non_negative_price("price", price)?;
        }
        if let Some(Some(cost)) = self.cost {
            ensure_non_negative_price("cost", cost)?;
        }
        if let Some(stock) = self.stock {
            ensure_non_negative_count("stock", stock)?;
        }
        if let Some(min_stock) = self.min_stock {
            ensure_non_negative_count("min_stock", min_stock)?;
        }
        if matches!(self.name.as_deref(), Some(n) if n.trim().is_empty()) {
            return Err(InventoryError::invalid("Name cannot be empty"));
        }
        Ok(())
    }

    /// Applies the present fields onto `product`. Used by the in-memory store.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(category) = &self.category {
            product.category = category.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(image_url) = &self.image_url {
            product.image_url = image_url.clone();
        }
        if let Some(sku) = &self.sku {
            product.sku = sku.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(cost) = self.cost {
            product.cost = cost;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(min_stock) = self.min_stock {
            product.min_stock = min_stock;
        }
        if let Some(is_active) = self.is_active {
            product.is_active = is_active;
        }
    }
}

/// Money columns are `NUMERIC(12, 2)`: at most two decimals and ten integer digits.
const MONEY_SCALE: u32 = 2;
const MONEY_INTEGER_DIGITS: u32 = 10;

fn ensure_non_negative_price(field: &str, value: Decimal) -> InventoryResult<()> {
    if value < Decimal::ZERO {
        return Err(InventoryError::invalid(format!(
            "{} cannot be negative",
            capitalize(field)
        )));
    }
    if value.normalize().scale() > MONEY_SCALE {
        return Err(InventoryError::invalid(format!(
            "{} cannot have more than {} decimal places",
            capitalize(field),
            MONEY_SCALE
        )));
    }
    if value >= Decimal::from(10_i64.pow(MONEY_INTEGER_DIGITS)) {
        return Err(InventoryError::invalid(format!(
            "{} must be below 10^{}",
            capitalize(field),
            MONEY_INTEGER_DIGITS
        )));
    }
    Ok(())
}

fn ensure_non_negative_count(field: &str, value: i32) -> InventoryResult<()> {
    if value < 0 {
        return Err(InventoryError::invalid(format!(
            "{} cannot be negative",
            capitalize(field)
        )));
    }
    Ok(())
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(stock: i32, min_stock: i32) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            barcode: "8710000000001".to_string(),
            name: "Oat milk".to_string(),
            category: None,
            description: None,
            image_url: None,
            sku: None,
            price: dec!(2.49),
            cost: None,
            stock,
            min_stock,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        let err = NewProduct {
            barcode: Some("123".into()),
            price: Some(dec!(1)),
            ..NewProduct::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, InventoryError::InvalidArgument(_)));

        let err = NewProduct {
            barcode: Some("123".into()),
            name: Some("Tea".into()),
            ..NewProduct::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, InventoryError::InvalidArgument(_)));
    }

    #[test]
    fn negative_price_is_rejected_on_create() {
        let err = NewProduct::new("123", "Tea", dec!(-1)).validate().unwrap_err();
        match err {
            InventoryError::InvalidArgument(msg) => assert_eq!(msg, "Price cannot be negative"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn creation_defaults_stock_to_zero() {
        let draft = NewProduct::new("123", "Tea", dec!(3.10)).validate().unwrap();
        assert_eq!(draft.stock, 0);
        assert_eq!(draft.min_stock, 0);
        assert!(draft.is_active);
    }

    #[test]
    fn patch_rejects_negative_stock() {
        let err = ProductPatch::stock(-4).validate().unwrap_err();
        assert!(matches!(err, InventoryError::InvalidArgument(_)));
        assert!(ProductPatch::stock(0).validate().is_ok());
    }

    #[test]
    fn prices_must_fit_the_money_columns() {
        assert!(ProductPatch::price(dec!(10.004)).validate().is_err());
        assert!(ProductPatch::price(dec!(10.000)).validate().is_ok());
        assert!(ProductPatch::price(dec!(9999999999.99)).validate().is_ok());
        assert!(ProductPatch::price(dec!(10000000000)).validate().is_err());
        assert!(ProductPatch::price(Decimal::MAX).validate().is_err());

        let err = NewProduct {
            cost: Some(dec!(0.001)),
            ..NewProduct::new("123", "Tea", dec!(3.10))
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, InventoryError::InvalidArgument(_)));
    }

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let patch: ProductPatch =
            serde_json::from_value(serde_json::json!({ "description": null, "stock": 3 })).unwrap();
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.category, None);
        assert_eq!(patch.stock, Some(3));

        let mut p = product(1, 0);
        p.description = Some("old".into());
        p.category = Some("Dairy".into());
        patch.apply_to(&mut p);
        assert_eq!(p.description, None);
        assert_eq!(p.category.as_deref(), Some("Dairy"));
        assert_eq!(p.stock, 3);
    }

    #[test]
    fn stock_level_boundaries() {
        assert_eq!(product(5, 3).stock_level(), StockLevel::Optimal);
        assert_eq!(product(3, 3).stock_level(), StockLevel::Low);
        assert_eq!(product(1, 3).stock_level(), StockLevel::Low);
        assert_eq!(product(0, 3).stock_level(), StockLevel::OutOfStock);
        assert_eq!(product(0, 0).stock_level(), StockLevel::OutOfStock);
        assert_eq!(product(2, 0).stock_level(), StockLevel::Optimal);

        assert!(!product(3, 3).is_below_minimum());
        assert!(product(2, 3).is_below_minimum());
    }
}

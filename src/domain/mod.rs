//! Inventory domain: products, their audit trail, and the reports derived from both.

pub mod audit;
pub mod error;
pub mod product;
pub mod report;

pub use audit::{AuditKind, InventoryLogEntry, NewInventoryLog, NewPriceChange, PriceChangeEntry};
pub use error::{InventoryError, InventoryResult};
pub use product::{NewProduct, Product, ProductDraft, ProductPatch, StockLevel};
pub use report::{build_report, ReportView};

pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::InventoryService;
pub use domain::{InventoryError, NewProduct, Product, ProductPatch, ReportView};
pub use storage::{InventoryStore, MemoryStore, PostgresStore};

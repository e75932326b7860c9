pub mod audit_log;
pub mod inventory_service;
pub mod product_service;
pub mod query_gateway;

pub use audit_log::{AuditLogWriter, AuditOutcome};
pub use inventory_service::InventoryService;
pub use product_service::ProductService;
pub use query_gateway::QueryGateway;

use crate::domain::audit::{InventoryLogEntry, PriceChangeEntry};
use crate::domain::product::{NewProduct, Product, ProductPatch};
use crate::domain::report::{
    PriceChangeRow, ProductEditCount, ReportView, StockAdjustmentRow, StockStatus, UserActivity,
};
use crate::transport::http::handlers::{health, inventory, products, reports};
use crate::transport::http::types::{ActorRequest, ApiResponse, UpdateProductRequest};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        products::list_products_handler,
        products::create_product_handler,
        products::get_product_by_barcode_handler,
        products::get_product_handler,
        products::update_product_handler,
        products::delete_product_handler,
        products::deactivate_product_handler,
        products::reactivate_product_handler,
        inventory::list_logs_handler,
        inventory::product_logs_handler,
        inventory::low_stock_handler,
        inventory::list_price_changes_handler,
        inventory::product_price_changes_handler,
        reports::overview_handler
    ),
    components(schemas(
        ApiResponse,
        Product,
        NewProduct,
        ProductPatch,
        UpdateProductRequest,
        ActorRequest,
        InventoryLogEntry,
        PriceChangeEntry,
        ReportView,
        StockStatus,
        ProductEditCount,
        UserActivity,
        PriceChangeRow,
        StockAdjustmentRow
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/products",
            get(products::list_products_handler).post(products::create_product_handler),
        )
        .route(
            "/api/products/barcode/:barcode",
            get(products::get_product_by_barcode_handler),
        )
        .route(
            "/api/products/:id",
            get(products::get_product_handler)
                .put(products::update_product_handler)
                .delete(products::delete_product_handler),
        )
        .route(
            "/api/products/:id/deactivate",
            post(products::deactivate_product_handler),
        )
        .route(
            "/api/products/:id/reactivate",
            post(products::reactivate_product_handler),
        )
        .route("/api/inventory/logs", get(inventory::list_logs_handler))
        .route("/api/inventory/logs/:product_id", get(inventory::product_logs_handler))
        .route("/api/inventory/low-stock", get(inventory::low_stock_handler))
        .route(
            "/api/inventory/price-changes",
            get(inventory::list_price_changes_handler),
        )
        .route(
            "/api/inventory/price-changes/:product_id",
            get(inventory::product_price_changes_handler),
        )
        .route("/api/reports/overview", get(reports::overview_handler))
        .with_state(app_state)
}

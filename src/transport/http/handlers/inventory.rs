use crate::transport::http::handlers::common::{error_response, parse_id, respond};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

#[utoipa::path(
    get,
    path = "/api/inventory/logs",
    responses(
        (status = 200, description = "All stock adjustments, newest first", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn list_logs_handler(State(state): State<AppState>) -> Response {
    match state.service.list_inventory_logs(None).await {
        Ok(logs) => respond(StatusCode::OK, None, &logs),
        Err(e) => error_response(e, "Error fetching inventory logs"),
    }
}

#[utoipa::path(
    get,
    path = "/api/inventory/logs/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product id (UUID)")
    ),
    responses(
        (status = 200, description = "Stock adjustments for one product, newest first", body = ApiResponse),
        (status = 400, description = "Malformed id", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn product_logs_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Response {
    let product_id = match parse_id(&product_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.service.list_inventory_logs(Some(product_id)).await {
        Ok(logs) => respond(StatusCode::OK, None, &logs),
        Err(e) => error_response(e, "Error fetching inventory logs"),
    }
}

#[utoipa::path(
    get,
    path = "/api/inventory/low-stock",
    responses(
        (status = 200, description = "Active products below their minimum stock, lowest first", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn low_stock_handler(State(state): State<AppState>) -> Response {
    match state.service.list_low_stock_products().await {
        Ok(products) => respond(StatusCode::OK, None, &products),
        Err(e) => error_response(e, "Error fetching low stock products"),
    }
}

#[utoipa::path(
    get,
    path = "/api/inventory/price-changes",
    responses(
        (status = 200, description = "All price changes, newest first", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn list_price_changes_handler(State(state): State<AppState>) -> Response {
    match state.service.list_price_changes(None).await {
        Ok(changes) => respond(StatusCode::OK, None, &changes),
        Err(e) => error_response(e, "Error fetching price changes"),
    }
}

#[utoipa::path(
    get,
    path = "/api/inventory/price-changes/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product id (UUID)")
    ),
    responses(
        (status = 200, description = "Price changes for one product, newest first", body = ApiResponse),
        (status = 400, description = "Malformed id", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn product_price_changes_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Response {
    let product_id = match parse_id(&product_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.service.list_price_changes(Some(product_id)).await {
        Ok(changes) => respond(StatusCode::OK, None, &changes),
        Err(e) => error_response(e, "Error fetching price changes"),
    }
}

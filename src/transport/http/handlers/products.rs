use crate::domain::{NewProduct, Product};
use crate::transport::http::handlers::common::{error_response, parse_id, respond};
use crate::transport::http::types::{
    json_422, ActorRequest, ApiResponse, AppState, UpdateProductRequest,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All active products", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn list_products_handler(State(state): State<AppState>) -> Response {
    match state.service.list_active_products().await {
        Ok(products) => respond(StatusCode::OK, None, &products),
        Err(e) => error_response(e, "Error fetching products"),
    }
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created", body = ApiResponse),
        (status = 400, description = "Missing fields or negative values", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    request: Result<Json<NewProduct>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"barcode\": ..., \"name\": ..., \"price\": ...}").into_response()
        }
    };

    match state.service.create_product(request).await {
        Ok(product) => respond(
            StatusCode::CREATED,
            Some("Product created successfully"),
            &product,
        ),
        Err(e) => error_response(e, "Error creating product"),
    }
}

#[utoipa::path(
    get,
    path = "/api/products/barcode/{barcode}",
    params(
        ("barcode" = String, Path, description = "Product barcode")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse),
        (status = 404, description = "No product with this barcode", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn get_product_by_barcode_handler(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> Response {
    match state.service.get_product_by_barcode(barcode.trim()).await {
        Ok(product) => respond(StatusCode::OK, None, &product),
        Err(e) => error_response(e, "Error fetching product"),
    }
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product id (UUID)")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse),
        (status = 400, description = "Malformed id", body = ApiResponse),
        (status = 404, description = "Unknown product", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.service.get_product(id).await {
        Ok(product) => respond(StatusCode::OK, None, &product),
        Err(e) => error_response(e, "Error fetching product"),
    }
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product id (UUID)")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse),
        (status = 400, description = "Negative price/stock or malformed id", body = ApiResponse),
        (status = 404, description = "Unknown product", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"price\"?: ..., \"stock\"?: ..., \"username\"?: ...}")
                .into_response()
        }
    };

    match state
        .service
        .update_product(id, request.patch, request.username.as_deref())
        .await
    {
        Ok(product) => respond(StatusCode::OK, Some("Product updated successfully"), &product),
        Err(e) => error_response(e, "Error updating product"),
    }
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product id (UUID)")
    ),
    responses(
        (status = 200, description = "Product permanently deleted", body = ApiResponse),
        (status = 404, description = "Unknown product", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.service.delete_product(id).await {
        Ok(product) => respond(StatusCode::OK, Some("Product deleted successfully"), &product),
        Err(e) => error_response(e, "Error deleting product"),
    }
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/deactivate",
    params(
        ("id" = String, Path, description = "Product id (UUID)")
    ),
    request_body = ActorRequest,
    responses(
        (status = 200, description = "Product hidden from active listings", body = ApiResponse),
        (status = 404, description = "Unknown product", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn deactivate_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Option<Json<ActorRequest>>,
) -> Response {
    set_active(state, id, request, false).await
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/reactivate",
    params(
        ("id" = String, Path, description = "Product id (UUID)")
    ),
    request_body = ActorRequest,
    responses(
        (status = 200, description = "Product visible in active listings again", body = ApiResponse),
        (status = 404, description = "Unknown product", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn reactivate_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Option<Json<ActorRequest>>,
) -> Response {
    set_active(state, id, request, true).await
}

async fn set_active(
    state: AppState,
    id: String,
    request: Option<Json<ActorRequest>>,
    active: bool,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let actor = request.and_then(|Json(r)| r.username);
    let result: Result<Product, _> = if active {
        state.service.reactivate_product(id, actor.as_deref()).await
    } else {
        state.service.deactivate_product(id, actor.as_deref()).await
    };
    match result {
        Ok(product) => {
            let message = if active { "Product reactivated" } else { "Product deactivated" };
            respond(StatusCode::OK, Some(message), &product)
        }
        Err(e) => error_response(e, "Error updating product"),
    }
}

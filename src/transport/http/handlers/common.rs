use crate::domain::InventoryError;
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, error};
use uuid::Uuid;

/// Serializes `data` into a success envelope with the given status.
pub fn respond<T: Serialize>(status: StatusCode, message: Option<&str>, data: &T) -> Response {
    match serde_json::to_value(data) {
        Ok(value) => {
            let mut body = ApiResponse::data(value);
            if let Some(m) = message {
                body = body.with_message(m);
            }
            (status, Json(body)).into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to serialize response");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure("Error serializing response", Some(e.to_string()))),
            )
                .into_response()
        }
    }
}

/// Maps a service error onto a status code. `context` names the failed operation
/// (e.g. "Error updating product") for 500 responses.
pub fn error_response(err: InventoryError, context: &str) -> Response {
    match err {
        InventoryError::InvalidArgument(message) => {
            (StatusCode::BAD_REQUEST, Json(ApiResponse::failure(message, None))).into_response()
        }
        InventoryError::NotFound(what) => {
            debug!(%what, "not found");
            (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::failure("Product not found", None)),
            )
                .into_response()
        }
        InventoryError::Persistence(e) => {
            error!(error = %e, "{}", context);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure(context, Some(e.to_string()))),
            )
                .into_response()
        }
    }
}

/// Parses a product id path segment.
pub fn parse_id(raw: &str) -> Result<Uuid, Response> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::failure(
                format!("Invalid product id: {}", raw),
                None,
            )),
        )
            .into_response()
    })
}

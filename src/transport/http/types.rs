use crate::app::InventoryService;
use crate::domain::ProductPatch;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub service: InventoryService,
}

/// Envelope shared by every endpoint.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn data(data: JsonValue) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            error,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Body of `PUT /api/products/{id}`: the partial product plus the acting staff member.
#[derive(Deserialize, Debug, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(flatten)]
    pub patch: ProductPatch,
    /// Recorded as `changed_by` on audit entries; `unknown` when absent.
    #[serde(default)]
    pub username: Option<String>,
}

/// Body of the activation endpoints.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct ActorRequest {
    #[serde(default)]
    pub username: Option<String>,
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse::failure(
            "Invalid JSON body",
            Some(format!("{} (expected: {})", err, expected)),
        )),
    )
}

use crate::transport::http::handlers::common::{error_response, respond};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

#[utoipa::path(
    get,
    path = "/api/reports/overview",
    responses(
        (status = 200, description = "Report over active products and both audit logs", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn overview_handler(State(state): State<AppState>) -> Response {
    match state.service.report().await {
        Ok(report) => respond(StatusCode::OK, None, &report),
        Err(e) => error_response(e, "Error building report"),
    }
}

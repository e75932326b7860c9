// src/bin/api_server.rs

use std::sync::Arc;
use stockroom::infra::{config, logging};
use stockroom::transport;
use stockroom::{InventoryService, PostgresStore};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    // --- Store Initialization ---
    info!("connecting to inventory database");
    let database_url = config::database_url()?;
    let store = PostgresStore::connect(&database_url, config::database_max_connections()?).await?;
    let service = InventoryService::new(Arc::new(store));

    let app_state = transport::http::AppState { service };

    // --- API Server Initialization ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        )
        .layer(cors);

    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "API server listening");
    info!("Swagger UI available at /swagger-ui");

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = &result {
                error!(error = %e, "server terminated");
            }
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}

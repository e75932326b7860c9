//! End-to-end API test: router bound to an ephemeral port over the in-memory store,
//! driven with reqwest.

use serde_json::{json, Value};
use std::sync::Arc;
use stockroom::{transport, InventoryService, MemoryStore};

async fn start_server() -> Result<String, Box<dyn std::error::Error>> {
    let service = InventoryService::new(Arc::new(MemoryStore::new()));
    let router = transport::http::create_router(transport::http::AppState { service });

    // Bind to an ephemeral port to avoid conflicts if an API server is already running.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok(format!("http://127.0.0.1:{}", port))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_product_lifecycle_and_audit_trail() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = start_server().await?;
    let client = reqwest::Client::new();

    // --- create ---
    let resp = client
        .post(format!("{}/api/products", base_url))
        .json(&json!({
            "barcode": "8711000000011",
            "name": "Stroopwafels",
            "category": "Snacks",
            "price": 10.00,
            "stock": 5,
            "min_stock": 3
        }))
        .send()
        .await?;
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await?;
    assert_eq!(body["success"], true);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["is_active"], true);

    // --- lookup by barcode round-trips ---
    let body: Value = client
        .get(format!("{}/api/products/barcode/8711000000011", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["name"], "Stroopwafels");
    assert_eq!(body["data"]["category"], "Snacks");
    assert_eq!(body["data"]["stock"], 5);

    // --- update price and stock as alice ---
    let resp = client
        .put(format!("{}/api/products/{}", base_url, id))
        .json(&json!({ "price": 12.00, "stock": 2, "username": "alice" }))
        .send()
        .await?;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await?;
    assert_eq!(body["message"], "Product updated successfully");
    assert_eq!(body["data"]["stock"], 2);

    let logs: Value = client
        .get(format!("{}/api/inventory/logs/{}", base_url, id))
        .send()
        .await?
        .json()
        .await?;
    let logs = logs["data"].as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["previous_stock"], 5);
    assert_eq!(logs[0]["new_stock"], 2);
    assert_eq!(logs[0]["change_amount"], -3);
    assert_eq!(logs[0]["changed_by"], "alice");

    let prices: Value = client
        .get(format!("{}/api/inventory/price-changes", base_url))
        .send()
        .await?
        .json()
        .await?;
    let prices = prices["data"].as_array().unwrap();
    assert_eq!(prices.len(), 1);
    assert_eq!(prices[0]["changed_by"], "alice");
    assert_eq!(prices[0]["reason"], "Manual update");

    // --- low stock list and report ---
    let low: Value = client
        .get(format!("{}/api/inventory/low-stock", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(low["data"].as_array().unwrap().len(), 1);

    let report: Value = client
        .get(format!("{}/api/reports/overview", base_url))
        .send()
        .await?
        .json()
        .await?;
    let report = &report["data"];
    assert_eq!(report["total_products"], 1);
    assert_eq!(report["low_stock_count"], 1);
    assert_eq!(report["stock_status"]["low"], 1);
    assert_eq!(report["most_edited_products"][0]["changes"], 2);
    assert_eq!(report["activity_by_user"][0]["name"], "alice");

    // --- hard delete keeps history ---
    let resp = client
        .delete(format!("{}/api/products/{}", base_url, id))
        .send()
        .await?;
    assert_eq!(resp.status(), 200);
    let resp = client
        .get(format!("{}/api/products/{}", base_url, id))
        .send()
        .await?;
    assert_eq!(resp.status(), 404);
    let logs: Value = client
        .get(format!("{}/api/inventory/logs", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(logs["data"].as_array().unwrap().len(), 1);

    let report: Value = client
        .get(format!("{}/api/reports/overview", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(report["data"]["recent_stock_adjustments"][0]["product"], "Unknown");

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_error_mapping() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = start_server().await?;
    let client = reqwest::Client::new();

    // missing required fields
    let resp = client
        .post(format!("{}/api/products", base_url))
        .json(&json!({ "barcode": "1" }))
        .send()
        .await?;
    assert_eq!(resp.status(), 400);

    // negative price
    let resp = client
        .post(format!("{}/api/products", base_url))
        .json(&json!({ "barcode": "1", "name": "Bad", "price": -1 }))
        .send()
        .await?;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Price cannot be negative");

    // nothing was inserted
    let body: Value = client
        .get(format!("{}/api/products", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert!(body["data"].as_array().unwrap().is_empty());

    // unknown barcode / id
    let resp = client
        .get(format!("{}/api/products/barcode/does-not-exist", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Product not found");
    let resp = client
        .delete(format!("{}/api/products/{}", base_url, uuid::Uuid::new_v4()))
        .send()
        .await?;
    assert_eq!(resp.status(), 404);

    // malformed id and malformed body
    let resp = client
        .get(format!("{}/api/products/not-a-uuid", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), 400);
    let resp = client
        .post(format!("{}/api/products", base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(resp.status(), 422);

    // health
    let resp = client.get(format!("{}/health", base_url)).send().await?;
    assert_eq!(resp.status(), 200);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_deactivate_hides_product() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = start_server().await?;
    let client = reqwest::Client::new();

    let body: Value = client
        .post(format!("{}/api/products", base_url))
        .json(&json!({ "barcode": "42", "name": "Seasonal", "price": 3.5 }))
        .send()
        .await?
        .json()
        .await?;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let resp = client
        .post(format!("{}/api/products/{}/deactivate", base_url, id))
        .json(&json!({ "username": "bob" }))
        .send()
        .await?;
    assert_eq!(resp.status(), 200);

    let body: Value = client
        .get(format!("{}/api/products", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert!(body["data"].as_array().unwrap().is_empty());

    // still reachable by id
    let resp = client
        .get(format!("{}/api/products/{}", base_url, id))
        .send()
        .await?;
    assert_eq!(resp.status(), 200);

    let resp = client
        .post(format!("{}/api/products/{}/reactivate", base_url, id))
        .send()
        .await?;
    assert_eq!(resp.status(), 200);
    let body: Value = client
        .get(format!("{}/api/products", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    Ok(())
}

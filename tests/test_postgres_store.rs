//! PostgreSQL store test. Runs against `DATABASE_URL` when it is set and is skipped otherwise.

use rust_decimal_macros::dec;
use std::sync::Arc;
use stockroom::{InventoryError, InventoryService, NewProduct, PostgresStore, ProductPatch};

async fn connect() -> Result<Option<PostgresStore>, Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        println!("DATABASE_URL not set; skipping Postgres store test");
        return Ok(None);
    };
    Ok(Some(PostgresStore::connect(&database_url, 2).await?))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_postgres_update_and_audit() -> Result<(), Box<dyn std::error::Error>> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    let service = InventoryService::new(Arc::new(store));

    // unique per run so the test can be re-run against the same database
    let barcode = format!("pg-test-{}", uuid::Uuid::new_v4());
    let product = service
        .create_product(
            NewProduct::new(barcode.clone(), "Filter coffee", dec!(10.00)).with_stock(5, 3),
        )
        .await?;

    let found = service.get_product_by_barcode(&barcode).await?;
    assert_eq!(found.id, product.id);
    assert_eq!(found.price, dec!(10.00));

    let patch = ProductPatch {
        price: Some(dec!(12.00)),
        stock: Some(2),
        description: Some(Some("Ground, 500g".to_string())),
        ..ProductPatch::default()
    };
    let updated = service.update_product(product.id, patch, Some("alice")).await?;
    assert_eq!(updated.stock, 2);
    assert_eq!(updated.description.as_deref(), Some("Ground, 500g"));
    assert_eq!(updated.name, "Filter coffee");

    let logs = service.list_inventory_logs(Some(product.id)).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].change_amount, -3);
    let prices = service.list_price_changes(Some(product.id)).await?;
    assert_eq!(prices.len(), 1);
    assert_eq!(prices[0].previous_price, dec!(10.00));

    let dup = service
        .create_product(NewProduct::new(barcode.clone(), "Duplicate", dec!(1)))
        .await
        .unwrap_err();
    assert!(matches!(dup, InventoryError::InvalidArgument(_)));

    service.delete_product(product.id).await?;
    let gone = service.get_product(product.id).await.unwrap_err();
    assert!(matches!(gone, InventoryError::NotFound(_)));
    assert_eq!(service.list_inventory_logs(Some(product.id)).await?.len(), 1);

    Ok(())
}

use stockroom::infra::{config, logging};
use stockroom::{InventoryStore, PostgresStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--skip-schema]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         Optional:\n\
           DATABASE_MAX_CONNECTIONS (default 5), BIND_ADDR (default 0.0.0.0:3000)\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let skip_schema = args.iter().any(|a| a == "--skip-schema");

    // Force-read config (nice error messages if missing)
    let database_url = config::database_url()?;
    let max_connections = config::database_max_connections()?;
    let bind_addr = config::bind_addr();

    println!("> Preflight:");
    println!("  DATABASE_MAX_CONNECTIONS={}", max_connections);
    println!("  BIND_ADDR={}", bind_addr);

    let store = if skip_schema {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(&database_url)
            .await?;
        PostgresStore::new(pool)
    } else {
        // connect() also applies the schema
        PostgresStore::connect(&database_url, max_connections).await?
    };

    store
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("Database is not reachable: {}", e))?;
    println!("  Database reachable.");

    let products = store.active_products().await?;
    let low = store.low_stock_products().await?;
    let logs = store.inventory_logs(None).await?;
    let prices = store.price_changes(None).await?;
    println!(
        "  Tables readable: {} active products ({} below minimum), {} stock entries, {} price entries.",
        products.len(),
        low.len(),
        logs.len(),
        prices.len()
    );

    println!("> Preflight OK.");
    Ok(())
}

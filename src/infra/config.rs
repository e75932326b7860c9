//! Centralized configuration (environment variables + defaults).

use anyhow::Context;

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> anyhow::Result<String> {
    std::env::var("DATABASE_URL").context("DATABASE_URL must be set")
}

/// Connection pool size (default 5).
pub fn database_max_connections() -> anyhow::Result<u32> {
    match std::env::var("DATABASE_MAX_CONNECTIONS") {
        Ok(v) => {
            let n = v.parse::<u32>().with_context(|| {
                format!("DATABASE_MAX_CONNECTIONS must be a valid u32, got {:?}", v)
            })?;
            Ok(n.max(1))
        }
        Err(_) => Ok(5),
    }
}

/// Listen address for the API server (default `0.0.0.0:3000`).
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
}

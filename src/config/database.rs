use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use super::Config;

/// Build the shared pool without connecting. The probes are expected to
/// work (and report failures) while the database is down, so the first
/// real connection attempt happens on first acquisition.
pub fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .test_before_acquire(true)
        .connect_lazy(&config.database_url)
}

/// One round trip to confirm the database is reachable.
pub async fn check_pool(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

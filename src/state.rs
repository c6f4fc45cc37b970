use sqlx::PgPool;

use crate::config::Config;

/// Shared per-process state. The pool is the only shared resource the
/// handlers touch; everything else is per-request.
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self { db, config }
    }
}

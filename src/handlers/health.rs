use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub pool: PoolCounters,
}

/// Snapshot of pool occupancy. Read from the pool handle itself, so
/// this endpoint stays responsive while every connection is held.
#[derive(Debug, Serialize)]
pub struct PoolCounters {
    pub size: u32,
    pub idle: usize,
    pub max: u32,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        pool: PoolCounters {
            size: state.db.size(),
            idle: state.db.num_idle(),
            max: state.config.max_connections,
        },
    })
}

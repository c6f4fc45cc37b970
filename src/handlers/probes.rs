//! The four pool probes. Each one acquires a connection (directly or
//! through the pool's executor), performs its fixed SQL action, times
//! the whole thing, and reports a flat status object.

use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use sqlx::{Connection, PgPool};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use super::{ProbeError, ProbeReply};
use crate::state::AppState;

fn default_hold_sec() -> u64 {
    30
}

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    #[serde(default, rename = "sleepSec")]
    pub sleep_sec: u64,
}

#[derive(Debug, Deserialize)]
pub struct HoldTxParams {
    #[serde(default = "default_hold_sec", rename = "holdSec")]
    pub hold_sec: u64,
    #[serde(default)]
    pub commit: bool,
}

#[derive(Debug, Deserialize)]
pub struct HoldConnParams {
    #[serde(default = "default_hold_sec", rename = "holdSec")]
    pub hold_sec: u64,
}

#[derive(Debug, Serialize)]
pub struct QueryReport {
    pub elapsed_ms: u64,
    #[serde(rename = "sleepSec")]
    pub sleep_sec: u64,
}

#[derive(Debug, Serialize)]
pub struct HoldTxReport {
    pub held_sec: u64,
    pub committed: bool,
    pub elapsed_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct HoldConnReport {
    pub held_sec: u64,
    pub elapsed_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct PingReport {
    pub acquire_and_query_ms: u64,
}

/// Simple query, optionally delayed on the database side.
pub async fn query(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> ProbeReply<QueryReport> {
    let result = run_query(&state.db, params.sleep_sec).await;
    if let Err(err) = &result {
        warn!(probe = "query", error = %err, "probe failed");
    }
    ProbeReply(result)
}

async fn run_query(db: &PgPool, sleep_sec: u64) -> Result<QueryReport, ProbeError> {
    let started = Instant::now();

    if sleep_sec > 0 {
        sqlx::query("SELECT pg_sleep($1)")
            .bind(sleep_sec as f64)
            .execute(db)
            .await
            .map_err(ProbeError::Query)?;
    } else {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(db)
            .await
            .map_err(ProbeError::Query)?;
    }

    let elapsed_ms = started.elapsed().as_millis() as u64;
    info!(sleep_sec, elapsed_ms, "query probe finished");
    Ok(QueryReport {
        elapsed_ms,
        sleep_sec,
    })
}

/// Hold an open transaction idle for `holdSec` seconds, then commit or
/// roll back. Deliberately produces an "idle in transaction" session.
pub async fn hold_tx(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HoldTxParams>,
) -> ProbeReply<HoldTxReport> {
    let result = run_hold_tx(&state.db, params.hold_sec, params.commit).await;
    if let Err(err) = &result {
        warn!(probe = "hold-tx", error = %err, "probe failed");
    }
    ProbeReply(result)
}

async fn run_hold_tx(db: &PgPool, hold_sec: u64, commit: bool) -> Result<HoldTxReport, ProbeError> {
    let started = Instant::now();

    let mut conn = db.acquire().await.map_err(ProbeError::Acquire)?;
    let mut tx = conn.begin().await.map_err(ProbeError::Begin)?;

    // The sleep runs inside the open transaction; an error here drops
    // the transaction, which rolls back before the connection returns
    // to the pool.
    sqlx::query("SELECT pg_sleep($1)")
        .bind(hold_sec as f64)
        .execute(&mut *tx)
        .await
        .map_err(ProbeError::Query)?;

    if commit {
        tx.commit().await.map_err(ProbeError::Commit)?;
    } else {
        tx.rollback().await.map_err(ProbeError::Rollback)?;
    }

    let elapsed_ms = started.elapsed().as_millis() as u64;
    info!(hold_sec, committed = commit, elapsed_ms, "hold-tx probe finished");
    Ok(HoldTxReport {
        held_sec: hold_sec,
        committed: commit,
        elapsed_ms,
    })
}

/// Check a connection out and sit on it without issuing any SQL, so a
/// burst of these exhausts the pool without generating query load.
pub async fn hold_conn(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HoldConnParams>,
) -> ProbeReply<HoldConnReport> {
    let result = run_hold_conn(&state.db, params.hold_sec).await;
    if let Err(err) = &result {
        warn!(probe = "hold-conn", error = %err, "probe failed");
    }
    ProbeReply(result)
}

async fn run_hold_conn(db: &PgPool, hold_sec: u64) -> Result<HoldConnReport, ProbeError> {
    let started = Instant::now();

    let conn = db.acquire().await.map_err(ProbeError::Acquire)?;
    tokio::time::sleep(Duration::from_secs(hold_sec)).await;
    drop(conn);

    let elapsed_ms = started.elapsed().as_millis() as u64;
    info!(hold_sec, elapsed_ms, "hold-conn probe finished");
    Ok(HoldConnReport {
        held_sec: hold_sec,
        elapsed_ms,
    })
}

/// Time a full acquire-and-query round trip on one connection.
pub async fn ping(State(state): State<Arc<AppState>>) -> ProbeReply<PingReport> {
    let result = run_ping(&state.db).await;
    if let Err(err) = &result {
        warn!(probe = "ping", error = %err, "probe failed");
    }
    ProbeReply(result)
}

async fn run_ping(db: &PgPool) -> Result<PingReport, ProbeError> {
    let started = Instant::now();

    let mut conn = db.acquire().await.map_err(ProbeError::Acquire)?;
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&mut *conn)
        .await
        .map_err(ProbeError::Query)?;
    drop(conn);

    let acquire_and_query_ms = started.elapsed().as_millis() as u64;
    info!(acquire_and_query_ms, "ping probe finished");
    Ok(PingReport {
        acquire_and_query_ms,
    })
}

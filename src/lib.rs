//! HTTP probes for exercising a Postgres connection pool under stress.
//!
//! Four endpoints under `/test` acquire pooled connections in different
//! ways (plain query, idle transaction, silent hold, acquisition timing)
//! and report timings as flat JSON. `/health` exposes pool occupancy.

pub mod config;
pub mod handlers;
pub mod router;
pub mod state;

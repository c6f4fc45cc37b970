//! Probe response envelope and error taxonomy.

pub mod health;
pub mod probes;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Failure raised by a probe, tagged with the phase that failed. The
/// rendered form ("<phase>: <message>") is what lands in the `error`
/// field of the response body.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("acquire: {0}")]
    Acquire(#[source] sqlx::Error),
    #[error("query: {0}")]
    Query(#[source] sqlx::Error),
    #[error("begin: {0}")]
    Begin(#[source] sqlx::Error),
    #[error("commit: {0}")]
    Commit(#[source] sqlx::Error),
    #[error("rollback: {0}")]
    Rollback(#[source] sqlx::Error),
}

#[derive(Serialize)]
struct Envelope<T: Serialize> {
    ok: bool,
    #[serde(flatten)]
    report: T,
}

/// Outcome of a probe. Success serializes flat next to `ok:true`;
/// failure carries only `ok:false` and `error`. Both answer HTTP 200:
/// a probe failing is a measurement, not a transport fault.
pub struct ProbeReply<T>(pub Result<T, ProbeError>);

impl<T: Serialize> IntoResponse for ProbeReply<T> {
    fn into_response(self) -> Response {
        let body = match self.0 {
            Ok(report) => match serde_json::to_value(Envelope { ok: true, report }) {
                Ok(value) => value,
                Err(err) => json!({ "ok": false, "error": format!("serialize: {err}") }),
            },
            Err(err) => json!({ "ok": false, "error": err.to_string() }),
        };

        (StatusCode::OK, Json(body)).into_response()
    }
}

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let probes = Router::new()
        .route("/query", get(handlers::probes::query))
        .route("/hold-tx", post(handlers::probes::hold_tx))
        .route("/hold-conn", post(handlers::probes::hold_conn))
        .route("/ping", get(handlers::probes::ping));

    Router::new()
        .nest("/test", probes)
        .route("/health", get(handlers::health::health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

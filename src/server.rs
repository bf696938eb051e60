use crate::metrics::{exposition, MetricsCollector};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub collector: Arc<MetricsCollector>,
}

/// Router serving `/metrics` and `/health` (used by main and tests).
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/health", get(health))
        .with_state(state)
}

async fn metrics(State(state): State<AppState>) -> Response {
    let collection = state.collector.collect().await;

    match exposition::render(state.collector.describe(), &collection) {
        Ok(body) => {
            log::debug!("serving {} samples", collection.samples.len());
            ([(header::CONTENT_TYPE, exposition::CONTENT_TYPE)], body).into_response()
        }
        Err(e) => {
            log::error!("failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode metrics").into_response()
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

//! HTTP gateway (Axum) for item-type matching.
//!
//! This module is primarily used by the `lostitem` server binary.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use handler::{candidates_handler, match_handler};
pub use state::HandlerState;

use lostitem::embedding::EmbeddingProvider;

pub fn create_router_with_state<P>(state: HandlerState<P>) -> Router
where
    P: EmbeddingProvider + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler::<P>))
        .route("/v1/match", post(match_handler::<P>))
        .route("/v1/candidates", post(candidates_handler::<P>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub catalog: CatalogStatus,
    pub cached_queries: u64,
}

#[derive(serde::Serialize)]
pub struct CatalogStatus {
    pub aliases: usize,
    pub dimension: usize,
    pub threshold: f64,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<P>(State(state): State<HandlerState<P>>) -> Response
where
    P: EmbeddingProvider + 'static,
{
    let matcher = &state.matcher;
    let index = matcher.index();

    let body = ReadyResponse {
        status: "ok",
        catalog: CatalogStatus {
            aliases: index.len(),
            dimension: index.dimension(),
            threshold: matcher.threshold(),
        },
        cached_queries: matcher.cache().len(),
    };

    (StatusCode::OK, Json(body)).into_response()
}

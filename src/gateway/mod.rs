//! HTTP gateway (Axum) for phrase evaluation, candidate and target administration, and search
//! sessions.
//!
//! This module is primarily used by the `qig` server binary.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use state::AppState;

use crate::constants::QIG_STATUS_HEADER;
use crate::derive::AddressDeriver;
use handler::*;

pub const QIG_STATUS_HEALTHY: &str = "healthy";

pub fn create_router_with_state<D>(state: AppState<D>) -> Router
where
    D: AddressDeriver + 'static,
{
    let api = Router::new()
        .route("/verify-crypto", get(verify_crypto_handler::<D>))
        .route("/test-phrase", post(test_phrase_handler::<D>))
        .route("/batch-test", post(batch_test_handler::<D>))
        .route("/known-phrases", get(known_phrases_handler::<D>))
        .route(
            "/candidates",
            get(list_candidates_handler::<D>).delete(clear_candidates_handler::<D>),
        )
        .route("/candidates/export", get(export_candidates_handler::<D>))
        .route(
            "/targets",
            get(list_targets_handler::<D>).post(add_target_handler::<D>),
        )
        .route("/targets/{id}", delete(remove_target_handler::<D>))
        .route("/search/start", post(start_search_handler::<D>))
        .route("/search/stop", post(stop_search_handler::<D>))
        .route("/search/status", get(search_status_handler::<D>));

    Router::new()
        .route("/healthz", get(health_handler))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        QIG_STATUS_HEADER,
        HeaderValue::from_static(QIG_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

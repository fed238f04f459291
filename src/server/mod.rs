//! HTTP level service
//!
//! Two routes mirroring the store's best-effort semantics:
//! - `GET /level` returns every stored platform document
//! - `POST /level/post` inserts each document from the request body,
//!   continuing past per-item failures
//!
//! No authentication, no idempotency keys, no pagination.

pub mod store;

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use serde_json::Value;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

pub use store::{LevelStore, LevelStoreError};

/// Shared service state
pub struct AppState {
    pub store: Mutex<LevelStore>,
}

/// Build the level service router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/level", get(get_level))
        .route("/level/post", post(post_level))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn get_level(State(state): State<Arc<AppState>>) -> Json<Vec<Value>> {
    let store = state.store.lock().await;
    Json(store.all())
}

/// Insert each document, best effort: a failing item is logged and the
/// remaining items still go in. Any failure turns the response into a
/// 400 carrying the first error; earlier items stay stored.
async fn post_level(
    State(state): State<Arc<AppState>>,
    Json(docs): Json<Vec<Value>>,
) -> Result<&'static str, (StatusCode, String)> {
    let mut store = state.store.lock().await;

    let mut first_error = None;
    for doc in docs {
        if let Err(err) = store.insert(doc) {
            log::error!("failed to store platform document: {err}");
            first_error.get_or_insert(err);
        }
    }

    match first_error {
        None => Ok("OK"),
        Some(err) => Err((StatusCode::BAD_REQUEST, err.to_string())),
    }
}

//! Debug routes served next to the callback.

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use jv_03_secretary::Secretary;
use std::sync::Arc;

/// `GET /debug/items`: every stored item as JSON.
pub fn debug_routes(secretary: Arc<Secretary>) -> Router {
    Router::new()
        .route("/debug/items", get(list_items))
        .with_state(secretary)
}

async fn list_items(State(secretary): State<Arc<Secretary>>) -> impl IntoResponse {
    Json(secretary.items())
}

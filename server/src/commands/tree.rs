use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::state::AppState;

/// `GET /tree.svg`
pub async fn get_tree(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let svg = state.store.render_tree();
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        svg,
    )
}

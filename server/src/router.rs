//! Axum router construction.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::commands::{dashboard, families, memory, people, tree, world};
use crate::state::AppState;
use crate::stream;

/// Build the complete router:
/// - `GET /` -- dashboard page
/// - `GET /state` -- bounded state read
/// - `GET /stream` -- SSE change feed
/// - `POST /families`, `POST /people` -- creation
/// - `GET /tree.svg` -- rendered family tree
/// - `POST /reset` -- back to the empty start state
/// - `GET /memory` -- process memory
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/state", get(world::get_state))
        .route("/stream", get(stream::change_stream))
        .route("/families", post(families::create_family))
        .route("/people", post(people::create_person))
        .route("/tree.svg", get(tree::get_tree))
        .route("/reset", post(world::reset_world))
        .route("/memory", get(memory::get_memory_usage))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

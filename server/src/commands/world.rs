use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use simulation::{StateView, Status};
use tracing::info;

use crate::state::AppState;

/// `GET /state` - year, counts and the first people in store order.
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateView> {
    Json(state.store.state())
}

/// `POST /reset` - empty store, calendar back to the start year.
pub async fn reset_world(State(state): State<Arc<AppState>>) -> Json<Status> {
    let status = state.store.mutate(|world| {
        world.reset();
        world.status()
    });
    info!(version = status.version, "world reset via api");
    Json(status)
}

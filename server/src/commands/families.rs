use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use simulation::NewFamily;

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /families` - requires a non-blank `name`.
pub async fn create_family(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewFamily>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(new) = body?;
    let family = state.store.create_family(new)?;
    Ok(Json(json!({
        "ok": true,
        "family": { "id": family.id, "name": family.name },
    })))
}

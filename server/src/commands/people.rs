use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use simulation::NewIndividual;

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /people` - create one individual from a partial description.
/// Ages the calendar cannot place are a 400.
pub async fn create_person(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewIndividual>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(new) = body?;
    let person = state.store.create_individual(new)?;
    Ok(Json(json!({ "ok": true, "person": person })))
}

//! Control route handlers.

use aegis_core::entity::{Control, ControlUpdate};
use aegis_core::{Entity, Properties};
use aegis_graph::queries::entities;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn list_controls(State(state): State<AppState>) -> ApiResult<Json<Vec<Properties>>> {
    let controls = entities::list_all(&state.graph, Control::LABEL).await?;
    Ok(Json(controls))
}

pub async fn create_control(
    State(state): State<AppState>,
    Json(control): Json<Control>,
) -> ApiResult<(StatusCode, Json<Properties>)> {
    let created = entities::create(&state.graph, &control).await?;
    info!(control_id = %control.control_id, "Control created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_control(
    State(state): State<AppState>,
    Path(control_id): Path<String>,
    Json(update): Json<ControlUpdate>,
) -> ApiResult<Json<Properties>> {
    let updated = entities::update(&state.graph, &control_id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Control not found"))?;
    Ok(Json(updated))
}

pub async fn delete_control(
    State(state): State<AppState>,
    Path(control_id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    if entities::delete(&state.graph, Control::LABEL, Control::KEY, &control_id).await? {
        info!(control_id = %control_id, "Control deleted");
        Ok(Json(json!({ "message": "Control deleted successfully" })))
    } else {
        Err(ApiError::not_found("Control not found"))
    }
}

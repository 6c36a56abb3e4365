//! Threat route handlers.

use aegis_core::entity::{Threat, ThreatUpdate};
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

pub async fn list_threats(State(state): State<AppState>) -> ApiResult<Json<Vec<Properties>>> {
    let threats = entities::list_all(&state.graph, Threat::LABEL).await?;
    Ok(Json(threats))
}

pub async fn create_threat(
    State(state): State<AppState>,
    Json(threat): Json<Threat>,
) -> ApiResult<(StatusCode, Json<Properties>)> {
    let created = entities::create(&state.graph, &threat).await?;
    info!(threat_id = %threat.id, "Threat created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_threat(
    State(state): State<AppState>,
    Path(threat_id): Path<String>,
    Json(update): Json<ThreatUpdate>,
) -> ApiResult<Json<Properties>> {
    let updated = entities::update(&state.graph, &threat_id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Threat not found"))?;
    Ok(Json(updated))
}

pub async fn delete_threat(
    State(state): State<AppState>,
    Path(threat_id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    if entities::delete(&state.graph, Threat::LABEL, Threat::KEY, &threat_id).await? {
        info!(threat_id = %threat_id, "Threat deleted");
        Ok(Json(json!({ "message": "Threat deleted successfully" })))
    } else {
        Err(ApiError::not_found("Threat not found"))
    }
}

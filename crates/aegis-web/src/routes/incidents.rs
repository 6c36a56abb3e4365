//! Incident route handlers.

use aegis_core::entity::{Incident, IncidentUpdate};
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

pub async fn list_incidents(State(state): State<AppState>) -> ApiResult<Json<Vec<Properties>>> {
    let incidents = entities::list_all(&state.graph, Incident::LABEL).await?;
    Ok(Json(incidents))
}

pub async fn create_incident(
    State(state): State<AppState>,
    Json(incident): Json<Incident>,
) -> ApiResult<(StatusCode, Json<Properties>)> {
    let created = entities::create(&state.graph, &incident).await?;
    info!(incident_id = %incident.incident_id, "Incident created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_incident(
    State(state): State<AppState>,
    Path(incident_id): Path<String>,
    Json(update): Json<IncidentUpdate>,
) -> ApiResult<Json<Properties>> {
    let updated = entities::update(&state.graph, &incident_id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Incident not found"))?;
    Ok(Json(updated))
}

pub async fn delete_incident(
    State(state): State<AppState>,
    Path(incident_id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    if entities::delete(&state.graph, Incident::LABEL, Incident::KEY, &incident_id).await? {
        info!(incident_id = %incident_id, "Incident deleted");
        Ok(Json(json!({ "message": "Incident deleted successfully" })))
    } else {
        Err(ApiError::not_found("Incident not found"))
    }
}

//! Vulnerability route handlers.

use aegis_core::entity::{Vulnerability, VulnerabilityUpdate};
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

pub async fn list_vulnerabilities(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Properties>>> {
    let vulns = entities::list_all(&state.graph, Vulnerability::LABEL).await?;
    Ok(Json(vulns))
}

pub async fn create_vulnerability(
    State(state): State<AppState>,
    Json(vuln): Json<Vulnerability>,
) -> ApiResult<(StatusCode, Json<Properties>)> {
    let created = entities::create(&state.graph, &vuln).await?;
    info!(vuln_id = %vuln.vuln_id, "Vulnerability created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_vulnerability(
    State(state): State<AppState>,
    Path(vuln_id): Path<String>,
    Json(update): Json<VulnerabilityUpdate>,
) -> ApiResult<Json<Properties>> {
    let updated = entities::update(&state.graph, &vuln_id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Vulnerability not found"))?;
    Ok(Json(updated))
}

pub async fn delete_vulnerability(
    State(state): State<AppState>,
    Path(vuln_id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    if entities::delete(&state.graph, Vulnerability::LABEL, Vulnerability::KEY, &vuln_id).await? {
        info!(vuln_id = %vuln_id, "Vulnerability deleted");
        Ok(Json(json!({ "message": "Vulnerability deleted successfully" })))
    } else {
        Err(ApiError::not_found("Vulnerability not found"))
    }
}

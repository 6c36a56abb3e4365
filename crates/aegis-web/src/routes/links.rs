//! Linking, relationship, and risk route handlers.

use aegis_graph::queries::links::{self, ExposurePair, RiskEntry, VulnerabilityLink};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Body for `POST /link_asset_threat`.
///
/// This route's body fields are snake_case while the vulnerability route
/// uses camelCase; both spellings are part of the public contract.
#[derive(Debug, Deserialize)]
pub struct LinkAssetThreatRequest {
    pub asset_name: Option<String>,
    pub threat_name: Option<String>,
}

/// Body for `POST /link_asset_vulnerability`.
#[derive(Debug, Deserialize)]
pub struct LinkAssetVulnerabilityRequest {
    #[serde(rename = "assetName")]
    pub asset_name: Option<String>,
    #[serde(rename = "vulnName")]
    pub vuln_name: Option<String>,
}

pub async fn link_asset_threat(
    State(state): State<AppState>,
    Json(req): Json<LinkAssetThreatRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let asset_name = req.asset_name.unwrap_or_default();
    let threat_name = req.threat_name.unwrap_or_default();
    if asset_name.is_empty() || threat_name.is_empty() {
        return Err(ApiError::missing("Asset name and Threat name are required"));
    }

    let pairs = links::link_asset_threat(&state.graph, &asset_name, &threat_name).await?;
    if pairs.is_empty() {
        return Err(ApiError::not_found("Asset or Threat not found"));
    }

    info!(asset = %asset_name, threat = %threat_name, "Exposure link merged");
    Ok(Json(json!({ "message": "Link created", "links": pairs })))
}

pub async fn link_asset_vulnerability(
    State(state): State<AppState>,
    Json(req): Json<LinkAssetVulnerabilityRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let asset_name = req.asset_name.unwrap_or_default();
    let vuln_name = req.vuln_name.unwrap_or_default();
    if asset_name.is_empty() || vuln_name.is_empty() {
        return Err(ApiError::missing(
            "Both assetName and vulnName are required.",
        ));
    }

    match links::link_asset_vulnerability(&state.graph, &asset_name, &vuln_name).await? {
        VulnerabilityLink::Linked => {
            info!(asset = %asset_name, vulnerability = %vuln_name, "Vulnerability link merged");
            Ok((
                StatusCode::CREATED,
                Json(json!({
                    "message": format!("Successfully linked {asset_name} to {vuln_name}.")
                })),
            ))
        }
        VulnerabilityLink::AssetMissing => Err(ApiError::not_found("Asset not found.")),
        VulnerabilityLink::VulnerabilityMissing => {
            Err(ApiError::not_found("Vulnerability not found."))
        }
    }
}

pub async fn list_relationships(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ExposurePair>>> {
    Ok(Json(links::list_exposures(&state.graph).await?))
}

pub async fn calculate_risk(State(state): State<AppState>) -> ApiResult<Json<Vec<RiskEntry>>> {
    Ok(Json(links::calculate_risk(&state.graph).await?))
}

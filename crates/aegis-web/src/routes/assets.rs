//! Asset route handlers.

use aegis_core::entity::{Asset, AssetUpdate};
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

pub async fn list_assets(State(state): State<AppState>) -> ApiResult<Json<Vec<Properties>>> {
    let assets = entities::list_all(&state.graph, Asset::LABEL).await?;
    Ok(Json(assets))
}

pub async fn create_asset(
    State(state): State<AppState>,
    Json(asset): Json<Asset>,
) -> ApiResult<(StatusCode, Json<Properties>)> {
    let created = entities::create(&state.graph, &asset).await?;
    info!(asset_id = %asset.asset_id, "Asset created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_asset(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
    Json(update): Json<AssetUpdate>,
) -> ApiResult<Json<Properties>> {
    let updated = entities::update(&state.graph, &asset_id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Asset not found"))?;
    Ok(Json(updated))
}

pub async fn delete_asset(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    if entities::delete(&state.graph, Asset::LABEL, Asset::KEY, &asset_id).await? {
        info!(asset_id = %asset_id, "Asset deleted");
        Ok(Json(json!({ "message": "Asset deleted successfully" })))
    } else {
        Err(ApiError::not_found("Asset not found"))
    }
}

//! Whole-graph export route.

use aegis_graph::queries::export::{self, GraphExport};
use axum::{extract::State, Json};

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn export_graph(State(state): State<AppState>) -> ApiResult<Json<GraphExport>> {
    Ok(Json(export::export_graph(&state.graph).await?))
}

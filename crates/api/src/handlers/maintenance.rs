//! Handlers for maintenance edits and derivation runs.

use std::collections::HashMap;

use assetforge_core::maintenance::MaintenanceInputs;
use assetforge_core::types::DbId;
use assetforge_db::models::asset::UpdateAssetMaintenance;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::engine;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /assets/maintenance/recompute`.
#[derive(Debug, Deserialize)]
pub struct RecomputeRequest {
    pub asset_ids: Vec<DbId>,
    /// Inputs before the caller's change, keyed by asset id.
    #[serde(default)]
    pub prior: HashMap<DbId, MaintenanceInputs>,
}

/// PATCH /api/v1/assets/{id}/maintenance
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAssetMaintenance>,
) -> AppResult<impl IntoResponse> {
    let asset = engine::maintenance::update_inputs(
        &state.pool,
        id,
        &input,
        engine::today(),
        state.config.maintenance_lookahead_days,
    )
    .await?;
    Ok(Json(DataResponse { data: asset }))
}

/// POST /api/v1/assets/maintenance/recompute
pub async fn recompute(
    State(state): State<AppState>,
    Json(request): Json<RecomputeRequest>,
) -> AppResult<impl IntoResponse> {
    let summary = engine::maintenance::recompute(
        &state.pool,
        &request.asset_ids,
        &request.prior,
        engine::today(),
        state.config.maintenance_lookahead_days,
    )
    .await?;
    Ok(Json(DataResponse { data: summary }))
}

/// POST /api/v1/assets/maintenance/refresh
pub async fn refresh(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let summary = engine::maintenance::refresh(
        &state.pool,
        engine::today(),
        state.config.maintenance_lookahead_days,
    )
    .await?;
    Ok(Json(DataResponse { data: summary }))
}

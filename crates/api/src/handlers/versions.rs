//! Handlers for version chain transitions.
//!
//! Transitions return a `TransitionOutcome` listing every asset they
//! changed so clients refresh exactly those.

use assetforge_core::types::DbId;
use assetforge_core::versioning::PlannedVersionInput;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::engine;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Optional body for activation.
#[derive(Debug, Default, Deserialize)]
pub struct ActivateRequest {
    /// The Live asset being replaced. Defaults to the recorded predecessor.
    pub related_live_asset_id: Option<DbId>,
}

/// GET /api/v1/assets/{id}/versions
pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let chain = engine::versioning::version_history(&state.pool, id).await?;
    Ok(Json(DataResponse { data: chain }))
}

/// POST /api/v1/assets/{id}/versions/planned
pub async fn create_planned(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PlannedVersionInput>,
) -> AppResult<impl IntoResponse> {
    let outcome = engine::versioning::create_planned(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}

/// POST /api/v1/assets/{id}/versions/activate
///
/// The body is optional; an empty request activates against the recorded
/// predecessor.
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Option<Json<ActivateRequest>>,
) -> AppResult<impl IntoResponse> {
    let Json(request) = body.unwrap_or_default();
    let outcome = engine::versioning::activate_planned(
        &state.pool,
        id,
        request.related_live_asset_id,
        engine::today(),
        state.config.maintenance_lookahead_days,
    )
    .await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// POST /api/v1/assets/{id}/versions/supersede
pub async fn supersede(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let outcome = engine::versioning::supersede(&state.pool, id).await?;
    Ok(Json(DataResponse { data: outcome }))
}

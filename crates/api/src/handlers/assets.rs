//! Handlers for reading assets.

use assetforge_core::error::CoreError;
use assetforge_core::types::DbId;
use assetforge_db::repositories::AssetRepo;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::engine;
use crate::error::AppResult;
use crate::query::NameParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/assets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = AssetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Asset", id })?;
    Ok(Json(DataResponse { data: asset }))
}

/// GET /api/v1/assets/live?name=
///
/// 404 when no Live asset has the name, 409 if more than one does.
pub async fn find_live(
    State(state): State<AppState>,
    Query(params): Query<NameParams>,
) -> AppResult<impl IntoResponse> {
    let asset = engine::versioning::find_related_live_asset(&state.pool, &params.name).await?;
    Ok(Json(DataResponse { data: asset }))
}

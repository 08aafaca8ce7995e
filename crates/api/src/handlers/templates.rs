//! Handlers for the `/templates` resource.

use assetforge_core::error::CoreError;
use assetforge_core::types::DbId;
use assetforge_db::models::asset_template::CreateAssetTemplate;
use assetforge_db::repositories::AssetTemplateRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/templates
///
/// Active templates ordered by name, for the generation picker.
pub async fn list_active(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let templates = AssetTemplateRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: templates }))
}

/// POST /api/v1/templates
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAssetTemplate>,
) -> AppResult<impl IntoResponse> {
    input.check()?;
    let template = AssetTemplateRepo::create(&state.pool, &input).await?;
    tracing::info!(template_id = template.id, name = %template.name, "Created asset template");
    Ok((StatusCode::CREATED, Json(DataResponse { data: template })))
}

/// GET /api/v1/templates/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let template = AssetTemplateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "AssetTemplate",
            id,
        })?;
    Ok(Json(DataResponse { data: template }))
}

/// POST /api/v1/templates/{id}/deactivate
///
/// Soft-deactivates the template. Assets already generated from it keep
/// their link. Returns 404 if no active template has this id.
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !AssetTemplateRepo::deactivate(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "AssetTemplate",
            id,
        }
        .into());
    }
    tracing::info!(template_id = id, "Deactivated asset template");
    Ok(StatusCode::NO_CONTENT)
}

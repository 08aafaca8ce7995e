//! Handlers for bulk generation.

use assetforge_core::generation::GenerationRequest;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::engine;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Preview payload: the first names a request would produce.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub names: Vec<String>,
    pub total: i64,
}

/// POST /api/v1/generation/preview
pub async fn preview(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> AppResult<impl IntoResponse> {
    let names = engine::generation::preview(&state.pool, &request).await?;
    Ok(Json(DataResponse {
        data: PreviewResponse {
            names,
            total: request.quantity,
        },
    }))
}

/// POST /api/v1/generation
///
/// Creates the whole batch or nothing. 400 on invalid input, 404 for an
/// unknown or inactive template, 409 when any name already exists.
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> AppResult<impl IntoResponse> {
    let summary = engine::generation::generate(
        &state.pool,
        &request,
        engine::today(),
        state.config.maintenance_lookahead_days,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: summary })))
}

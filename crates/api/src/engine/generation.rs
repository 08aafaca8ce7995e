//! Bulk generation of assets from a template.

use assetforge_core::error::CoreError;
use assetforge_core::generation::{name_conflict, plan_batch, GenerationRequest};
use assetforge_core::naming;
use assetforge_core::types::{Date, DbId};
use assetforge_db::models::asset_template::AssetTemplate;
use assetforge_db::repositories::{AssetRepo, AssetTemplateRepo, BatchInsertOutcome};
use assetforge_db::DbPool;
use serde::Serialize;

use crate::error::AppResult;

/// One asset created by a batch.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedAsset {
    pub id: DbId,
    pub name: String,
}

/// Result of a committed generation run, in name order.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    pub template_id: DbId,
    pub created_count: usize,
    pub assets: Vec<GeneratedAsset>,
}

async fn active_template(pool: &DbPool, template_id: DbId) -> AppResult<AssetTemplate> {
    let template = AssetTemplateRepo::find_active_by_id(pool, template_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "AssetTemplate",
            id: template_id,
        })?;
    Ok(template)
}

/// The first names a request would generate, without writing anything.
pub async fn preview(pool: &DbPool, request: &GenerationRequest) -> AppResult<Vec<String>> {
    request.validate()?;
    let template = active_template(pool, request.template_id).await?;
    let names = naming::preview_names(
        &request.site_prefix,
        &template.asset_type,
        request.start_number,
        request.quantity,
    )?;
    Ok(names)
}

/// Create `request.quantity` assets from a template as one batch.
///
/// Input is validated before the template is loaded, so a bad quantity
/// never reaches storage. If any generated name already exists the whole
/// batch is rejected with a conflict listing the colliding names.
pub async fn generate(
    pool: &DbPool,
    request: &GenerationRequest,
    today: Date,
    lookahead_days: i64,
) -> AppResult<GenerationSummary> {
    request.validate()?;
    let template = active_template(pool, request.template_id).await?;
    let batch = plan_batch(&template.defaults(), request, today, lookahead_days)?;

    match AssetRepo::insert_batch(pool, &batch).await? {
        BatchInsertOutcome::Created(ids) => {
            tracing::info!(
                template_id = request.template_id,
                site_prefix = %request.site_prefix.trim(),
                start_number = request.start_number,
                count = ids.len(),
                "Generated asset batch"
            );
            let assets: Vec<GeneratedAsset> = ids
                .into_iter()
                .zip(batch)
                .map(|(id, asset)| GeneratedAsset {
                    id,
                    name: asset.name,
                })
                .collect();
            Ok(GenerationSummary {
                template_id: request.template_id,
                created_count: assets.len(),
                assets,
            })
        }
        BatchInsertOutcome::NameConflict(names) => {
            tracing::warn!(
                template_id = request.template_id,
                conflicts = names.len(),
                "Generation rejected: names already exist"
            );
            Err(name_conflict(&names).into())
        }
    }
}

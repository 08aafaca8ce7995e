//! Maintenance derivation entry points.
//!
//! All three paths funnel into `assetforge_core::maintenance`, which only
//! reports rows whose derived columns differ from what is stored. Writes
//! touch the derived columns only, so nothing here can retrigger itself.
//!
//! Rows are read `FOR UPDATE` in the transaction that writes them, so a
//! derivation always reflects the row it overwrites.

use std::collections::{HashMap, HashSet};

use assetforge_core::error::CoreError;
use assetforge_core::maintenance::{
    derive_for_changes, refresh_all, MaintenanceInputs, MaintenanceSnapshot, MaintenanceUpdate,
};
use assetforge_core::types::{Date, DbId};
use assetforge_db::models::asset::{Asset, UpdateAssetMaintenance};
use assetforge_db::repositories::AssetRepo;
use assetforge_db::DbPool;
use serde::Serialize;
use sqlx::PgConnection;

use crate::error::AppResult;

/// What a recompute or refresh evaluated and wrote.
#[derive(Debug, Clone, Serialize)]
pub struct RecomputeSummary {
    pub evaluated: usize,
    pub updated: Vec<MaintenanceUpdate>,
}

fn snapshots(assets: &[Asset]) -> Result<Vec<MaintenanceSnapshot>, CoreError> {
    assets.iter().map(Asset::maintenance_snapshot).collect()
}

async fn apply(conn: &mut PgConnection, updates: &[MaintenanceUpdate]) -> AppResult<()> {
    for update in updates {
        AssetRepo::apply_maintenance_update(&mut *conn, update).await?;
    }
    Ok(())
}

/// Edit maintenance inputs on one asset and re-derive in the same transaction.
pub async fn update_inputs(
    pool: &DbPool,
    asset_id: DbId,
    input: &UpdateAssetMaintenance,
    today: Date,
    lookahead_days: i64,
) -> AppResult<Asset> {
    input.validate()?;

    let mut tx = pool.begin().await?;
    let before = AssetRepo::find_for_update(&mut tx, asset_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Asset",
            id: asset_id,
        })?;
    let prior = HashMap::from([(asset_id, before.maintenance_inputs()?)]);

    let after = AssetRepo::update_maintenance_inputs(&mut tx, asset_id, input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Asset",
            id: asset_id,
        })?;

    let updates = derive_for_changes(
        &[after.maintenance_snapshot()?],
        &prior,
        today,
        lookahead_days,
    );
    if updates.is_empty() {
        tx.commit().await?;
        return Ok(after);
    }

    apply(&mut tx, &updates).await?;
    let refreshed = AssetRepo::find_for_update(&mut tx, asset_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Asset",
            id: asset_id,
        })?;
    tx.commit().await?;

    tracing::info!(
        asset_id,
        maintenance_status = ?refreshed.maintenance_status,
        "Maintenance inputs updated"
    );
    Ok(refreshed)
}

/// Re-derive a caller-chosen set of assets.
///
/// `prior` holds each asset's inputs before the caller's change. Assets
/// whose prior inputs equal their current ones are skipped; assets missing
/// from `prior` are always evaluated.
pub async fn recompute(
    pool: &DbPool,
    asset_ids: &[DbId],
    prior: &HashMap<DbId, MaintenanceInputs>,
    today: Date,
    lookahead_days: i64,
) -> AppResult<RecomputeSummary> {
    if asset_ids.is_empty() {
        return Err(CoreError::Validation("asset_ids must not be empty".to_string()).into());
    }

    let unique: Vec<DbId> = asset_ids
        .iter()
        .copied()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let mut tx = pool.begin().await?;
    let assets = AssetRepo::lock_by_ids(&mut tx, &unique).await?;
    if assets.len() != unique.len() {
        let found: HashSet<DbId> = assets.iter().map(|a| a.id).collect();
        let mut missing: Vec<DbId> = unique.into_iter().filter(|id| !found.contains(id)).collect();
        missing.sort_unstable();
        return Err(CoreError::NotFound {
            entity: "Asset",
            id: missing[0],
        }
        .into());
    }

    let updates = derive_for_changes(&snapshots(&assets)?, prior, today, lookahead_days);
    apply(&mut tx, &updates).await?;
    tx.commit().await?;

    tracing::info!(
        evaluated = assets.len(),
        updated = updates.len(),
        "Recomputed maintenance status"
    );
    Ok(RecomputeSummary {
        evaluated: assets.len(),
        updated: updates,
    })
}

/// Re-derive every Live asset against `today`.
///
/// Statuses age with the calendar even when no input changes; this sweep
/// is what moves them along.
pub async fn refresh(pool: &DbPool, today: Date, lookahead_days: i64) -> AppResult<RecomputeSummary> {
    let mut tx = pool.begin().await?;
    let assets = AssetRepo::lock_live(&mut tx).await?;
    let updates = refresh_all(&snapshots(&assets)?, today, lookahead_days);
    apply(&mut tx, &updates).await?;
    tx.commit().await?;

    tracing::info!(
        evaluated = assets.len(),
        updated = updates.len(),
        %today,
        "Refreshed maintenance status"
    );
    Ok(RecomputeSummary {
        evaluated: assets.len(),
        updated: updates,
    })
}

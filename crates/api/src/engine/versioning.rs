//! Version chain transitions.
//!
//! Every transition locks the rows it inspects with `SELECT ... FOR UPDATE`
//! before checking their state, so two concurrent activations of the same
//! chain serialize and the loser sees the winner's result. Rows are always
//! locked in ascending id order, which along a chain is oldest first.

use std::collections::HashMap;

use assetforge_core::asset::VersionStatus;
use assetforge_core::error::CoreError;
use assetforge_core::maintenance::{self, DerivedMaintenance, MaintenanceInputs};
use assetforge_core::types::{Date, DbId};
use assetforge_core::versioning::{
    ensure_can_activate, ensure_can_create_planned, ensure_can_supersede, ensure_is_planned,
    order_chain, resolve_related_live, single_live_match, PlannedVersionInput, Transition,
    TransitionOutcome,
};
use assetforge_db::models::asset::{Asset, CreatePlannedAsset};
use assetforge_db::repositories::AssetRepo;
use assetforge_db::DbPool;
use sqlx::PgConnection;

use crate::error::AppResult;

fn asset_not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: "Asset", id }
}

async fn lock(conn: &mut PgConnection, id: DbId) -> AppResult<Asset> {
    let asset = AssetRepo::find_for_update(conn, id)
        .await?
        .ok_or_else(|| asset_not_found(id))?;
    Ok(asset)
}

fn take(locked: &mut Vec<Asset>, id: DbId) -> Result<Asset, CoreError> {
    let index = locked
        .iter()
        .position(|a| a.id == id)
        .ok_or_else(|| asset_not_found(id))?;
    Ok(locked.swap_remove(index))
}

/// Lock an asset together with its successor, if it has one.
///
/// A successor is inserted after its predecessor and so has the larger id.
/// If a successor gets linked while this transaction waits for the first
/// lock, the next pass locks it too.
async fn lock_with_successor(
    conn: &mut PgConnection,
    asset_id: DbId,
) -> AppResult<(Asset, Option<Asset>)> {
    let mut ids = vec![asset_id];
    loop {
        let mut locked = AssetRepo::lock_by_ids(&mut *conn, &ids).await?;
        let asset = take(&mut locked, asset_id)?;
        match asset.successor_asset_id {
            Some(successor_id) if !ids.contains(&successor_id) => ids.push(successor_id),
            successor_id => {
                let successor = successor_id.and_then(|id| take(&mut locked, id).ok());
                return Ok((asset, successor));
            }
        }
    }
}

/// Branch a Planned copy off a Live asset. The original stays Live.
pub async fn create_planned(
    pool: &DbPool,
    original_id: DbId,
    input: &PlannedVersionInput,
) -> AppResult<TransitionOutcome> {
    let mut tx = pool.begin().await?;

    let (original, successor) = lock_with_successor(&mut tx, original_id).await?;
    let member = original.chain_member()?;
    let pending_successor = successor.map(|s| s.version_status()).transpose()?;
    ensure_can_create_planned(&member, pending_successor)?;
    input.validate(&original.version_label)?;

    let planned = AssetRepo::insert_planned(
        &mut tx,
        &CreatePlannedAsset {
            predecessor_id: original_id,
            version_label: input.new_version_label.trim().to_string(),
            version_notes: input.notes.clone(),
            planned_go_live_date: input.go_live_date,
            assigned_engineer_id: input.assigned_engineer_id,
        },
    )
    .await?
    .ok_or_else(|| asset_not_found(original_id))?;
    AssetRepo::set_successor(&mut tx, original_id, planned.id).await?;

    tx.commit().await?;

    tracing::info!(
        original_id,
        planned_id = planned.id,
        version_label = %planned.version_label,
        "Created planned version"
    );

    Ok(TransitionOutcome {
        transition: Transition::CreatePlanned,
        asset_id: planned.id,
        changed_asset_ids: vec![original_id, planned.id],
    })
}

/// Promote a Planned asset to Live and demote the Live asset it replaces.
///
/// Both writes commit together. `requested_related_id`, when given, must be
/// the planned asset's recorded predecessor.
pub async fn activate_planned(
    pool: &DbPool,
    planned_id: DbId,
    requested_related_id: Option<DbId>,
    today: Date,
    lookahead_days: i64,
) -> AppResult<TransitionOutcome> {
    // The predecessor link is fixed at insert, so it can be read before locking.
    let unlocked = AssetRepo::find_by_id(pool, planned_id)
        .await?
        .ok_or_else(|| asset_not_found(planned_id))?
        .chain_member()?;
    ensure_is_planned(&unlocked)?;
    let related_id = resolve_related_live(&unlocked, requested_related_id)?;

    let mut tx = pool.begin().await?;
    let mut locked = AssetRepo::lock_by_ids(&mut tx, &[related_id, planned_id]).await?;
    let planned = take(&mut locked, planned_id)?;
    let related = take(&mut locked, related_id)?;
    ensure_can_activate(&planned.chain_member()?, &related.chain_member()?)?;

    // Demote first: the live-name index allows one Live row per name at any instant.
    AssetRepo::set_version_state(
        &mut tx,
        related_id,
        VersionStatus::Superseded,
        DerivedMaintenance::default(),
    )
    .await?
    .ok_or_else(|| asset_not_found(related_id))?;

    let inputs = MaintenanceInputs {
        version_status: VersionStatus::Live,
        ..planned.maintenance_inputs()?
    };
    let derived = maintenance::derive(&inputs, today, lookahead_days);
    AssetRepo::set_version_state(&mut tx, planned_id, VersionStatus::Live, derived)
        .await?
        .ok_or_else(|| asset_not_found(planned_id))?;

    tx.commit().await?;

    tracing::info!(planned_id, superseded_id = related_id, "Activated planned version");

    Ok(TransitionOutcome {
        transition: Transition::ActivatePlanned,
        asset_id: planned_id,
        changed_asset_ids: vec![related_id, planned_id],
    })
}

/// Retire a Live asset without a replacement.
pub async fn supersede(pool: &DbPool, asset_id: DbId) -> AppResult<TransitionOutcome> {
    let mut tx = pool.begin().await?;

    let asset = lock(&mut tx, asset_id).await?;
    ensure_can_supersede(&asset.chain_member()?)?;
    AssetRepo::set_version_state(
        &mut tx,
        asset_id,
        VersionStatus::Superseded,
        DerivedMaintenance::default(),
    )
    .await?
    .ok_or_else(|| asset_not_found(asset_id))?;

    tx.commit().await?;

    tracing::info!(asset_id, "Superseded asset");

    Ok(TransitionOutcome {
        transition: Transition::Supersede,
        asset_id,
        changed_asset_ids: vec![asset_id],
    })
}

/// The Live asset carrying a logical name.
pub async fn find_related_live_asset(pool: &DbPool, name: &str) -> AppResult<Asset> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Asset name must not be empty".to_string()).into());
    }
    let live_ids = AssetRepo::list_live_ids_by_name(pool, name).await?;
    let id = single_live_match(name, &live_ids)?;
    let asset = AssetRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| asset_not_found(id))?;
    Ok(asset)
}

/// Every version in the chain containing `asset_id`, oldest first.
pub async fn version_history(pool: &DbPool, asset_id: DbId) -> AppResult<Vec<Asset>> {
    let chain = AssetRepo::list_chain(pool, asset_id).await?;
    if chain.is_empty() {
        return Err(asset_not_found(asset_id).into());
    }

    let members = chain
        .iter()
        .map(Asset::chain_member)
        .collect::<Result<Vec<_>, _>>()?;
    let mut by_id: HashMap<DbId, Asset> = chain.into_iter().map(|a| (a.id, a)).collect();

    Ok(order_chain(members)
        .into_iter()
        .filter_map(|m| by_id.remove(&m.id))
        .collect())
}

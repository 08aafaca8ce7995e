//! Repository for the `assets` table.

use assetforge_core::asset::VersionStatus;
use assetforge_core::generation::BatchAsset;
use assetforge_core::maintenance::{DerivedMaintenance, MaintenanceUpdate};
use assetforge_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::asset::{Asset, CreatePlannedAsset, UpdateAssetMaintenance};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, asset_type, manufacturer, site, status, criticality, condition, \
    version_status, version_label, version_notes, planned_go_live_date, assigned_engineer_id, \
    purchase_cost, current_value, warranty_expiration, gl_account, firmware_version, \
    ip_address, mac_address, configuration_notes, maintenance_interval_days, \
    last_maintenance_date, next_maintenance_due, maintenance_status, parent_asset_id, \
    predecessor_asset_id, successor_asset_id, template_id, created_at, updated_at";

/// Result of an all-or-nothing batch insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchInsertOutcome {
    /// Every row was inserted; ids are in batch order.
    Created(Vec<DbId>),
    /// Some names already exist. Nothing was inserted.
    NameConflict(Vec<String>),
}

/// Provides batch creation, version-chain and maintenance operations for assets.
pub struct AssetRepo;

impl AssetRepo {
    // ── Reads ────────────────────────────────────────────────────────

    /// Find an asset by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Ids of every Live asset carrying `name`.
    ///
    /// The live-name unique index means this returns at most one id on a
    /// healthy database; callers still treat several as a conflict.
    pub async fn list_live_ids_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT id FROM assets WHERE name = $1 AND version_status = 'live' ORDER BY id",
        )
        .bind(name)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Every member of the version chain containing `id`, in id order.
    ///
    /// Walks predecessor links back to the root, then successor links
    /// forward from it. `UNION` (not `UNION ALL`) stops on a cyclic link.
    pub async fn list_chain(pool: &PgPool, id: DbId) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!(
            "WITH RECURSIVE back AS ( \
                 SELECT id, predecessor_asset_id FROM assets WHERE id = $1 \
                 UNION \
                 SELECT a.id, a.predecessor_asset_id FROM assets a \
                 JOIN back b ON a.id = b.predecessor_asset_id \
             ), \
             fwd AS ( \
                 SELECT id, successor_asset_id FROM assets \
                 WHERE id IN (SELECT id FROM back WHERE predecessor_asset_id IS NULL) \
                 UNION \
                 SELECT a.id, a.successor_asset_id FROM assets a \
                 JOIN fwd f ON a.id = f.successor_asset_id \
             ) \
             SELECT {COLUMNS} FROM assets \
             WHERE id IN (SELECT id FROM back UNION SELECT id FROM fwd) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }

    /// Total number of assets (all version states).
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM assets")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    // ── Batch generation ─────────────────────────────────────────────

    /// Insert a generated batch in a single transaction.
    ///
    /// Names already present (in any version state) abort the batch before
    /// anything is written. A concurrent batch racing for the same names
    /// fails on `uq_assets_live_name`, which rolls the whole transaction back.
    pub async fn insert_batch(
        pool: &PgPool,
        batch: &[BatchAsset],
    ) -> Result<BatchInsertOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let names: Vec<String> = batch.iter().map(|a| a.name.clone()).collect();
        let existing: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT name FROM assets WHERE name = ANY($1) ORDER BY name",
        )
        .bind(&names)
        .fetch_all(&mut *tx)
        .await?;

        if !existing.is_empty() {
            tx.rollback().await?;
            return Ok(BatchInsertOutcome::NameConflict(
                existing.into_iter().map(|r| r.0).collect(),
            ));
        }

        let mut ids = Vec::with_capacity(batch.len());
        for asset in batch {
            let row: (DbId,) = sqlx::query_as(
                "INSERT INTO assets \
                    (name, asset_type, manufacturer, site, status, criticality, condition, \
                     version_status, version_label, purchase_cost, current_value, \
                     configuration_notes, maintenance_interval_days, next_maintenance_due, \
                     maintenance_status, template_id) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
                 RETURNING id",
            )
            .bind(&asset.name)
            .bind(&asset.asset_type)
            .bind(&asset.manufacturer)
            .bind(&asset.site)
            .bind(asset.status.as_str())
            .bind(asset.criticality.as_str())
            .bind(asset.condition.as_str())
            .bind(asset.version_status.as_str())
            .bind(&asset.version_label)
            .bind(asset.purchase_cost)
            .bind(asset.current_value)
            .bind(&asset.configuration_notes)
            .bind(asset.maintenance_interval_days)
            .bind(asset.derived.next_maintenance_due)
            .bind(asset.derived.maintenance_status.map(|s| s.as_str()))
            .bind(asset.template_id)
            .fetch_one(&mut *tx)
            .await?;
            ids.push(row.0);
        }

        tx.commit().await?;
        Ok(BatchInsertOutcome::Created(ids))
    }

    // ── Version chain (run inside the caller's transaction) ──────────

    /// Load an asset and lock its row until the transaction ends.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Lock several assets, taking the row locks in ascending id order.
    ///
    /// Every multi-row lock in the crate goes through this order, so two
    /// transactions touching the same chain queue instead of deadlocking.
    /// Missing ids are skipped.
    pub async fn lock_by_ids(
        conn: &mut PgConnection,
        ids: &[DbId],
    ) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assets WHERE id = ANY($1) ORDER BY id FOR UPDATE"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(ids)
            .fetch_all(conn)
            .await
    }

    /// Lock every Live asset, in id order, for a maintenance sweep.
    ///
    /// A row demoted by a transaction this one waited on is re-checked
    /// after the wait and drops out of the result.
    pub async fn lock_live(conn: &mut PgConnection) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assets WHERE version_status = 'live' ORDER BY id FOR UPDATE"
        );
        sqlx::query_as::<_, Asset>(&query).fetch_all(conn).await
    }

    /// Copy a Live asset into a new Planned row linked back to it.
    ///
    /// Derived maintenance columns start empty: planned assets are not
    /// evaluated until they go live. Returns `None` if the predecessor does
    /// not exist.
    pub async fn insert_planned(
        conn: &mut PgConnection,
        input: &CreatePlannedAsset,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets \
                (name, asset_type, manufacturer, site, status, criticality, condition, \
                 version_status, version_label, version_notes, planned_go_live_date, \
                 assigned_engineer_id, purchase_cost, current_value, warranty_expiration, \
                 gl_account, firmware_version, ip_address, mac_address, configuration_notes, \
                 maintenance_interval_days, last_maintenance_date, parent_asset_id, \
                 predecessor_asset_id, template_id) \
             SELECT name, asset_type, manufacturer, site, status, criticality, condition, \
                 $2, $3, $4, $5, \
                 $6, purchase_cost, current_value, warranty_expiration, \
                 gl_account, firmware_version, ip_address, mac_address, configuration_notes, \
                 maintenance_interval_days, last_maintenance_date, parent_asset_id, \
                 id, template_id \
             FROM assets WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(input.predecessor_id)
            .bind(VersionStatus::Planned.as_str())
            .bind(input.version_label.trim())
            .bind(&input.version_notes)
            .bind(input.planned_go_live_date)
            .bind(input.assigned_engineer_id)
            .fetch_optional(conn)
            .await
    }

    /// Point `id` forward to its successor version.
    pub async fn set_successor(
        conn: &mut PgConnection,
        id: DbId,
        successor_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE assets SET successor_asset_id = $2 WHERE id = $1")
            .bind(id)
            .bind(successor_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Move an asset to a new version state, writing its derived maintenance
    /// columns in the same statement.
    pub async fn set_version_state(
        conn: &mut PgConnection,
        id: DbId,
        version_status: VersionStatus,
        derived: DerivedMaintenance,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET \
                version_status = $2, \
                next_maintenance_due = $3, \
                maintenance_status = $4 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(version_status.as_str())
            .bind(derived.next_maintenance_due)
            .bind(derived.maintenance_status.map(|s| s.as_str()))
            .fetch_optional(conn)
            .await
    }

    // ── Maintenance ──────────────────────────────────────────────────

    /// Apply a direct edit to the maintenance inputs. Only non-`None` fields
    /// are written; derived columns are left to the caller.
    pub async fn update_maintenance_inputs(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateAssetMaintenance,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET \
                maintenance_interval_days = COALESCE($2, maintenance_interval_days), \
                last_maintenance_date = COALESCE($3, last_maintenance_date), \
                status = COALESCE($4, status) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(input.maintenance_interval_days)
            .bind(input.last_maintenance_date)
            .bind(input.status.map(|s| s.as_str()))
            .fetch_optional(conn)
            .await
    }

    /// Write derived maintenance columns only. Returns `true` if a row changed.
    pub async fn apply_maintenance_update(
        conn: &mut PgConnection,
        update: &MaintenanceUpdate,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE assets SET next_maintenance_due = $2, maintenance_status = $3 \
             WHERE id = $1 \
               AND (next_maintenance_due IS DISTINCT FROM $2 \
                    OR maintenance_status IS DISTINCT FROM $3)",
        )
        .bind(update.asset_id)
        .bind(update.next_maintenance_due)
        .bind(update.maintenance_status.map(|s| s.as_str()))
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

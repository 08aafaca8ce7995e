//! Asset model and DTOs.
//!
//! Categorical columns are stored as text; the accessor methods parse them
//! into the core enums so a corrupt value surfaces as an error instead of a
//! silently wrong transition.

use assetforge_core::asset::{AssetStatus, MaintenanceStatus, VersionStatus};
use assetforge_core::error::CoreError;
use assetforge_core::maintenance::{DerivedMaintenance, MaintenanceInputs, MaintenanceSnapshot};
use assetforge_core::types::{Date, DbId, Timestamp};
use assetforge_core::versioning::ChainMember;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: DbId,
    pub name: String,
    pub asset_type: String,
    pub manufacturer: Option<String>,
    pub site: Option<String>,
    pub status: String,
    pub criticality: String,
    pub condition: String,
    pub version_status: String,
    pub version_label: String,
    pub version_notes: Option<String>,
    pub planned_go_live_date: Option<Date>,
    pub assigned_engineer_id: Option<DbId>,
    pub purchase_cost: Option<f64>,
    pub current_value: Option<f64>,
    pub warranty_expiration: Option<Date>,
    pub gl_account: Option<String>,
    pub firmware_version: Option<String>,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
    pub configuration_notes: Option<String>,
    pub maintenance_interval_days: Option<i32>,
    pub last_maintenance_date: Option<Date>,
    pub next_maintenance_due: Option<Date>,
    pub maintenance_status: Option<String>,
    pub parent_asset_id: Option<DbId>,
    pub predecessor_asset_id: Option<DbId>,
    pub successor_asset_id: Option<DbId>,
    pub template_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Asset {
    pub fn version_status(&self) -> Result<VersionStatus, CoreError> {
        self.version_status.parse()
    }

    pub fn status(&self) -> Result<AssetStatus, CoreError> {
        self.status.parse()
    }

    pub fn chain_member(&self) -> Result<ChainMember, CoreError> {
        Ok(ChainMember {
            id: self.id,
            name: self.name.clone(),
            version_status: self.version_status()?,
            version_label: self.version_label.clone(),
            predecessor_id: self.predecessor_asset_id,
            successor_id: self.successor_asset_id,
        })
    }

    pub fn maintenance_inputs(&self) -> Result<MaintenanceInputs, CoreError> {
        Ok(MaintenanceInputs {
            maintenance_interval_days: self.maintenance_interval_days,
            last_maintenance_date: self.last_maintenance_date,
            status: self.status()?,
            version_status: self.version_status()?,
        })
    }

    pub fn stored_maintenance(&self) -> Result<DerivedMaintenance, CoreError> {
        let maintenance_status = self
            .maintenance_status
            .as_deref()
            .map(str::parse::<MaintenanceStatus>)
            .transpose()?;
        Ok(DerivedMaintenance {
            next_maintenance_due: self.next_maintenance_due,
            maintenance_status,
        })
    }

    pub fn maintenance_snapshot(&self) -> Result<MaintenanceSnapshot, CoreError> {
        Ok(MaintenanceSnapshot {
            asset_id: self.id,
            inputs: self.maintenance_inputs()?,
            stored: self.stored_maintenance()?,
        })
    }
}

/// Compact row for dashboard lists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssetSummary {
    pub id: DbId,
    pub name: String,
    pub site: Option<String>,
    pub criticality: String,
    pub current_value: Option<f64>,
    pub next_maintenance_due: Option<Date>,
    pub maintenance_status: Option<String>,
}

/// Insert payload for a planned version, copied from its Live predecessor.
#[derive(Debug, Clone)]
pub struct CreatePlannedAsset {
    pub predecessor_id: DbId,
    pub version_label: String,
    pub version_notes: Option<String>,
    pub planned_go_live_date: Option<Date>,
    pub assigned_engineer_id: Option<DbId>,
}

/// DTO for direct maintenance edits. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAssetMaintenance {
    pub maintenance_interval_days: Option<i32>,
    pub last_maintenance_date: Option<Date>,
    pub status: Option<AssetStatus>,
}

impl UpdateAssetMaintenance {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.maintenance_interval_days.is_none()
            && self.last_maintenance_date.is_none()
            && self.status.is_none()
        {
            return Err(CoreError::Validation(
                "At least one of maintenance_interval_days, last_maintenance_date or status is required"
                    .to_string(),
            ));
        }
        if let Some(days) = self.maintenance_interval_days {
            if days <= 0 {
                return Err(CoreError::Validation(format!(
                    "Maintenance interval must be a positive number of days, got {days}"
                )));
            }
        }
        Ok(())
    }
}

//! Bulk generation planning.
//!
//! Turns a validated request plus a template's defaults into the full set of
//! asset rows a batch will insert. Persistence (and its all-or-nothing
//! guarantee) belongs to the caller; everything here is deterministic.

use serde::{Deserialize, Serialize};

use crate::asset::{AssetStatus, Condition, Criticality, VersionStatus};
use crate::error::CoreError;
use crate::maintenance::{self, DerivedMaintenance, MaintenanceInputs};
use crate::naming;
use crate::template::TemplateDefaults;
use crate::types::{Date, DbId};

/// Version label assigned to every freshly generated asset.
pub const INITIAL_VERSION_LABEL: &str = "1.0";

/// Maximum number of colliding names quoted in a conflict message.
pub const MAX_REPORTED_CONFLICTS: usize = 10;

/// Caller input for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub template_id: DbId,
    pub quantity: i64,
    pub site_prefix: String,
    pub start_number: i64,
}

impl GenerationRequest {
    /// Reject bad input before any storage access.
    pub fn validate(&self) -> Result<(), CoreError> {
        naming::validate_batch_bounds(&self.site_prefix, self.start_number, self.quantity)
    }
}

/// One asset row to be inserted as part of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchAsset {
    pub name: String,
    pub asset_type: String,
    pub manufacturer: Option<String>,
    pub site: String,
    pub status: AssetStatus,
    pub criticality: Criticality,
    pub condition: Condition,
    pub version_status: VersionStatus,
    pub version_label: String,
    pub purchase_cost: Option<f64>,
    pub current_value: Option<f64>,
    pub configuration_notes: Option<String>,
    pub maintenance_interval_days: Option<i32>,
    pub derived: DerivedMaintenance,
    pub template_id: DbId,
}

/// Build every row of a batch, in name order.
pub fn plan_batch(
    template: &TemplateDefaults,
    request: &GenerationRequest,
    today: Date,
    lookahead_days: i64,
) -> Result<Vec<BatchAsset>, CoreError> {
    request.validate()?;
    let names = naming::asset_names(
        &request.site_prefix,
        &template.asset_type,
        request.start_number,
        request.quantity,
    )?;

    let inputs = MaintenanceInputs {
        maintenance_interval_days: template.maintenance_interval_days,
        last_maintenance_date: None,
        status: AssetStatus::Active,
        version_status: VersionStatus::Live,
    };
    let derived = maintenance::derive(&inputs, today, lookahead_days);
    let site = request.site_prefix.trim().to_string();

    Ok(names
        .into_iter()
        .map(|name| BatchAsset {
            name,
            asset_type: template.asset_type.clone(),
            manufacturer: template.manufacturer.clone(),
            site: site.clone(),
            status: inputs.status,
            criticality: Criticality::Medium,
            condition: Condition::Good,
            version_status: inputs.version_status,
            version_label: INITIAL_VERSION_LABEL.to_string(),
            purchase_cost: template.cost,
            current_value: template.cost,
            configuration_notes: template.configuration_notes.clone(),
            maintenance_interval_days: template.maintenance_interval_days,
            derived,
            template_id: template.template_id,
        })
        .collect())
}

/// Build the conflict error for a batch whose names already exist.
pub fn name_conflict(conflicting: &[String]) -> CoreError {
    let shown: Vec<&str> = conflicting
        .iter()
        .take(MAX_REPORTED_CONFLICTS)
        .map(String::as_str)
        .collect();
    let more = conflicting.len().saturating_sub(shown.len());
    let suffix = if more > 0 {
        format!(" (and {more} more)")
    } else {
        String::new()
    };
    CoreError::Conflict(format!(
        "Asset names already exist: {}{suffix}. No assets were created.",
        shown.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::asset::MaintenanceStatus;

    fn vehicle_template() -> TemplateDefaults {
        TemplateDefaults {
            template_id: 11,
            asset_type: "Vehicle".to_string(),
            manufacturer: Some("Ford".to_string()),
            cost: Some(42_000.0),
            maintenance_interval_days: Some(90),
            configuration_notes: Some("Standard fleet spec".to_string()),
        }
    }

    fn request(quantity: i64) -> GenerationRequest {
        GenerationRequest {
            template_id: 11,
            quantity,
            site_prefix: "SITE-A".to_string(),
            start_number: 1,
        }
    }

    fn today() -> Date {
        Date::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn plan_copies_template_defaults() {
        let batch = plan_batch(&vehicle_template(), &request(3), today(), 30).unwrap();
        let names: Vec<&str> = batch.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            ["SITE-A-VEHICLE-0001", "SITE-A-VEHICLE-0002", "SITE-A-VEHICLE-0003"]
        );
        for asset in &batch {
            assert_eq!(asset.asset_type, "Vehicle");
            assert_eq!(asset.manufacturer.as_deref(), Some("Ford"));
            assert_eq!(asset.site, "SITE-A");
            assert_eq!(asset.version_status, VersionStatus::Live);
            assert_eq!(asset.version_label, INITIAL_VERSION_LABEL);
            assert_eq!(asset.status, AssetStatus::Active);
            assert_eq!(asset.purchase_cost, Some(42_000.0));
            assert_eq!(asset.current_value, Some(42_000.0));
            assert_eq!(asset.maintenance_interval_days, Some(90));
            assert_eq!(asset.template_id, 11);
        }
    }

    #[test]
    fn never_maintained_assets_have_no_status_yet() {
        let batch = plan_batch(&vehicle_template(), &request(1), today(), 30).unwrap();
        assert_eq!(batch[0].derived.next_maintenance_due, None);
        assert_ne!(batch[0].derived.maintenance_status, Some(MaintenanceStatus::Overdue));
    }

    #[test]
    fn quantity_zero_rejected() {
        assert_matches!(
            plan_batch(&vehicle_template(), &request(0), today(), 30),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn quantity_over_limit_rejected() {
        assert_matches!(request(101).validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn conflict_message_lists_names() {
        let err = name_conflict(&["A-PUMP-0001".to_string(), "A-PUMP-0002".to_string()]);
        assert_matches!(err, CoreError::Conflict(msg) if msg.contains("A-PUMP-0001, A-PUMP-0002"));
    }

    #[test]
    fn conflict_message_is_capped() {
        let names: Vec<String> = (1..=15).map(|n| format!("A-PUMP-{n:04}")).collect();
        let err = name_conflict(&names);
        assert_matches!(err, CoreError::Conflict(msg) if msg.contains("(and 5 more)") && !msg.contains("A-PUMP-0011"));
    }
}

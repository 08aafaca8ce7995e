//! Asset template model and DTOs.

use assetforge_core::error::CoreError;
use assetforge_core::template::{validate_template_fields, TemplateDefaults};
use assetforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `asset_templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssetTemplate {
    pub id: DbId,
    pub name: String,
    pub asset_type: String,
    pub default_manufacturer: Option<String>,
    pub default_cost: Option<f64>,
    pub maintenance_interval_days: Option<i32>,
    pub is_active: bool,
    pub configuration_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AssetTemplate {
    /// The fields a generation batch copies onto every asset.
    pub fn defaults(&self) -> TemplateDefaults {
        TemplateDefaults {
            template_id: self.id,
            asset_type: self.asset_type.clone(),
            manufacturer: self.default_manufacturer.clone(),
            cost: self.default_cost,
            maintenance_interval_days: self.maintenance_interval_days,
            configuration_notes: self.configuration_notes.clone(),
        }
    }
}

/// Compact row for template pickers.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TemplateSummary {
    pub id: DbId,
    pub name: String,
    pub asset_type: String,
}

/// DTO for creating a new template.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAssetTemplate {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub asset_type: String,
    pub default_manufacturer: Option<String>,
    #[validate(range(min = 0.0))]
    pub default_cost: Option<f64>,
    #[validate(range(min = 1))]
    pub maintenance_interval_days: Option<i32>,
    pub configuration_notes: Option<String>,
}

impl CreateAssetTemplate {
    /// Run the declarative field rules, then the template invariant.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        validate_template_fields(
            &self.name,
            &self.asset_type,
            self.maintenance_interval_days,
            self.default_cost,
        )
    }
}

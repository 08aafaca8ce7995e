//! Repository for the `asset_templates` table.

use assetforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::asset_template::{AssetTemplate, CreateAssetTemplate, TemplateSummary};

const COLUMNS: &str = "id, name, asset_type, default_manufacturer, default_cost, \
     maintenance_interval_days, is_active, configuration_notes, created_at, updated_at";

/// Provides read access and soft-deactivation for asset templates.
pub struct AssetTemplateRepo;

impl AssetTemplateRepo {
    /// Insert a new template, returning the created row. New templates are active.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAssetTemplate,
    ) -> Result<AssetTemplate, sqlx::Error> {
        let query = format!(
            "INSERT INTO asset_templates \
                (name, asset_type, default_manufacturer, default_cost, \
                 maintenance_interval_days, configuration_notes) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssetTemplate>(&query)
            .bind(input.name.trim())
            .bind(input.asset_type.trim())
            .bind(&input.default_manufacturer)
            .bind(input.default_cost)
            .bind(input.maintenance_interval_days)
            .bind(&input.configuration_notes)
            .fetch_one(pool)
            .await
    }

    /// Find a template by ID, active or not.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AssetTemplate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM asset_templates WHERE id = $1");
        sqlx::query_as::<_, AssetTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a template by ID only if it is active. Generation resolves
    /// templates through this so a deactivated template reads as absent.
    pub async fn find_active_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AssetTemplate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM asset_templates WHERE id = $1 AND is_active = true"
        );
        sqlx::query_as::<_, AssetTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active templates ordered by name.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<TemplateSummary>, sqlx::Error> {
        sqlx::query_as::<_, TemplateSummary>(
            "SELECT id, name, asset_type FROM asset_templates \
             WHERE is_active = true \
             ORDER BY name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Soft-deactivate a template (set is_active = false).
    ///
    /// Returns `true` if an active template was deactivated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE asset_templates SET is_active = false WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

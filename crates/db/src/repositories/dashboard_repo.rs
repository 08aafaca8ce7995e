//! Read-only aggregations over `assets` for the dashboard.
//!
//! Inventory is the Live assets. Superseded rows are history and Planned
//! rows are pending copies of a Live asset, so only the version-status
//! grouping looks at them.

use assetforge_core::dashboard::DashboardMetrics;
use sqlx::PgPool;

use crate::models::asset::AssetSummary;

const SUMMARY_COLUMNS: &str = "id, name, site, criticality, current_value, \
    next_maintenance_due, maintenance_status";

/// A column the dashboard groups assets by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetGrouping {
    Status,
    Criticality,
    VersionStatus,
    MaintenanceStatus,
    Condition,
    Site,
}

impl AssetGrouping {
    /// Column name. Only these fixed identifiers are ever interpolated into SQL.
    pub fn column(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Criticality => "criticality",
            Self::VersionStatus => "version_status",
            Self::MaintenanceStatus => "maintenance_status",
            Self::Condition => "condition",
            Self::Site => "site",
        }
    }

    fn includes_every_version(self) -> bool {
        matches!(self, Self::VersionStatus)
    }
}

pub struct DashboardRepo;

impl DashboardRepo {
    /// Asset counts grouped by `grouping`, as `(key, count)` rows.
    ///
    /// NULL keys come back as `None`. Counts are `f64` so the rows feed the
    /// same chart helpers as value sums.
    pub async fn count_by(
        pool: &PgPool,
        grouping: AssetGrouping,
    ) -> Result<Vec<(Option<String>, f64)>, sqlx::Error> {
        let column = grouping.column();
        let filter = if grouping.includes_every_version() {
            ""
        } else {
            "WHERE version_status = 'live'"
        };
        let query = format!(
            "SELECT {column}, COUNT(*)::float8 FROM assets {filter} \
             GROUP BY {column} ORDER BY {column}"
        );
        sqlx::query_as::<_, (Option<String>, f64)>(&query)
            .fetch_all(pool)
            .await
    }

    /// Sum of current value per site.
    pub async fn value_by_site(pool: &PgPool) -> Result<Vec<(Option<String>, f64)>, sqlx::Error> {
        sqlx::query_as::<_, (Option<String>, f64)>(
            "SELECT site, COALESCE(SUM(current_value), 0)::float8 FROM assets \
             WHERE version_status = 'live' \
             GROUP BY site ORDER BY site",
        )
        .fetch_all(pool)
        .await
    }

    /// Headline numbers in a single pass.
    pub async fn metrics(pool: &PgPool) -> Result<DashboardMetrics, sqlx::Error> {
        let row: (i64, i64, i64, i64, f64, i64) = sqlx::query_as(
            "SELECT \
                COUNT(*), \
                COUNT(*) FILTER (WHERE status = 'active'), \
                COUNT(*) FILTER (WHERE maintenance_status = 'overdue'), \
                COUNT(*) FILTER (WHERE criticality = 'critical'), \
                COALESCE(SUM(current_value), 0)::float8, \
                COUNT(*) FILTER (WHERE maintenance_status IS NOT NULL) \
             FROM assets \
             WHERE version_status = 'live'",
        )
        .fetch_one(pool)
        .await?;

        Ok(DashboardMetrics {
            total_assets: row.0,
            active_assets: row.1,
            overdue_assets: row.2,
            critical_assets: row.3,
            total_value: row.4,
            maintenance_tracked_assets: row.5,
        })
    }

    /// Most valuable assets first. Assets without a value are excluded.
    pub async fn top_by_value(pool: &PgPool, limit: i64) -> Result<Vec<AssetSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM assets \
             WHERE version_status = 'live' AND current_value IS NOT NULL \
             ORDER BY current_value DESC, id ASC \
             LIMIT $1"
        );
        sqlx::query_as::<_, AssetSummary>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Overdue and due-soon assets, soonest due first.
    pub async fn needing_maintenance(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<AssetSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM assets \
             WHERE version_status = 'live' \
               AND maintenance_status IN ('overdue', 'due_soon') \
             ORDER BY next_maintenance_due ASC NULLS LAST, id ASC \
             LIMIT $1"
        );
        sqlx::query_as::<_, AssetSummary>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}

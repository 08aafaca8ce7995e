//! Handlers for the asset dashboard.
//!
//! The summary endpoint runs every aggregation concurrently and reports
//! each widget independently: a failing query yields `{ "error": ... }` for
//! that widget while the rest still carry `{ "data": ... }`.

use assetforge_core::dashboard::{self, clamp_limit, ChartSpec, DashboardMetrics};
use assetforge_db::models::asset::AssetSummary;
use assetforge_db::repositories::{AssetGrouping, DashboardRepo};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::query::LimitParams;
use crate::response::{DataResponse, WidgetResult};
use crate::state::AppState;

/// Every dashboard widget, each loaded independently.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub metrics: WidgetResult<DashboardMetrics>,
    pub maintenance_health: WidgetResult<ChartSpec>,
    pub by_status: WidgetResult<ChartSpec>,
    pub by_criticality: WidgetResult<ChartSpec>,
    pub version_lifecycle: WidgetResult<ChartSpec>,
    pub by_maintenance_status: WidgetResult<ChartSpec>,
    pub by_condition: WidgetResult<ChartSpec>,
    pub by_site: WidgetResult<ChartSpec>,
    pub value_by_site: WidgetResult<ChartSpec>,
    pub top_by_value: WidgetResult<Vec<AssetSummary>>,
    pub needs_maintenance: WidgetResult<Vec<AssetSummary>>,
}

/// GET /api/v1/dashboard/metrics
pub async fn metrics(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let metrics = DashboardRepo::metrics(&state.pool).await?;
    Ok(Json(DataResponse { data: metrics }))
}

/// GET /api/v1/dashboard/summary
pub async fn summary(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let pool = &state.pool;
    let limit = clamp_limit(None, state.config.dashboard_top_n);

    let (
        metrics,
        by_status,
        by_criticality,
        by_version,
        by_maintenance,
        by_condition,
        by_site,
        value_by_site,
        top_by_value,
        needs_maintenance,
    ) = tokio::join!(
        DashboardRepo::metrics(pool),
        DashboardRepo::count_by(pool, AssetGrouping::Status),
        DashboardRepo::count_by(pool, AssetGrouping::Criticality),
        DashboardRepo::count_by(pool, AssetGrouping::VersionStatus),
        DashboardRepo::count_by(pool, AssetGrouping::MaintenanceStatus),
        DashboardRepo::count_by(pool, AssetGrouping::Condition),
        DashboardRepo::count_by(pool, AssetGrouping::Site),
        DashboardRepo::value_by_site(pool),
        DashboardRepo::top_by_value(pool, limit),
        DashboardRepo::needing_maintenance(pool, limit),
    );

    let health = match &metrics {
        Ok(m) => Ok(dashboard::maintenance_health_gauge(m)),
        Err(e) => Err(e.to_string()),
    };

    let summary = DashboardSummary {
        metrics: WidgetResult::from_result("metrics", metrics),
        maintenance_health: WidgetResult::from_result("maintenance_health", health),
        by_status: WidgetResult::from_result(
            "by_status",
            by_status.map(|rows| dashboard::status_chart(&rows)),
        ),
        by_criticality: WidgetResult::from_result(
            "by_criticality",
            by_criticality.map(|rows| dashboard::criticality_chart(&rows)),
        ),
        version_lifecycle: WidgetResult::from_result(
            "version_lifecycle",
            by_version.map(|rows| dashboard::version_funnel(&rows)),
        ),
        by_maintenance_status: WidgetResult::from_result(
            "by_maintenance_status",
            by_maintenance.map(|rows| dashboard::maintenance_chart(&rows)),
        ),
        by_condition: WidgetResult::from_result(
            "by_condition",
            by_condition.map(|rows| dashboard::condition_chart(&rows)),
        ),
        by_site: WidgetResult::from_result(
            "by_site",
            by_site.map(|rows| dashboard::site_chart(&rows)),
        ),
        value_by_site: WidgetResult::from_result(
            "value_by_site",
            value_by_site.map(|rows| dashboard::site_value_chart(&rows)),
        ),
        top_by_value: WidgetResult::from_result("top_by_value", top_by_value),
        needs_maintenance: WidgetResult::from_result("needs_maintenance", needs_maintenance),
    };

    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/dashboard/needs-maintenance?limit=
///
/// Overdue and due-soon assets, soonest first.
pub async fn needs_maintenance(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, state.config.dashboard_top_n);
    let assets = DashboardRepo::needing_maintenance(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: assets }))
}

/// GET /api/v1/dashboard/top-value?limit=
pub async fn top_value(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, state.config.dashboard_top_n);
    let assets = DashboardRepo::top_by_value(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: assets }))
}

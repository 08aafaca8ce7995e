//! Integration tests for `DashboardRepo` aggregations.

use assetforge_db::repositories::{AssetGrouping, DashboardRepo};
use sqlx::PgPool;

/// Seed a small, fixed inventory:
///
/// | name | site | status   | crit     | version    | value | maintenance |
/// |------|------|----------|----------|------------|-------|-------------|
/// | A    | N    | active   | critical | live       | 100   | overdue     |
/// | B    | N    | active   | medium   | live       | 300   | due_soon    |
/// | C    | S    | inactive | medium   | live       | 50    | -           |
/// | D    | N    | active   | low      | planned    | 400   | -           |
/// | A    | N    | active   | critical | superseded | 999   | -           |
async fn seed(pool: &PgPool) {
    sqlx::query(
        "INSERT INTO assets \
            (name, asset_type, site, status, criticality, version_status, version_label, \
             current_value, next_maintenance_due, maintenance_status) \
         VALUES \
            ('A', 'Pump', 'N', 'active', 'critical', 'live', '2.0', 100, '2024-01-10', 'overdue'), \
            ('B', 'Pump', 'N', 'active', 'medium', 'live', '1.0', 300, '2024-02-10', 'due_soon'), \
            ('C', 'Pump', 'S', 'inactive', 'medium', 'live', '1.0', 50, NULL, NULL), \
            ('D', 'Pump', 'N', 'active', 'low', 'planned', '1.1', 400, NULL, NULL), \
            ('A', 'Pump', 'N', 'active', 'critical', 'superseded', '1.0', 999, NULL, NULL)",
    )
    .execute(pool)
    .await
    .unwrap();
}

fn value(rows: &[(Option<String>, f64)], key: Option<&str>) -> f64 {
    rows.iter()
        .find(|(k, _)| k.as_deref() == key)
        .map(|(_, v)| *v)
        .unwrap_or(0.0)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_metrics_count_live_inventory_only(pool: PgPool) {
    seed(&pool).await;
    let metrics = DashboardRepo::metrics(&pool).await.unwrap();

    assert_eq!(metrics.total_assets, 3, "planned and superseded rows are not inventory");
    assert_eq!(metrics.active_assets, 2);
    assert_eq!(metrics.overdue_assets, 1);
    assert_eq!(metrics.critical_assets, 1);
    assert_eq!(metrics.total_value, 450.0);
    assert_eq!(metrics.maintenance_tracked_assets, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_metrics_on_empty_table(pool: PgPool) {
    let metrics = DashboardRepo::metrics(&pool).await.unwrap();
    assert_eq!(metrics.total_assets, 0);
    assert_eq!(metrics.total_value, 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_count_by_groupings(pool: PgPool) {
    seed(&pool).await;

    let status = DashboardRepo::count_by(&pool, AssetGrouping::Status).await.unwrap();
    assert_eq!(value(&status, Some("active")), 2.0);
    assert_eq!(value(&status, Some("inactive")), 1.0);

    let versions = DashboardRepo::count_by(&pool, AssetGrouping::VersionStatus)
        .await
        .unwrap();
    assert_eq!(value(&versions, Some("live")), 3.0);
    assert_eq!(value(&versions, Some("planned")), 1.0);
    assert_eq!(value(&versions, Some("superseded")), 1.0, "history is counted here");

    let maintenance = DashboardRepo::count_by(&pool, AssetGrouping::MaintenanceStatus)
        .await
        .unwrap();
    assert_eq!(value(&maintenance, None), 1.0);
    assert_eq!(value(&maintenance, Some("overdue")), 1.0);

    let sites = DashboardRepo::count_by(&pool, AssetGrouping::Site).await.unwrap();
    assert_eq!(value(&sites, Some("N")), 2.0);
    assert_eq!(value(&sites, Some("S")), 1.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_value_by_site(pool: PgPool) {
    seed(&pool).await;
    let rows = DashboardRepo::value_by_site(&pool).await.unwrap();
    assert_eq!(value(&rows, Some("N")), 400.0, "the planned copy is not summed");
    assert_eq!(value(&rows, Some("S")), 50.0);
    assert_eq!(value(&rows, None), 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_top_by_value_and_needing_maintenance(pool: PgPool) {
    seed(&pool).await;

    let top = DashboardRepo::top_by_value(&pool, 2).await.unwrap();
    let names: Vec<&str> = top.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["B", "A"]);
    assert_eq!(top[1].current_value, Some(100.0), "planned and superseded rows excluded");

    let due = DashboardRepo::needing_maintenance(&pool, 10).await.unwrap();
    let names: Vec<&str> = due.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

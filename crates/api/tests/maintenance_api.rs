//! HTTP-level tests for maintenance derivation.

mod common;

use std::collections::HashMap;
use std::time::Duration;

use assetforge_api::engine::maintenance;
use assetforge_core::asset::VersionStatus;
use assetforge_core::maintenance::DerivedMaintenance;
use assetforge_core::types::Date;
use assetforge_db::repositories::AssetRepo;
use axum::http::StatusCode;
use common::{body_json, build_test_app, get, patch_json, post_empty, post_json};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate `quantity` Live assets with a 30-day interval; returns their ids.
async fn seed(pool: &PgPool, quantity: i64) -> Vec<i64> {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/templates",
        json!({ "name": "Chiller", "asset_type": "Chiller", "maintenance_interval_days": 30 }),
    )
    .await;
    let template_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/generation",
        json!({
            "template_id": template_id,
            "quantity": quantity,
            "site_prefix": "HQ",
            "start_number": 1
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["assets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect()
}

/// Write maintenance inputs straight to the table, leaving derived columns
/// stale.
async fn set_last_maintenance_raw(pool: &PgPool, id: i64, last: &str) {
    sqlx::query(
        "UPDATE assets SET last_maintenance_date = $2::date, \
         next_maintenance_due = NULL, maintenance_status = NULL WHERE id = $1",
    )
    .bind(id)
    .bind(last)
    .execute(pool)
    .await
    .unwrap();
}

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

async fn stored_maintenance(pool: &PgPool, id: i64) -> (Value, Value, Value) {
    let response = get(build_test_app(pool.clone()), &format!("/api/v1/assets/{id}")).await;
    let asset = body_json(response).await["data"].clone();
    (
        asset["version_status"].clone(),
        asset["maintenance_status"].clone(),
        asset["next_maintenance_due"].clone(),
    )
}

async fn recompute(pool: &PgPool, body: Value) -> (StatusCode, Value) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/assets/maintenance/recompute",
        body,
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_derives_due_date_and_status(pool: PgPool) {
    let ids = seed(&pool, 1).await;
    let uri = format!("/api/v1/assets/{}/maintenance", ids[0]);

    let response = patch_json(
        build_test_app(pool.clone()),
        &uri,
        json!({ "last_maintenance_date": "2024-01-01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["next_maintenance_due"], "2024-01-31");
    assert_eq!(body["data"]["maintenance_status"], "overdue");

    // Retiring the asset stops tracking but keeps the due date.
    let response = patch_json(
        build_test_app(pool.clone()),
        &uri,
        json!({ "status": "retired" }),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["next_maintenance_due"], "2024-01-31");
    assert!(body["data"]["maintenance_status"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_rejects_empty_and_bad_input(pool: PgPool) {
    let ids = seed(&pool, 1).await;
    let uri = format!("/api/v1/assets/{}/maintenance", ids[0]);

    let response = patch_json(build_test_app(pool.clone()), &uri, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json(
        build_test_app(pool.clone()),
        &uri,
        json!({ "maintenance_interval_days": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json(
        build_test_app(pool),
        "/api/v1/assets/999999/maintenance",
        json!({ "maintenance_interval_days": 10 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recompute_writes_once(pool: PgPool) {
    let ids = seed(&pool, 2).await;
    set_last_maintenance_raw(&pool, ids[0], "2024-01-01").await;

    let (status, body) = recompute(&pool, json!({ "asset_ids": [ids[0], ids[1], ids[0]] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["evaluated"], 2);
    let updated = body["data"]["updated"].as_array().unwrap();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0]["asset_id"], ids[0]);
    assert_eq!(updated[0]["next_maintenance_due"], "2024-01-31");
    assert_eq!(updated[0]["maintenance_status"], "overdue");

    let (_, body) = recompute(&pool, json!({ "asset_ids": [ids[0]] })).await;
    assert_eq!(body["data"]["updated"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recompute_skips_unchanged_inputs(pool: PgPool) {
    let ids = seed(&pool, 1).await;
    set_last_maintenance_raw(&pool, ids[0], "2024-01-01").await;

    let prior = json!({
        ids[0].to_string(): {
            "maintenance_interval_days": 30,
            "last_maintenance_date": "2024-01-01",
            "status": "active",
            "version_status": "live"
        }
    });
    let (status, body) = recompute(&pool, json!({ "asset_ids": [ids[0]], "prior": prior })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["updated"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recompute_rejects_bad_id_sets(pool: PgPool) {
    let ids = seed(&pool, 1).await;

    let (status, _) = recompute(&pool, json!({ "asset_ids": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = recompute(&pool, json!({ "asset_ids": [ids[0], 999999] })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("999999"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_sweeps_stale_live_assets(pool: PgPool) {
    let ids = seed(&pool, 3).await;
    set_last_maintenance_raw(&pool, ids[0], "2024-01-01").await;
    set_last_maintenance_raw(&pool, ids[2], "2024-02-01").await;

    let uri = "/api/v1/assets/maintenance/refresh";
    let response = post_empty(build_test_app(pool.clone()), uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["evaluated"], 3);
    assert_eq!(body["data"]["updated"].as_array().unwrap().len(), 2);

    let response = post_empty(build_test_app(pool), uri).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["updated"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_waits_for_a_pending_supersede(pool: PgPool) {
    let ids = seed(&pool, 1).await;
    set_last_maintenance_raw(&pool, ids[0], "2024-01-01").await;

    let mut tx = pool.begin().await.unwrap();
    AssetRepo::set_version_state(
        &mut tx,
        ids[0],
        VersionStatus::Superseded,
        DerivedMaintenance::default(),
    )
    .await
    .unwrap()
    .unwrap();

    let sweep = tokio::spawn({
        let pool = pool.clone();
        async move { maintenance::refresh(&pool, date(2024, 6, 1), 30).await }
    });
    tokio::time::sleep(Duration::from_millis(200)).await;
    tx.commit().await.unwrap();

    let summary = sweep.await.unwrap().unwrap();
    assert_eq!(summary.evaluated, 0, "the demoted row drops out of the sweep");
    assert!(summary.updated.is_empty());

    let (version, status, due) = stored_maintenance(&pool, ids[0]).await;
    assert_eq!(version, "superseded");
    assert!(status.is_null());
    assert!(due.is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recompute_derives_from_the_committed_row(pool: PgPool) {
    let ids = seed(&pool, 1).await;
    set_last_maintenance_raw(&pool, ids[0], "2024-01-01").await;

    let mut tx = pool.begin().await.unwrap();
    AssetRepo::set_version_state(
        &mut tx,
        ids[0],
        VersionStatus::Superseded,
        DerivedMaintenance::default(),
    )
    .await
    .unwrap()
    .unwrap();

    let run = tokio::spawn({
        let pool = pool.clone();
        let asset_ids = vec![ids[0]];
        async move {
            maintenance::recompute(&pool, &asset_ids, &HashMap::new(), date(2024, 6, 1), 30).await
        }
    });
    tokio::time::sleep(Duration::from_millis(200)).await;
    tx.commit().await.unwrap();

    let summary = run.await.unwrap().unwrap();
    assert_eq!(summary.evaluated, 1);
    assert!(summary.updated.is_empty(), "superseded rows derive to unset");

    let (version, status, due) = stored_maintenance(&pool, ids[0]).await;
    assert_eq!(version, "superseded");
    assert!(status.is_null());
    assert!(due.is_null());
}

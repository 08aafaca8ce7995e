pub mod assets;
pub mod dashboard;
pub mod generation;
pub mod health;
pub mod templates;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /templates                                 list, create (GET, POST)
/// /templates/{id}                            get (GET)
/// /templates/{id}/deactivate                 soft deactivate (POST)
///
/// /generation                                generate batch (POST)
/// /generation/preview                        preview names (POST)
///
/// /assets/live?name=                         live asset by name (GET)
/// /assets/maintenance/recompute              derive for changed ids (POST)
/// /assets/maintenance/refresh                derive for all live assets (POST)
/// /assets/{id}                               get (GET)
/// /assets/{id}/maintenance                   edit inputs (PATCH)
/// /assets/{id}/versions                      chain history (GET)
/// /assets/{id}/versions/planned              create planned version (POST)
/// /assets/{id}/versions/activate             activate planned version (POST)
/// /assets/{id}/versions/supersede            supersede (POST)
///
/// /dashboard/metrics                         headline numbers (GET)
/// /dashboard/summary                         every widget (GET)
/// /dashboard/needs-maintenance               overdue + due soon (GET)
/// /dashboard/top-value                       most valuable (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/templates", templates::router())
        .nest("/generation", generation::router())
        .nest("/assets", assets::router())
        .nest("/dashboard", dashboard::router())
}

//! Route definitions for assets, their version chains and maintenance.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{assets, maintenance, versions};
use crate::state::AppState;

/// Routes mounted at `/assets`.
///
/// ```text
/// GET    /live?name=                   find_live
/// POST   /maintenance/recompute        recompute
/// POST   /maintenance/refresh          refresh
/// GET    /{id}                         get_by_id
/// PATCH  /{id}/maintenance             update maintenance inputs
/// GET    /{id}/versions                history
/// POST   /{id}/versions/planned        create_planned
/// POST   /{id}/versions/activate       activate
/// POST   /{id}/versions/supersede      supersede
/// ```
pub fn router() -> Router<AppState> {
    let version_routes = Router::new()
        .route("/", get(versions::history))
        .route("/planned", post(versions::create_planned))
        .route("/activate", post(versions::activate))
        .route("/supersede", post(versions::supersede));

    Router::new()
        .route("/live", get(assets::find_live))
        .route("/maintenance/recompute", post(maintenance::recompute))
        .route("/maintenance/refresh", post(maintenance::refresh))
        .route("/{id}", get(assets::get_by_id))
        .route("/{id}/maintenance", patch(maintenance::update))
        .nest("/{id}/versions", version_routes)
}
